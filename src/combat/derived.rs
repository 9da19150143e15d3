//! Derived combat metrics.
//!
//! Both formulas floor only their final result; intermediate multipliers stay fractional so
//! level-scaled pet stats are not lost.

use serde::{Deserialize, Serialize};

use crate::combat::stats::StatRecord;

/// Flat damage every hit starts with before weapon damage and strength.
pub const BASE_HIT_DAMAGE: f64 = 5.0;

/// `floor(health * (1 + defense / 100))`
pub fn effective_health(health: f64, defense: f64) -> f64 {
    (health * (1.0 + defense / 100.0)).floor()
}

/// Raw stat inputs for a melee hit. Usable without a full build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageInputs {
    pub damage: f64,
    pub strength: f64,
    pub crit_damage: f64,
    pub bonus_damage_percent: f64,
}

impl From<&StatRecord> for DamageInputs {
    fn from(stats: &StatRecord) -> Self {
        Self {
            damage: stats.damage,
            strength: stats.strength,
            crit_damage: stats.crit_damage,
            bonus_damage_percent: stats.bonus_damage_percent,
        }
    }
}

/// `floor((5 + damage + strength/5) * (1 + strength/100) * (1 + crit_damage/100)
///     * (1 + bonus/100))`
pub fn total_melee_damage(inputs: DamageInputs) -> f64 {
    let base_damage = BASE_HIT_DAMAGE + inputs.damage + inputs.strength / 5.0;
    let strength_multiplier = 1.0 + inputs.strength / 100.0;
    let crit_damage_multiplier = 1.0 + inputs.crit_damage / 100.0;
    let additive_multiplier = 1.0 + inputs.bonus_damage_percent / 100.0;
    (base_damage * strength_multiplier * crit_damage_multiplier * additive_multiplier).floor()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub ehp: f64,
    pub total_damage: f64,
}

pub fn derive_metrics(stats: &StatRecord) -> DerivedMetrics {
    DerivedMetrics {
        ehp: effective_health(stats.health, stats.defense),
        total_damage: total_melee_damage(DamageInputs::from(stats)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_health_floors_result() {
        assert_eq!(effective_health(100.0, 0.0), 100.0);
        assert_eq!(effective_health(100.0, 250.0), 350.0);
        assert_eq!(effective_health(333.0, 33.0), 442.0);
    }

    #[test]
    fn zero_inputs_hit_for_base_damage() {
        assert_eq!(total_melee_damage(DamageInputs::default()), 5.0);
    }

    #[test]
    fn floors_only_at_the_end() {
        // (5 + 0.5) * 1.025 * 2 = 11.275; flooring strength / 5 first would give 10
        let inputs = DamageInputs {
            strength: 2.5,
            crit_damage: 100.0,
            ..DamageInputs::default()
        };
        assert_eq!(total_melee_damage(inputs), 11.0);

        let inputs = DamageInputs {
            damage: 0.9,
            crit_damage: 100.0,
            ..DamageInputs::default()
        };
        // 5.9 * 2 = 11.8; flooring damage first would give 10
        assert_eq!(total_melee_damage(inputs), 11.0);
    }

    #[test]
    fn baseline_record_metrics() {
        let metrics = derive_metrics(&StatRecord::baseline());
        assert_eq!(metrics.ehp, 100.0);
        assert_eq!(metrics.total_damage, 7.0);
    }
}
