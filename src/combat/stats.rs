//! Stat record: the fixed set of combat stats a build accumulates.
//! External item/pet feeds use uppercase keys (`STRENGTH`, `WALK_SPEED`, ...); [Stat] is the
//! single bijection between those keys and record fields.

use serde::{Deserialize, Serialize};

pub const BASE_CRIT_CHANCE: f64 = 30.0;
pub const BASE_CRIT_DAMAGE: f64 = 50.0;
pub const BASE_HEALTH: f64 = 100.0;
pub const BASE_SPEED: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stat {
    Damage,
    Strength,
    CritChance,
    CritDamage,
    Health,
    Defense,
    Speed,
    Intelligence,
    MagicFind,
    Ferocity,
    AttackSpeed,
    BonusDamagePercent,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::Damage,
        Stat::Strength,
        Stat::CritChance,
        Stat::CritDamage,
        Stat::Health,
        Stat::Defense,
        Stat::Speed,
        Stat::Intelligence,
        Stat::MagicFind,
        Stat::Ferocity,
        Stat::AttackSpeed,
        Stat::BonusDamagePercent,
    ];

    /// Canonical lowercase field name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Strength => "strength",
            Self::CritChance => "crit_chance",
            Self::CritDamage => "crit_damage",
            Self::Health => "health",
            Self::Defense => "defense",
            Self::Speed => "speed",
            Self::Intelligence => "intelligence",
            Self::MagicFind => "magic_find",
            Self::Ferocity => "ferocity",
            Self::AttackSpeed => "attack_speed",
            Self::BonusDamagePercent => "bonus_damage_percent",
        }
    }

    /// Uppercase key used by item and pet data. `BonusDamagePercent` is progression-only.
    pub const fn external_key(self) -> Option<&'static str> {
        match self {
            Self::Damage => Some("DAMAGE"),
            Self::Strength => Some("STRENGTH"),
            Self::CritChance => Some("CRIT_CHANCE"),
            Self::CritDamage => Some("CRIT_DAMAGE"),
            Self::Health => Some("HEALTH"),
            Self::Defense => Some("DEFENSE"),
            Self::Speed => Some("WALK_SPEED"),
            Self::Intelligence => Some("INTELLIGENCE"),
            Self::MagicFind => Some("MAGIC_FIND"),
            Self::Ferocity => Some("FEROCITY"),
            Self::AttackSpeed => Some("ATTACK_SPEED"),
            Self::BonusDamagePercent => None,
        }
    }

    /// Resolve an external stat key, ignoring ASCII case. Unknown keys yield `None`.
    pub fn from_external_key(key: &str) -> Option<Stat> {
        Self::ALL.into_iter().find(|stat| {
            stat.external_key()
                .is_some_and(|external| external.eq_ignore_ascii_case(key))
        })
    }
}

/// Additive stat accumulator. Create with [StatRecord::baseline]; contribution rules only add.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub damage: f64,
    pub strength: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub health: f64,
    pub defense: f64,
    pub speed: f64,
    pub intelligence: f64,
    pub magic_find: f64,
    pub ferocity: f64,
    pub attack_speed: f64,
    pub bonus_damage_percent: f64,
}

impl StatRecord {
    pub const fn baseline() -> Self {
        Self {
            damage: 0.0,
            strength: 0.0,
            crit_chance: BASE_CRIT_CHANCE,
            crit_damage: BASE_CRIT_DAMAGE,
            health: BASE_HEALTH,
            defense: 0.0,
            speed: BASE_SPEED,
            intelligence: 0.0,
            magic_find: 0.0,
            ferocity: 0.0,
            attack_speed: 0.0,
            bonus_damage_percent: 0.0,
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Damage => self.damage,
            Stat::Strength => self.strength,
            Stat::CritChance => self.crit_chance,
            Stat::CritDamage => self.crit_damage,
            Stat::Health => self.health,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::Intelligence => self.intelligence,
            Stat::MagicFind => self.magic_find,
            Stat::Ferocity => self.ferocity,
            Stat::AttackSpeed => self.attack_speed,
            Stat::BonusDamagePercent => self.bonus_damage_percent,
        }
    }

    fn field_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Damage => &mut self.damage,
            Stat::Strength => &mut self.strength,
            Stat::CritChance => &mut self.crit_chance,
            Stat::CritDamage => &mut self.crit_damage,
            Stat::Health => &mut self.health,
            Stat::Defense => &mut self.defense,
            Stat::Speed => &mut self.speed,
            Stat::Intelligence => &mut self.intelligence,
            Stat::MagicFind => &mut self.magic_find,
            Stat::Ferocity => &mut self.ferocity,
            Stat::AttackSpeed => &mut self.attack_speed,
            Stat::BonusDamagePercent => &mut self.bonus_damage_percent,
        }
    }

    pub fn add(&mut self, stat: Stat, value: f64) {
        *self.field_mut(stat) += value;
    }

    /// `(name, value)` pairs in canonical field order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Stat::ALL.into_iter().map(|stat| (stat.name(), self.get(stat)))
    }
}

impl Default for StatRecord {
    fn default() -> Self {
        Self::baseline()
    }
}

/// A fully aggregated record with its derived metrics attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalizedStats {
    #[serde(flatten)]
    pub stats: StatRecord,
    pub ehp: f64,
    pub total_damage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_keys_round_trip_through_the_bijection() {
        for stat in Stat::ALL {
            if let Some(key) = stat.external_key() {
                assert_eq!(Stat::from_external_key(key), Some(stat), "{key}");
            }
        }
    }

    #[test]
    fn external_key_lookup_is_case_insensitive() {
        assert_eq!(Stat::from_external_key("strength"), Some(Stat::Strength));
        assert_eq!(Stat::from_external_key("Walk_Speed"), Some(Stat::Speed));
    }

    #[test]
    fn unknown_and_progression_only_keys_do_not_resolve() {
        assert_eq!(Stat::from_external_key("UNKNOWN_STAT"), None);
        assert_eq!(Stat::from_external_key("SPEED"), None);
        assert_eq!(Stat::from_external_key("BONUS_DAMAGE_PERCENT"), None);
    }

    #[test]
    fn baseline_seeds_only_listed_stats() {
        let record = StatRecord::baseline();
        for (name, value) in record.entries() {
            let expected = match name {
                "crit_chance" => 30.0,
                "crit_damage" => 50.0,
                "health" | "speed" => 100.0,
                _ => 0.0,
            };
            assert_eq!(value, expected, "{name}");
        }
    }

    #[test]
    fn finalized_stats_serialize_flat() {
        let finalized = FinalizedStats {
            stats: StatRecord::baseline(),
            ehp: 100.0,
            total_damage: 7.0,
        };
        let value = serde_json::to_value(finalized).expect("serializes");
        assert_eq!(value["crit_damage"], 50.0);
        assert_eq!(value["ehp"], 100.0);
        assert_eq!(value["total_damage"], 7.0);
    }
}
