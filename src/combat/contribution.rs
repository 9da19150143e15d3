//! Contribution rules: each folds one data source into a [StatRecord] by addition.
//! Unknown stat keys and missing pet constants contribute nothing.

use std::collections::BTreeMap;

use crate::combat::stats::{Stat, StatRecord};
use crate::data::{EquipmentItem, PetConstants, PetItem, Progression, MAX_PET_LEVEL};

/// Add every recognised `(key, value * scale)` from an external stat map.
fn add_external_stats(record: &mut StatRecord, stats: &BTreeMap<String, f64>, scale: f64) {
    for (key, value) in stats {
        match Stat::from_external_key(key) {
            Some(stat) => record.add(stat, value * scale),
            None => tracing::trace!(key = key.as_str(), "ignoring unknown stat key"),
        }
    }
}

pub fn apply_item(record: &mut StatRecord, item: &EquipmentItem) {
    if let Some(stats) = &item.stats {
        add_external_stats(record, stats, 1.0);
    }
}

/// Pet stats scale linearly with level: `level / 100` of the table value.
pub fn apply_pet(record: &mut StatRecord, pet: &PetItem, constants: &PetConstants, level: f64) {
    let key = pet.lookup_key();
    let rarity = pet.rarity_label();
    let Some(stats) = constants.stats_for(key, rarity) else {
        tracing::warn!(pet = key, rarity, "no pet constants entry; pet contributes nothing");
        return;
    };
    add_external_stats(record, stats, pet_level_scale(level));
}

pub fn pet_level_scale(level: f64) -> f64 {
    level.clamp(0.0, MAX_PET_LEVEL) / MAX_PET_LEVEL
}

pub fn apply_progression(record: &mut StatRecord, progression: &Progression) {
    record.crit_chance += progression.combat * 0.5;
    record.bonus_damage_percent += progression.combat * 4.0;
    record.strength += progression.foraging * 2.0;
    record.strength += progression.magical_power * 0.1;
    record.crit_damage += progression.magical_power * 0.1;
    record.strength += progression.base_strength;
    record.crit_damage += progression.base_crit_damage;
}
