//! Build aggregation: baseline -> equipment -> pet -> progression -> derived metrics.
//! A pure function of its inputs; nothing is cached between calls.

use std::collections::BTreeMap;

use crate::combat::contribution::{apply_item, apply_pet, apply_progression};
use crate::combat::derived::derive_metrics;
use crate::combat::stats::{FinalizedStats, StatRecord};
use crate::data::{Build, PetConstants};

/// A non-finite number reached the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid input: {context}.{field} must be finite (got {value})")]
pub struct InvalidInputError {
    pub context: String,
    pub field: String,
    pub value: f64,
}

fn ensure_finite(context: &str, field: &str, value: f64) -> Result<(), InvalidInputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidInputError {
            context: context.to_string(),
            field: field.to_string(),
            value,
        })
    }
}

fn ensure_finite_stats(
    context: &str,
    stats: Option<&BTreeMap<String, f64>>,
) -> Result<(), InvalidInputError> {
    for (key, value) in stats.into_iter().flatten() {
        ensure_finite(context, key, *value)?;
    }
    Ok(())
}

/// Reject NaN/infinite progression values, item stats, pet level and resolved pet stats.
pub fn validate_build(build: &Build, constants: &PetConstants) -> Result<(), InvalidInputError> {
    for (field, value) in build.progression.fields() {
        ensure_finite("progression", field, value)?;
    }
    for (slot, item) in build.equipped() {
        ensure_finite_stats(slot.as_str(), item.stats.as_ref())?;
    }
    if let Some(pet) = &build.pet {
        if let Some(level) = pet.level {
            ensure_finite("pet", "level", level)?;
        }
        ensure_finite_stats("pet", constants.stats_for(pet.lookup_key(), pet.rarity_label()))?;
    }
    Ok(())
}

/// Finite inputs can still overflow once summed or multiplied.
fn ensure_finite_record(record: &StatRecord) -> Result<(), InvalidInputError> {
    for (field, value) in record.entries() {
        ensure_finite("aggregate", field, value)?;
    }
    Ok(())
}

/// Sum every contribution for `build` into a fresh record, without derived metrics.
pub fn accumulate(
    build: &Build,
    constants: &PetConstants,
) -> Result<StatRecord, InvalidInputError> {
    validate_build(build, constants)?;

    let mut record = StatRecord::baseline();
    for (slot, item) in build.equipped() {
        tracing::debug!(
            slot = slot.as_str(),
            item = item.internal_name.as_str(),
            "applying item"
        );
        apply_item(&mut record, item);
    }
    if let Some(pet) = &build.pet {
        let level = pet.level_or_default();
        tracing::debug!(pet = pet.internal_name.as_str(), level, "applying pet");
        apply_pet(&mut record, pet, constants, level);
    }
    apply_progression(&mut record, &build.progression);
    ensure_finite_record(&record)?;
    Ok(record)
}

pub fn finalize(stats: StatRecord) -> FinalizedStats {
    let metrics = derive_metrics(&stats);
    FinalizedStats {
        stats,
        ehp: metrics.ehp,
        total_damage: metrics.total_damage,
    }
}

pub fn aggregate(
    build: &Build,
    constants: &PetConstants,
) -> Result<FinalizedStats, InvalidInputError> {
    let finalized = finalize(accumulate(build, constants)?);
    ensure_finite("aggregate", "ehp", finalized.ehp)?;
    ensure_finite("aggregate", "total_damage", finalized.total_damage)?;
    tracing::debug!(
        ehp = finalized.ehp,
        total_damage = finalized.total_damage,
        "build aggregated"
    );
    Ok(finalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EquipmentItem, PetItem, Rarity, Slot};

    #[test]
    fn empty_build_is_baseline() {
        let finalized = aggregate(&Build::new(), &PetConstants::new()).expect("aggregates");
        assert_eq!(finalized.stats, StatRecord::baseline());
        assert_eq!(finalized.ehp, 100.0);
        assert_eq!(finalized.total_damage, 7.0);
    }

    #[test]
    fn nan_progression_is_rejected() {
        let mut build = Build::new();
        build.progression.magical_power = f64::NAN;
        let err = aggregate(&build, &PetConstants::new()).expect_err("must reject NaN");
        assert_eq!(err.context, "progression");
        assert_eq!(err.field, "magical_power");
    }

    #[test]
    fn infinite_item_stat_is_rejected() {
        let mut build = Build::new();
        build.equip(
            Slot::Chestplate,
            EquipmentItem::new("CHEST").with_stat("HEALTH", f64::INFINITY),
        );
        let err = aggregate(&build, &PetConstants::new()).expect_err("must reject infinity");
        assert_eq!(err.context, "chestplate");
        assert_eq!(err.field, "HEALTH");
    }

    #[test]
    fn non_finite_pet_level_and_constants_are_rejected() {
        let mut constants = PetConstants::new();
        constants.insert_stats("TIGER", Rarity::Legendary, [("STRENGTH", 10.0)]);
        let mut build = Build::new();
        build.set_pet(PetItem::new("PET_TIGER").with_level(f64::NAN));
        assert!(aggregate(&build, &constants).is_err());

        constants.insert_stats("TIGER", Rarity::Legendary, [("STRENGTH", f64::NEG_INFINITY)]);
        build.set_pet(PetItem::new("PET_TIGER"));
        let err = aggregate(&build, &constants).expect_err("must reject constants");
        assert_eq!(err.context, "pet");
        assert_eq!(err.field, "STRENGTH");
    }

    #[test]
    fn strength_sums_across_sources() {
        let mut constants = PetConstants::new();
        constants.insert_stats("TIGER", Rarity::Legendary, [("STRENGTH", 100.0)]);
        let mut build = Build::new();
        build.equip(Slot::Weapon, EquipmentItem::new("SWORD").with_stat("STRENGTH", 30.0));
        build.set_pet(PetItem::new("PET_TIGER").with_level(50.0));
        build.progression.base_strength = 20.0;
        let finalized = aggregate(&build, &constants).expect("aggregates");
        assert_eq!(finalized.stats.strength, 100.0);
    }

    #[test]
    fn overflowing_sums_are_rejected() {
        let mut build = Build::new();
        build.equip(Slot::Helmet, EquipmentItem::new("A").with_stat("DAMAGE", 1.7e308));
        build.equip(Slot::Weapon, EquipmentItem::new("B").with_stat("DAMAGE", 1.7e308));
        let err = aggregate(&build, &PetConstants::new()).expect_err("overflow rejected");
        assert_eq!(err.context, "aggregate");
        assert_eq!(err.field, "damage");
        assert!(accumulate(&build, &PetConstants::new()).is_err());
    }

    #[test]
    fn overflowing_derived_metric_is_rejected() {
        let mut build = Build::new();
        build.equip(Slot::Helmet, EquipmentItem::new("A").with_stat("HEALTH", 1e308));
        build.equip(Slot::Boots, EquipmentItem::new("B").with_stat("DEFENSE", 1e3));
        let err = aggregate(&build, &PetConstants::new()).expect_err("overflow rejected");
        assert_eq!(err.context, "aggregate");
        assert_eq!(err.field, "ehp");
    }
}
