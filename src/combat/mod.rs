pub mod aggregate;
pub mod contribution;
pub mod derived;
pub mod stats;

pub use aggregate::{accumulate, aggregate, finalize, validate_build, InvalidInputError};
pub use contribution::{apply_item, apply_pet, apply_progression, pet_level_scale};
pub use derived::{
    derive_metrics, effective_health, total_melee_damage, DamageInputs, DerivedMetrics,
    BASE_HIT_DAMAGE,
};
pub use stats::{
    FinalizedStats, Stat, StatRecord, BASE_CRIT_CHANCE, BASE_CRIT_DAMAGE, BASE_HEALTH, BASE_SPEED,
};
