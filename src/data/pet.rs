//! Pets and the per-pet, per-rarity stat constants table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::item::Rarity;
use crate::data::{read_document, LoadError};

/// Marker every pet internal id starts with.
pub const PET_ID_PREFIX: &str = "PET_";
/// Rarity assumed when a pet carries no tier.
pub const DEFAULT_PET_RARITY: Rarity = Rarity::Legendary;
pub const MAX_PET_LEVEL: f64 = 100.0;
pub const DEFAULT_PET_CONSTANTS_PATH: &str = "data/pet_constants.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetItem {
    #[serde(rename = "internalname")]
    pub internal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// 0..=100; absent means max level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
}

impl PetItem {
    pub fn new(internal_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: f64) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Constants-table key: the internal id without [PET_ID_PREFIX].
    pub fn lookup_key(&self) -> &str {
        self.internal_name
            .strip_prefix(PET_ID_PREFIX)
            .unwrap_or(&self.internal_name)
    }

    /// Own tier if set, else [DEFAULT_PET_RARITY].
    pub fn rarity_label(&self) -> &str {
        self.tier
            .as_deref()
            .unwrap_or(DEFAULT_PET_RARITY.as_str())
    }

    pub fn level_or_default(&self) -> f64 {
        self.level.unwrap_or(MAX_PET_LEVEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetTierEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, f64>>,
}

/// `pet key -> rarity label -> { stats }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetConstants {
    pets: BTreeMap<String, BTreeMap<String, PetTierEntry>>,
}

impl PetConstants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        rarity: impl Into<String>,
        entry: PetTierEntry,
    ) {
        self.pets
            .entry(key.into())
            .or_default()
            .insert(rarity.into(), entry);
    }

    pub fn insert_stats<I, K>(&mut self, key: &str, rarity: Rarity, stats: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let stats = stats.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.insert(key, rarity.as_str(), PetTierEntry { stats: Some(stats) });
    }

    /// Stats for a pet key at a rarity; `None` if any link in the chain is missing.
    /// A label matching no entry verbatim is retried as its canonical uppercase rarity.
    pub fn stats_for(&self, key: &str, rarity: &str) -> Option<&BTreeMap<String, f64>> {
        let tiers = self.pets.get(key)?;
        let entry = tiers
            .get(rarity)
            .or_else(|| tiers.get(Rarity::parse(rarity)?.as_str()))?;
        entry.stats.as_ref()
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

pub fn load_pet_constants(path: impl AsRef<Path>) -> Result<PetConstants, LoadError> {
    read_document(path.as_ref())
}

/// Like [load_pet_constants] but a missing file is an empty table.
pub fn load_pet_constants_or_empty(path: impl AsRef<Path>) -> Result<PetConstants, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "pet constants not found; pets will contribute no stats"
        );
        return Ok(PetConstants::default());
    }
    load_pet_constants(path)
}
