pub mod build;
pub mod item;
pub mod pet;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

pub use build::{load_build, Build, Progression, Slot};
pub use item::{strip_formatting_codes, EquipmentItem, Rarity};
pub use pet::{
    load_pet_constants, load_pet_constants_or_empty, PetConstants, PetItem, PetTierEntry,
    DEFAULT_PET_CONSTANTS_PATH, DEFAULT_PET_RARITY, MAX_PET_LEVEL, PET_ID_PREFIX,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read data file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Read a JSON document, or YAML when the extension says so.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path)?;
    let parsed: T = if is_yaml(path) {
        serde_yaml::from_str(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    Ok(parsed)
}
