//! Build: equipped items, pet, and progression inputs for one hypothetical loadout.
//! Holds no derived state; aggregate it again after every edit.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::item::EquipmentItem;
use crate::data::pet::PetItem;
use crate::data::{read_document, LoadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    Weapon,
}

impl Slot {
    /// Aggregation order.
    pub const ALL: [Slot; 5] = [
        Slot::Helmet,
        Slot::Chestplate,
        Slot::Leggings,
        Slot::Boots,
        Slot::Weapon,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Helmet => "helmet",
            Self::Chestplate => "chestplate",
            Self::Leggings => "leggings",
            Self::Boots => "boots",
            Self::Weapon => "weapon",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player-chosen skill levels and flat bonuses. All default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progression {
    pub combat: f64,
    pub foraging: f64,
    pub magical_power: f64,
    pub base_strength: f64,
    pub base_crit_damage: f64,
}

impl Progression {
    /// `(field, value)` pairs, used for finiteness checks and reporting.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("combat", self.combat),
            ("foraging", self.foraging),
            ("magical_power", self.magical_power),
            ("base_strength", self.base_strength),
            ("base_crit_damage", self.base_crit_damage),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helmet: Option<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chestplate: Option<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leggings: Option<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boots: Option<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<EquipmentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetItem>,
    pub progression: Progression,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> Option<&EquipmentItem> {
        match slot {
            Slot::Helmet => self.helmet.as_ref(),
            Slot::Chestplate => self.chestplate.as_ref(),
            Slot::Leggings => self.leggings.as_ref(),
            Slot::Boots => self.boots.as_ref(),
            Slot::Weapon => self.weapon.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<EquipmentItem> {
        match slot {
            Slot::Helmet => &mut self.helmet,
            Slot::Chestplate => &mut self.chestplate,
            Slot::Leggings => &mut self.leggings,
            Slot::Boots => &mut self.boots,
            Slot::Weapon => &mut self.weapon,
        }
    }

    /// Put `item` in `slot`, returning whatever was there.
    pub fn equip(&mut self, slot: Slot, item: EquipmentItem) -> Option<EquipmentItem> {
        self.slot_mut(slot).replace(item)
    }

    pub fn unequip(&mut self, slot: Slot) -> Option<EquipmentItem> {
        self.slot_mut(slot).take()
    }

    pub fn set_pet(&mut self, pet: PetItem) -> Option<PetItem> {
        self.pet.replace(pet)
    }

    pub fn clear_pet(&mut self) -> Option<PetItem> {
        self.pet.take()
    }

    /// Empty every equipment slot and the pet slot. Progression is kept.
    pub fn clear(&mut self) {
        for slot in Slot::ALL {
            self.slot_mut(slot).take();
        }
        self.pet = None;
    }

    /// Non-empty equipment slots in aggregation order.
    pub fn equipped(&self) -> impl Iterator<Item = (Slot, &EquipmentItem)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.slot(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.equipped().next().is_none() && self.pet.is_none()
    }
}

/// Load a build from JSON, or YAML for `.yaml`/`.yml` paths.
pub fn load_build(path: impl AsRef<Path>) -> Result<Build, LoadError> {
    read_document(path.as_ref())
}
