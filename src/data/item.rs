//! Equipment item records as published in the NEU item repo (`items/<ID>.json`).
//! Only the fields the stat engine reads are modelled; everything else is ignored on load.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Divine,
    Special,
}

impl Rarity {
    pub const ALL: [Rarity; 8] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Divine,
        Rarity::Special,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Uncommon => "UNCOMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
            Self::Mythic => "MYTHIC",
            Self::Divine => "DIVINE",
            Self::Special => "SPECIAL",
        }
    }

    pub fn parse(label: &str) -> Option<Rarity> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|rarity| rarity.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    #[serde(rename = "internalname")]
    pub internal_name: String,
    #[serde(rename = "displayname", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Uppercase stat key -> bonus. Kept ordered so repeated aggregation sums in the same order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, f64>>,
}

impl EquipmentItem {
    pub fn new(internal_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            ..Self::default()
        }
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: f64) -> Self {
        self.stats
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Display name without `§x` formatting codes; falls back to the internal name.
    pub fn name(&self) -> String {
        match &self.display_name {
            Some(raw) => strip_formatting_codes(raw),
            None => self.internal_name.clone(),
        }
    }

    /// Parsed rarity. An item without a tier is COMMON; an unrecognised label is `None`.
    pub fn rarity(&self) -> Option<Rarity> {
        match &self.tier {
            Some(label) => Rarity::parse(label),
            None => Some(Rarity::Common),
        }
    }
}

/// Remove Minecraft colour/format codes: `§` plus the following character.
pub fn strip_formatting_codes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
