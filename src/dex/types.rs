//! Pokedex record types and error definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale used for display names and flavor text
pub const DISPLAY_LOCALE: &str = "en";

/// Dex-specific error type
#[derive(Debug, Error)]
pub enum DexError {
    #[error("Failed to read dex data from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dex data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for dex operations
pub type DexResult<T> = Result<T, DexError>;

/// A single Pokemon entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub national_id: u32,

    /// Localized names keyed by locale
    pub names: BTreeMap<String, String>,

    pub types: Vec<String>,

    pub abilities: Vec<Ability>,

    pub base_stats: BaseStats,

    /// Flavor text per game generation, each keyed by locale
    #[serde(default)]
    pub pokedex_entries: BTreeMap<String, BTreeMap<String, String>>,

    /// Name of the Pokemon this one evolves from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution_from: Option<String>,

    #[serde(default)]
    pub evolutions: Vec<Evolution>,
}

impl Pokemon {
    /// Display name, falling back to any available locale
    pub fn name(&self) -> &str {
        self.names
            .get(DISPLAY_LOCALE)
            .or_else(|| self.names.values().next())
            .map(String::as_str)
            .unwrap_or("???")
    }

    /// Flavor texts in the display locale, one per generation that has one
    pub fn flavor_texts(&self) -> Vec<&str> {
        self.pokedex_entries
            .values()
            .filter_map(|entry| entry.get(DISPLAY_LOCALE))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
}

/// Base stats in display order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub sp_atk: u32,
    pub sp_def: u32,
    pub speed: u32,
}

impl BaseStats {
    /// `(label, value)` pairs with abbreviated labels
    pub fn labeled(&self) -> [(&'static str, u32); 6] {
        [
            ("HP", self.hp),
            ("ATK", self.atk),
            ("DEF", self.def),
            ("spATK", self.sp_atk),
            ("spDEF", self.sp_def),
            ("SPEED", self.speed),
        ]
    }
}

/// One evolution target and the qualifiers required to reach it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evolution {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub level_up: Option<String>,
    #[serde(default)]
    pub trade: Option<String>,
    #[serde(default)]
    pub happiness: Option<u32>,
    #[serde(default)]
    pub hold_item: Option<String>,
    #[serde(default)]
    pub move_learned: Option<String>,
}
