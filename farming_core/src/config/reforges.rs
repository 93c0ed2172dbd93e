//! Reforge tables

use super::RarityTable;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};

/// Reforge id of Blessed
pub const BLESSED: &str = "blessed";
/// Reforge id of Bountiful
pub const BOUNTIFUL: &str = "bountiful";

/// An equipment modifier with a fortune row per rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReforgeDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Farming fortune per rarity
    #[serde(default)]
    pub tiers: RarityTable,
}

impl ReforgeDefinition {
    /// Display name, "Reforge" when the table leaves it unnamed
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Reforge")
    }

    /// Fortune granted at a rarity, zero when the row has no entry
    pub fn fortune(&self, rarity: Rarity) -> f64 {
        self.tiers.get(rarity).unwrap_or(0.0)
    }

    /// Fortune granted at the highest defined tier
    pub fn max_fortune(&self) -> f64 {
        self.tiers.highest().unwrap_or(0.0)
    }
}

/// Container for reforge configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReforgesConfig {
    pub reforges: Vec<ReforgeDefinition>,
}
