//! Item snapshots and player context consumed by the fortune calculation

use crate::types::{Crop, Rarity};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Attribute holding the applied reforge id
pub const ATTR_MODIFIER: &str = "modifier";
/// Attribute set to "1" when the item has been recombobulated
pub const ATTR_RARITY_UPGRADES: &str = "rarity_upgrades";
/// Attribute counting applied Farming for Dummies books
pub const ATTR_FARMING_FOR_DUMMIES: &str = "farming_for_dummies_count";

/// Immutable view of a single item at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Game item identifier (e.g. `THEORETICAL_HOE_WHEAT_3`)
    pub skyblock_id: String,
    /// Display name, if known
    #[serde(default)]
    pub name: Option<String>,
    /// Stated rarity (already includes any recombobulation)
    pub rarity: Rarity,
    /// Lore lines, color codes included
    #[serde(default)]
    pub lore: Vec<String>,
    /// Enchantment name to level, in the order the item reports them
    #[serde(default)]
    pub enchantments: IndexMap<String, u32>,
    /// Free-form extra attributes
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ItemSnapshot {
    /// Create a bare snapshot with no lore, enchantments or attributes
    pub fn new(skyblock_id: impl Into<String>, rarity: Rarity) -> Self {
        ItemSnapshot {
            skyblock_id: skyblock_id.into(),
            name: None,
            rarity,
            lore: Vec::new(),
            enchantments: IndexMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Parse a snapshot from JSON
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a lore line
    pub fn with_lore_line(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }

    /// Set an enchantment level, keeping its original position if already present
    pub fn with_enchantment(mut self, name: impl Into<String>, level: u32) -> Self {
        self.enchantments.insert(name.into(), level);
        self
    }

    /// Set a free-form attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the reforge id
    pub fn with_reforge(self, reforge_id: impl Into<String>) -> Self {
        self.with_attribute(ATTR_MODIFIER, reforge_id)
    }

    /// Mark the item as recombobulated
    pub fn recombobulated(self) -> Self {
        self.with_attribute(ATTR_RARITY_UPGRADES, "1")
    }

    /// Level of an enchantment, if present
    pub fn enchantment(&self, name: &str) -> Option<u32> {
        self.enchantments.get(name).copied()
    }

    /// Applied reforge id, if any
    pub fn reforge_id(&self) -> Option<&str> {
        self.attributes
            .get(ATTR_MODIFIER)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Whether the recombobulator upgrade was applied
    pub fn is_recombobulated(&self) -> bool {
        self.attributes
            .get(ATTR_RARITY_UPGRADES)
            .is_some_and(|v| v == "1")
    }

    /// Rarity whose stat row the item actually receives
    pub fn stat_rarity(&self) -> Rarity {
        if self.is_recombobulated() {
            self.rarity.previous()
        } else {
            self.rarity
        }
    }

    /// Number of Farming for Dummies books applied; malformed values count as zero
    pub fn farming_for_dummies(&self) -> u32 {
        self.numeric_attribute(ATTR_FARMING_FOR_DUMMIES)
    }

    fn numeric_attribute(&self, key: &str) -> u32 {
        match self.attributes.get(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                debug!(attribute = key, value = %raw, "ignoring non-numeric attribute");
                0
            }),
            None => 0,
        }
    }
}

/// Player progression context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Crop milestone reached per crop
    #[serde(default)]
    pub milestones: HashMap<Crop, u32>,
}

impl PlayerOptions {
    /// Create an empty context
    pub fn new() -> Self {
        PlayerOptions::default()
    }

    /// Set the milestone for a crop
    pub fn with_milestone(mut self, crop: Crop, milestone: u32) -> Self {
        self.milestones.insert(crop, milestone);
        self
    }

    /// Milestone for a crop, zero when unknown
    pub fn milestone(&self, crop: Crop) -> u32 {
        self.milestones.get(&crop).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recombobulated_flag_requires_literal_one() {
        let item = ItemSnapshot::new("THEORETICAL_HOE_WHEAT_3", Rarity::Legendary);
        assert!(!item.is_recombobulated());
        assert!(item.clone().recombobulated().is_recombobulated());
        assert!(!item.with_attribute(ATTR_RARITY_UPGRADES, "true").is_recombobulated());
    }

    #[test]
    fn test_stat_rarity_drops_one_tier_when_recombobulated() {
        let item = ItemSnapshot::new("THEORETICAL_HOE_WHEAT_3", Rarity::Mythic).recombobulated();
        assert_eq!(item.stat_rarity(), Rarity::Legendary);
        assert_eq!(item.rarity, Rarity::Mythic);
    }

    #[test]
    fn test_farming_for_dummies_malformed_is_zero() {
        let item = ItemSnapshot::new("X", Rarity::Common)
            .with_attribute(ATTR_FARMING_FOR_DUMMIES, "five");
        assert_eq!(item.farming_for_dummies(), 0);

        let item = item.with_attribute(ATTR_FARMING_FOR_DUMMIES, "5");
        assert_eq!(item.farming_for_dummies(), 5);
    }

    #[test]
    fn test_with_enchantment_keeps_position() {
        let item = ItemSnapshot::new("X", Rarity::Common)
            .with_enchantment("harvesting", 5)
            .with_enchantment("cultivating", 3)
            .with_enchantment("harvesting", 6);
        let entries: Vec<(&str, u32)> =
            item.enchantments.iter().map(|(n, l)| (n.as_str(), *l)).collect();
        assert_eq!(entries, vec![("harvesting", 6), ("cultivating", 3)]);
    }

    #[test]
    fn test_from_json_keeps_enchantment_order() {
        let json = r#"{
            "skyblock_id": "THEORETICAL_HOE_WHEAT_3",
            "rarity": "LEGENDARY",
            "lore": ["§7Some lore"],
            "enchantments": { "turbo_wheat": 5, "harvesting": 6, "cultivating": 10 },
            "attributes": { "modifier": "blessed", "rarity_upgrades": "1" }
        }"#;
        let item = ItemSnapshot::from_json(json).unwrap();
        let names: Vec<&str> = item.enchantments.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["turbo_wheat", "harvesting", "cultivating"]);
        assert_eq!(item.reforge_id(), Some("blessed"));
        assert!(item.is_recombobulated());
    }

    #[test]
    fn test_player_milestone_default() {
        let player = PlayerOptions::new().with_milestone(Crop::Wheat, 46);
        assert_eq!(player.milestone(Crop::Wheat), 46);
        assert_eq!(player.milestone(Crop::Carrot), 0);
    }
}
