//! Static game-balance tables loaded from TOML files

mod crops;
mod enchants;
mod reforges;
mod tools;

pub use crops::{CropInfo, CropsConfig, DicerInfo, DicerRoll, SpecialCropInfo};
pub use enchants::{
    EnchantmentDefinition, EnchantmentsConfig, TurboConfig, TurboEnchant, DEDICATION,
};
pub use reforges::{ReforgeDefinition, ReforgesConfig, BLESSED, BOUNTIFUL};
pub use tools::{ToolDefinition, ToolsConfig};

use crate::types::{Crop, Rarity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

const CROPS_TOML: &str = include_str!("../../config/crops.toml");
const TOOLS_TOML: &str = include_str!("../../config/tools.toml");
const REFORGES_TOML: &str = include_str!("../../config/reforges.toml");
const ENCHANTMENTS_TOML: &str = include_str!("../../config/enchantments.toml");

static BUNDLED: Lazy<GameTables> = Lazy::new(|| {
    GameTables::from_toml_strs(CROPS_TOML, TOOLS_TOML, REFORGES_TOML, ENCHANTMENTS_TOML)
        .unwrap_or_else(|err| {
            error!(%err, "bundled game tables failed to load, falling back to empty tables");
            GameTables::default()
        })
});

/// One optional value per rarity tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RarityTable {
    #[serde(default)]
    pub common: Option<f64>,
    #[serde(default)]
    pub uncommon: Option<f64>,
    #[serde(default)]
    pub rare: Option<f64>,
    #[serde(default)]
    pub epic: Option<f64>,
    #[serde(default)]
    pub legendary: Option<f64>,
    #[serde(default)]
    pub mythic: Option<f64>,
    #[serde(default)]
    pub divine: Option<f64>,
    #[serde(default)]
    pub special: Option<f64>,
    #[serde(default)]
    pub very_special: Option<f64>,
}

impl RarityTable {
    /// Value for a rarity, if the row defines it
    pub fn get(&self, rarity: Rarity) -> Option<f64> {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
            Rarity::Mythic => self.mythic,
            Rarity::Divine => self.divine,
            Rarity::Special => self.special,
            Rarity::VerySpecial => self.very_special,
        }
    }

    /// Value at the highest defined tier
    pub fn highest(&self) -> Option<f64> {
        Rarity::all().iter().rev().find_map(|r| self.get(*r))
    }
}

/// Every static table the calculations read from
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    crops: HashMap<Crop, CropInfo>,
    special_crops: HashMap<String, SpecialCropInfo>,
    dicers: HashMap<Crop, DicerInfo>,
    tools: HashMap<String, ToolDefinition>,
    reforges: HashMap<String, ReforgeDefinition>,
    enchantments: HashMap<String, EnchantmentDefinition>,
    turbo_crops: HashMap<String, Crop>,
    turbo_fortune_per_level: f64,
}

impl GameTables {
    /// Tables bundled with the crate, parsed once on first use
    pub fn bundled() -> &'static GameTables {
        &BUNDLED
    }

    /// Build tables from the four TOML documents
    pub fn from_toml_strs(
        crops: &str,
        tools: &str,
        reforges: &str,
        enchantments: &str,
    ) -> Result<Self, ConfigError> {
        Self::from_configs(
            parse_toml(crops)?,
            parse_toml(tools)?,
            parse_toml(reforges)?,
            parse_toml(enchantments)?,
        )
    }

    /// Load `crops.toml`, `tools.toml`, `reforges.toml` and `enchantments.toml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::from_configs(
            load_toml(&dir.join("crops.toml"))?,
            load_toml(&dir.join("tools.toml"))?,
            load_toml(&dir.join("reforges.toml"))?,
            load_toml(&dir.join("enchantments.toml"))?,
        )
    }

    fn from_configs(
        crops: CropsConfig,
        tools: ToolsConfig,
        reforges: ReforgesConfig,
        enchantments: EnchantmentsConfig,
    ) -> Result<Self, ConfigError> {
        let mut tables = GameTables {
            turbo_fortune_per_level: enchantments.turbo.fortune_per_level,
            ..GameTables::default()
        };

        for special in crops.special_crops {
            insert_unique(&mut tables.special_crops, special.id.clone(), special, "special crop")?;
        }
        for info in crops.crops {
            if let Some(ref special) = info.special {
                if !tables.special_crops.contains_key(special) {
                    return Err(ConfigError::ValidationError(format!(
                        "crop '{}' refers to unknown special crop '{}'",
                        info.name, special
                    )));
                }
            }
            insert_unique(&mut tables.crops, info.crop, info, "crop")?;
        }
        if let Some(missing) = Crop::ALL.iter().find(|c| !tables.crops.contains_key(c)) {
            return Err(ConfigError::ValidationError(format!(
                "crop table is missing {}",
                missing
            )));
        }
        for dicer in crops.dicers {
            insert_unique(&mut tables.dicers, dicer.crop, dicer, "dicer")?;
        }

        for tool in tools.tools {
            insert_unique(&mut tables.tools, tool.id.clone(), tool, "tool")?;
        }
        for reforge in reforges.reforges {
            let id = reforge.id.to_ascii_lowercase();
            insert_unique(&mut tables.reforges, id, reforge, "reforge")?;
        }
        for enchant in enchantments.enchantments {
            insert_unique(&mut tables.enchantments, enchant.id.clone(), enchant, "enchantment")?;
        }
        for turbo in enchantments.turbo.enchantments {
            insert_unique(&mut tables.turbo_crops, turbo.id, turbo.crop, "turbo enchantment")?;
        }

        Ok(tables)
    }

    /// Crop row
    pub fn crop(&self, crop: Crop) -> Option<&CropInfo> {
        self.crops.get(&crop)
    }

    /// Special crop dropped while farming a crop
    pub fn special_crop(&self, crop: Crop) -> Option<&SpecialCropInfo> {
        self.crop(crop)
            .and_then(|info| info.special.as_ref())
            .and_then(|id| self.special_crops.get(id))
    }

    /// Dicer bonus rolls for a crop
    pub fn dicer(&self, crop: Crop) -> Option<&DicerInfo> {
        self.dicers.get(&crop)
    }

    /// Tool definition by item id
    pub fn tool(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.get(id)
    }

    /// Tools associated with a crop, sorted by id
    pub fn tools_for_crop(&self, crop: Crop) -> Vec<&ToolDefinition> {
        let mut tools: Vec<_> = self.tools.values().filter(|t| t.crop == crop).collect();
        tools.sort_by(|a, b| a.id.cmp(&b.id));
        tools
    }

    /// Reforge by id, case-insensitive
    pub fn reforge(&self, id: &str) -> Option<&ReforgeDefinition> {
        self.reforges.get(&id.to_ascii_lowercase())
    }

    /// Farming enchantment by id
    pub fn enchantment(&self, id: &str) -> Option<&EnchantmentDefinition> {
        self.enchantments.get(id)
    }

    /// Crop a turbo enchantment belongs to
    pub fn turbo_crop(&self, id: &str) -> Option<Crop> {
        self.turbo_crops.get(id).copied()
    }

    /// Fortune granted per turbo enchantment level
    pub fn turbo_fortune_per_level(&self) -> f64 {
        self.turbo_fortune_per_level
    }
}

fn insert_unique<K, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
    kind: &str,
) -> Result<(), ConfigError>
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
{
    if map.contains_key(&key) {
        return Err(ConfigError::ValidationError(format!(
            "duplicate {} {:?}",
            kind, key
        )));
    }
    map.insert(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_cover_every_crop() {
        let tables = GameTables::bundled();
        for crop in Crop::ALL {
            assert!(tables.crop(crop).is_some(), "Missing crop: {}", crop);
        }
    }

    #[test]
    fn test_bundled_tables_parse_without_fallback() {
        let tables =
            GameTables::from_toml_strs(CROPS_TOML, TOOLS_TOML, REFORGES_TOML, ENCHANTMENTS_TOML);
        assert!(tables.is_ok(), "{:?}", tables.err());
    }

    #[test]
    fn test_rarity_table_lookup() {
        let table = RarityTable {
            rare: Some(9.0),
            mythic: Some(20.0),
            ..RarityTable::default()
        };
        assert_eq!(table.get(Rarity::Rare), Some(9.0));
        assert_eq!(table.get(Rarity::Epic), None);
        assert_eq!(table.highest(), Some(20.0));
        assert_eq!(RarityTable::default().highest(), None);
    }

    #[test]
    fn test_reforge_lookup_is_case_insensitive() {
        let tables = GameTables::bundled();
        assert!(tables.reforge("Blessed").is_some());
        assert!(tables.reforge("BOUNTIFUL").is_some());
        assert!(tables.reforge("nonexistent").is_none());
    }

    #[test]
    fn test_missing_crop_fails_validation() {
        let crops = r#"
[[crops]]
crop = "wheat"
name = "Wheat"
npc = 6
drops = 1
max_fortune = 1634
"#;
        let result =
            GameTables::from_toml_strs(crops, TOOLS_TOML, REFORGES_TOML, ENCHANTMENTS_TOML);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_tool_fails_validation() {
        let tools = r#"
[[tools]]
id = "CACTUS_KNIFE"
name = "Cactus Knife"
crop = "cactus"
type = "other"

[[tools]]
id = "CACTUS_KNIFE"
name = "Cactus Knife"
crop = "cactus"
type = "other"
"#;
        let result =
            GameTables::from_toml_strs(CROPS_TOML, tools, REFORGES_TOML, ENCHANTMENTS_TOML);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_tools_for_crop() {
        let tools = GameTables::bundled().tools_for_crop(Crop::Wheat);
        assert_eq!(tools.len(), 3);
        assert!(tools.iter().all(|t| t.crop == Crop::Wheat));
    }

    #[test]
    fn test_turbo_mapping() {
        let tables = GameTables::bundled();
        assert_eq!(tables.turbo_crop("turbo_wheat"), Some(Crop::Wheat));
        assert_eq!(tables.turbo_crop("harvesting"), None);
        assert!((tables.turbo_fortune_per_level() - 5.0).abs() < f64::EPSILON);
    }
}
