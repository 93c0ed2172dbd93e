//! Enchantment tables, including the crop-specific turbo family

use crate::types::Crop;
use serde::{Deserialize, Serialize};

/// Enchantment id whose bonus scales with the crop milestone
pub const DEDICATION: &str = "dedication";

/// A farming enchantment with per-level fortune rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentDefinition {
    pub id: String,
    pub name: String,
    /// Flat fortune, index 0 = level 1
    #[serde(default)]
    pub fortune: Vec<f64>,
    /// Fortune per milestone, index 0 = level 1
    #[serde(default)]
    pub multiplied_fortune: Vec<f64>,
}

impl EnchantmentDefinition {
    /// Flat fortune defined at exactly this level
    pub fn fortune_at(&self, level: u32) -> Option<f64> {
        level_entry(&self.fortune, level)
    }

    /// Milestone multiplier defined at exactly this level
    pub fn multiplier_at(&self, level: u32) -> Option<f64> {
        level_entry(&self.multiplied_fortune, level)
    }
}

fn level_entry(rows: &[f64], level: u32) -> Option<f64> {
    let index = usize::try_from(level).ok()?.checked_sub(1)?;
    rows.get(index).copied()
}

/// A turbo enchantment and the crop it boosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurboEnchant {
    pub id: String,
    pub crop: Crop,
}

/// The turbo enchantment family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurboConfig {
    pub fortune_per_level: f64,
    #[serde(default)]
    pub enchantments: Vec<TurboEnchant>,
}

/// Container for enchantment configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnchantmentsConfig {
    #[serde(default)]
    pub enchantments: Vec<EnchantmentDefinition>,
    pub turbo: TurboConfig,
}
