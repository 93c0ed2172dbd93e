//! Crop, special crop and dicer tables

use crate::types::Crop;
use serde::{Deserialize, Serialize};

/// Static data for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInfo {
    pub crop: Crop,
    /// Display name
    pub name: String,
    /// NPC sell price per unit, zero when the crop cannot be sold
    #[serde(default)]
    pub npc: f64,
    /// Average drops per block broken with zero fortune
    pub drops: f64,
    /// Breaks per block for crops stacked more than one block high
    #[serde(default)]
    pub breaks: Option<f64>,
    /// Whether replenish consumes one drop per block broken
    #[serde(default)]
    pub replenish: bool,
    /// Highest attainable farming fortune for this crop
    pub max_fortune: f64,
    /// Special crop id dropped while farming this crop
    #[serde(default)]
    pub special: Option<String>,
}

impl CropInfo {
    /// Breaks per block, defaulting to one
    pub fn breaks_per_block(&self) -> f64 {
        self.breaks.unwrap_or(1.0)
    }
}

/// A rare drop whose chance depends on matching armor pieces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialCropInfo {
    pub id: String,
    pub name: String,
    /// NPC sell price per unit
    pub npc: f64,
    /// Chance per break, indexed by the number of matching armor pieces
    pub chances: Vec<f64>,
}

impl SpecialCropInfo {
    /// Chance per break with the given number of armor pieces
    pub fn chance(&self, armor_pieces: usize) -> f64 {
        self.chances
            .get(armor_pieces)
            .or_else(|| self.chances.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// One possible dicer roll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DicerRoll {
    /// Chance per block broken
    pub chance: f64,
    /// Extra drops when the roll hits
    pub drops: f64,
}

/// Bonus drop rolls for a dicer crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DicerInfo {
    pub crop: Crop,
    /// Label used for the coin breakdown entry
    pub label: String,
    pub rolls: Vec<DicerRoll>,
}

impl DicerInfo {
    /// Expected extra drops per block broken
    pub fn drops_per_break(&self) -> f64 {
        self.rolls.iter().map(|r| r.chance * r.drops).sum()
    }
}

/// Container for crop configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropsConfig {
    pub crops: Vec<CropInfo>,
    #[serde(default)]
    pub special_crops: Vec<SpecialCropInfo>,
    #[serde(default)]
    pub dicers: Vec<DicerInfo>,
}
