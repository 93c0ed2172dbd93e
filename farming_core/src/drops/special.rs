//! Average special crop and dicer bonus drops

use crate::config::GameTables;
use crate::types::Crop;
use serde::Serialize;

/// Expected special crop drops over a number of breaks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialCropDrops {
    /// Special crop display name
    pub name: String,
    /// Expected amount, unrounded
    pub amount: f64,
    /// NPC price per unit
    pub npc: f64,
}

/// Matching armor pieces assumed when farming a crop
pub fn armor_pieces_for(crop: Crop) -> usize {
    match crop {
        Crop::Cactus => 3,
        _ => 4,
    }
}

/// Average special crops dropped while breaking `blocks_broken` blocks
pub fn average_special_crops(
    tables: &GameTables,
    crop: Crop,
    blocks_broken: f64,
    armor_pieces: usize,
) -> Option<SpecialCropDrops> {
    let special = tables.special_crop(crop)?;
    Some(SpecialCropDrops {
        name: special.name.clone(),
        amount: blocks_broken.max(0.0) * special.chance(armor_pieces),
        npc: special.npc,
    })
}

/// Average extra drops from dicer rolls, zero for crops without a dicer
pub fn dicer_bonus(tables: &GameTables, crop: Crop, blocks_broken: f64) -> f64 {
    tables
        .dicer(crop)
        .map(|dicer| blocks_broken.max(0.0) * dicer.drops_per_break())
        .unwrap_or(0.0)
}
