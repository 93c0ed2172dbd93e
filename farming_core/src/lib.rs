//! farming_core - Farming fortune and expected crop yield calculations
//!
//! This library provides:
//! - FortuneSource pipeline: total farming fortune of a tool with a labeled breakdown
//! - Yield model: expected collection and NPC income per crop
//! - GameTables: crop, tool, reforge and enchantment tables loaded from TOML
//!
//! Everything is a pure function of an item snapshot, the player context and
//! the static tables; results are rebuilt on every call.

pub mod breakdown;
pub mod config;
pub mod drops;
pub mod error;
pub mod fortune;
pub mod item;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use breakdown::Breakdown;
pub use config::{ConfigError, GameTables};
pub use drops::{
    average_drops_all_crops, detailed_average_drops_all_crops, detailed_drops, expected_drops,
    fortune_required_for_collection, npc_profit, try_fortune_required_for_collection,
    DetailedDropsResult, FortuneRequiredOptions, YieldOptions,
};
pub use error::FarmingError;
pub use fortune::{
    compute_fortune, compute_fortune_with_sources, compute_item_fortune, FarmingTool,
    FortuneResult, FortuneSource,
};
pub use item::{ItemSnapshot, PlayerOptions};
pub use types::{Crop, Rarity, ToolType};
