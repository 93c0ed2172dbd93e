//! Prelude module for convenient imports
//!
//! ```rust
//! use farming_core::prelude::*;
//! ```

// Core types
pub use crate::breakdown::Breakdown;
pub use crate::item::{ItemSnapshot, PlayerOptions};
pub use crate::types::{Crop, Rarity, ToolType};

// Fortune
pub use crate::fortune::{
    compute_fortune, compute_item_fortune, FarmingTool, FortuneResult, FortuneSource,
};

// Yield model
pub use crate::drops::{
    detailed_drops, expected_drops, fortune_required_for_collection, DetailedDropsResult,
    FortuneRequiredOptions, YieldOptions,
};

// Config
pub use crate::config::GameTables;

// Errors
pub use crate::error::FarmingError;
