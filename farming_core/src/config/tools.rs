//! Farming tool definitions

use super::RarityTable;
use crate::types::{Crop, ToolType};
use serde::{Deserialize, Serialize};

/// Static data for one farming tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Game item id
    pub id: String,
    pub name: String,
    pub crop: Crop,
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    /// Flat farming fortune granted by the tool itself
    #[serde(default)]
    pub fortune: f64,
    /// Farming fortune granted per rarity
    #[serde(default)]
    pub rarity_fortune: RarityTable,
}

/// Container for tool configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub tools: Vec<ToolDefinition>,
}
