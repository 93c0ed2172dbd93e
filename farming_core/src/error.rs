//! Error types for fortune and yield calculations

use crate::config::ConfigError;
use thiserror::Error;

/// Failures surfaced by the calculation entry points.
///
/// Almost every missing or malformed input degrades to a zero contribution;
/// only an unclassifiable tool is a hard failure.
#[derive(Error, Debug)]
pub enum FarmingError {
    #[error("Unknown farming tool: {0}")]
    UnknownTool(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
