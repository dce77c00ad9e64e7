//! Error types for arplace

use thiserror::Error;

/// Main error type for arplace operations
///
/// Spatial input is racy by nature, so races and degenerate geometry never
/// surface here. Only configuration misuse does.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid scale limits: min {min}, max {max}")]
    InvalidLimits { min: f32, max: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for arplace operations
pub type Result<T> = std::result::Result<T, Error>;
