//! tilesnap - keyboard-driven window snapping
//!
//! Maps global hotkeys to tile actions (halves, thirds, quarters, maximize)
//! and turns each action into an outer window frame that lines the window's
//! visible edges up with a slice of the monitor's work area.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod platform;
pub mod services;

pub use models::*;
pub use services::*;

/// Result type alias for tilesnap operations
pub type Result<T> = anyhow::Result<T>;

/// Errors surfaced at the application boundary
#[derive(thiserror::Error, Debug)]
pub enum TileSnapError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Platform error: {0}")]
    PlatformError(String),
}
