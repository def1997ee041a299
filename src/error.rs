//! Crate error type

use thiserror::Error;

/// Errors raised while setting up a round or loading configuration.
///
/// Nothing in the per-frame loop returns these; `tick` is total.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// Screen dimensions were zero or negative
    #[error("invalid screen dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Derived grid has no interior even after the fallback tile size
    #[error("grid too small: {rows}x{columns} tiles at {tile_size}px")]
    GridTooSmall {
        rows: i32,
        columns: i32,
        tile_size: i32,
    },

    /// A textual layout could not be parsed
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Settings JSON could not be parsed
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
