//! Error types for swatcher-color

use swatcher_core::Region;
use thiserror::Error;

/// Errors that can occur during swatch analysis and composite building
#[derive(Debug, Error)]
pub enum SwatchError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] swatcher_core::Error),

    /// Invalid argument (unknown accuracy label, zero stride, zero tile size, n == 0)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The analyzed region does not fit inside the image
    #[error("region {region} outside {width}x{height} image")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },

    /// More swatches were requested than the tally holds
    #[error("requested {requested} swatches but only {available} colors were found")]
    OutOfRange { requested: usize, available: usize },

    /// The composite deadline passed before every tile was analyzed
    #[error("deadline exceeded after {completed} of {total} tiles")]
    DeadlineExceeded { completed: usize, total: usize },

    /// The composite has no tiles to render
    #[error("empty composite: tile size exceeds the image")]
    EmptyComposite,
}

/// Result type for swatch operations
pub type SwatchResult<T> = Result<T, SwatchError>;
