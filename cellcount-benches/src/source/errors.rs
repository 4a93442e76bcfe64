//! Error types for synthetic grid generation.

use cellcount_core::GridError;

/// Errors that may occur while preparing benchmark grids.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested grid side was zero.
    #[error("grid side must be greater than zero")]
    ZeroSide,
    /// The requested blob side was zero.
    #[error("blob side must be greater than zero")]
    ZeroBlobSide,
    /// A blob would not fit inside the grid.
    #[error("blob side ({blob_side}) must not exceed grid side ({side})")]
    BlobTooLarge {
        /// Requested blob side.
        blob_side: usize,
        /// Requested grid side.
        side: usize,
    },
    /// The lit-pixel probability was outside `[0, 1]` or NaN.
    #[error("density {density} must lie in [0, 1]")]
    InvalidDensity {
        /// Value supplied by the caller.
        density: f64,
    },
    /// The requested `side * side` overflowed `usize`.
    #[error("grid of side {side} overflows usize")]
    Overflow {
        /// Requested grid side.
        side: usize,
    },
    /// The generated buffer was rejected by the grid constructor.
    #[error(transparent)]
    Grid(#[from] GridError),
}
