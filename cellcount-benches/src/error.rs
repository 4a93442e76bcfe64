//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! that setup functions can propagate failures with `?`.

use crate::source::SyntheticError;
use cellcount_core::LabelError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic grid generation failed.
    #[error("synthetic grid generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Labeler configuration or labeling failed.
    #[error("labeling failed: {0}")]
    Label(#[from] LabelError),
}
