//! Benchmark parameter types.

use std::fmt;

/// Parameters for a scattered-noise labeling run.
#[derive(Clone, Debug)]
pub struct NoiseBenchParams {
    /// Grid side length.
    pub side: usize,
    /// Probability that a pixel is lit.
    pub density: f64,
}

impl fmt::Display for NoiseBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},density={}", self.side, self.density)
    }
}

/// Parameters for a stamped-blob labeling run.
#[derive(Clone, Debug)]
pub struct BlobBenchParams {
    /// Grid side length.
    pub side: usize,
    /// Number of blobs stamped onto the grid.
    pub blob_count: usize,
}

impl fmt::Display for BlobBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side={},blobs={}", self.side, self.blob_count)
    }
}
