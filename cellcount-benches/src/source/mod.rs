//! Synthetic brightness grids for benchmarking.
//!
//! Two generators are provided: scattered noise, where every pixel is lit
//! independently, and stamped blobs, where square patches of bright pixels
//! are placed on a dark background. Both are seeded so that repeated runs
//! label identical inputs.

mod errors;

pub use errors::SyntheticError;

use cellcount_core::{Grid, GridSource};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Brightness assigned to dark pixels.
const DARK: f32 = 0.0;

/// Range that lit pixels draw their brightness from.
const LIT: std::ops::Range<f32> = 0.6..1.0;

/// Configuration for scattered-noise grids.
#[derive(Clone, Debug)]
pub struct SyntheticGridConfig {
    /// Side length of the generated grid.
    pub side: usize,
    /// Probability that any one pixel is lit, in `[0, 1]`.
    pub density: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Configuration for stamped-blob grids.
#[derive(Clone, Debug)]
pub struct BlobGridConfig {
    /// Side length of the generated grid.
    pub side: usize,
    /// Number of blobs to stamp. Blobs may overlap.
    pub blob_count: usize,
    /// Side length of each square blob.
    pub blob_side: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A seeded synthetic [`GridSource`].
#[derive(Clone, Debug)]
pub struct SyntheticGrid {
    name: &'static str,
    grid: Grid,
}

impl SyntheticGrid {
    /// Generates a grid where each pixel is lit with probability
    /// `config.density`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticGridConfig) -> Result<Self, SyntheticError> {
        if !(0.0..=1.0).contains(&config.density) {
            return Err(SyntheticError::InvalidDensity {
                density: config.density,
            });
        }
        let total = checked_total(config.side)?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let values = (0..total)
            .map(|_| {
                if rng.gen_bool(config.density) {
                    rng.gen_range(LIT)
                } else {
                    DARK
                }
            })
            .collect();

        Self::from_parts("synthetic-noise", config.side, values)
    }

    /// Generates a dark grid with `config.blob_count` square blobs stamped at
    /// random positions.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate_blobs(config: &BlobGridConfig) -> Result<Self, SyntheticError> {
        if config.blob_side == 0 {
            return Err(SyntheticError::ZeroBlobSide);
        }
        if config.blob_side > config.side {
            return Err(SyntheticError::BlobTooLarge {
                blob_side: config.blob_side,
                side: config.side,
            });
        }
        let total = checked_total(config.side)?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut values = vec![DARK; total];
        let span = config.side - config.blob_side;
        for _ in 0..config.blob_count {
            let top = rng.gen_range(0..=span);
            let left = rng.gen_range(0..=span);
            for row in top..top + config.blob_side {
                for col in left..left + config.blob_side {
                    if let Some(value) = values.get_mut(row * config.side + col) {
                        *value = rng.gen_range(LIT);
                    }
                }
            }
        }

        Self::from_parts("synthetic-blobs", config.side, values)
    }

    fn from_parts(
        name: &'static str,
        side: usize,
        values: Vec<f32>,
    ) -> Result<Self, SyntheticError> {
        let grid = Grid::new(side, values)?;
        Ok(Self { name, grid })
    }

    /// Returns the generated grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl GridSource for SyntheticGrid {
    fn name(&self) -> &str {
        self.name
    }

    fn side(&self) -> usize {
        self.grid.side()
    }

    fn values(&self) -> &[f32] {
        self.grid.values()
    }
}

fn checked_total(side: usize) -> Result<usize, SyntheticError> {
    if side == 0 {
        return Err(SyntheticError::ZeroSide);
    }
    side.checked_mul(side).ok_or(SyntheticError::Overflow { side })
}
