//! Per-pixel component labels produced by the labeler.

use std::collections::HashSet;

use crate::{
    error::GridError,
    grid::{check_shape, flatten_square},
};

/// Exponent and modulus used by [`LabelGrid::shuffled`].
const SHUFFLE_EXPONENT: u32 = 31;
const SHUFFLE_MODULUS: u64 = 833;

/// An `N×N` grid of disjoint-set root ids, one per pixel, stored row-major.
///
/// Pixels share a label exactly when the labeler placed them in the same
/// component. Labels are flat pixel indices and therefore lie in `0..N * N`
/// for grids produced by [`crate::label`].
///
/// # Examples
/// ```
/// use cellcount_core::LabelGrid;
///
/// let labels = LabelGrid::from_rows(&[[1, 1], [2, 3]])?;
/// assert_eq!(labels.get(0, 0), Some(1));
/// assert_eq!(labels.component_count(), 3);
/// # Ok::<(), cellcount_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    side: usize,
    labels: Vec<usize>,
}

impl LabelGrid {
    /// Builds a label grid from a row-major buffer of `side * side` labels.
    ///
    /// Label values are not range-checked here; [`crate::cluster_centers`]
    /// rejects labels outside `0..side * side`.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`], [`GridError::CapacityOverflow`] or
    /// [`GridError::LengthMismatch`] when the buffer does not describe a
    /// non-empty square grid.
    pub fn new(side: usize, labels: Vec<usize>) -> Result<Self, GridError> {
        check_shape(side, labels.len())?;
        Ok(Self { side, labels })
    }

    /// Builds a label grid from equally sized rows.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`], [`GridError::RaggedRow`] or
    /// [`GridError::NotSquare`] when the rows do not form a square.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self, GridError> {
        let (side, labels) = flatten_square(rows)?;
        Self::new(side, labels)
    }

    pub(crate) fn from_parts(side: usize, labels: Vec<usize>) -> Self {
        debug_assert_eq!(labels.len(), side.saturating_mul(side));
        Self { side, labels }
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of pixels, `N * N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row-major labels.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.labels.get(row * self.side + col).copied()
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.labels.chunks(self.side)
    }

    /// Number of distinct labels, singletons included.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.labels.iter().collect::<HashSet<_>>().len()
    }

    /// Maps every label `l` to `l^31 mod 833`.
    ///
    /// Equal labels stay equal, while neighbouring root ids scatter across
    /// the output range, which makes adjacent components easier to tell apart
    /// when the grid is rendered. The mapping is not injective, so distinct
    /// components may collide; use it for display only.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::LabelGrid;
    ///
    /// let labels = LabelGrid::from_rows(&[[0, 1], [2, 2]])?;
    /// assert_eq!(labels.shuffled(), vec![0, 1, 485, 485]);
    /// # Ok::<(), cellcount_core::GridError>(())
    /// ```
    #[must_use]
    pub fn shuffled(&self) -> Vec<usize> {
        self.labels.iter().map(|&label| shuffle_label(label)).collect()
    }
}

fn shuffle_label(label: usize) -> usize {
    let modulus = SHUFFLE_MODULUS;
    let mut base = u64::try_from(label).map_or(0, |value| value % modulus);
    let mut exponent = SHUFFLE_EXPONENT;
    let mut result = 1_u64;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }
    // The result is below the modulus, which always fits in usize.
    usize::try_from(result).unwrap_or_default()
}
