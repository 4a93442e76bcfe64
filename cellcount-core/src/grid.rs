//! Square brightness grids stored as one row-major buffer.
//!
//! Pixel `(row, col)` of a grid with side `N` lives at flat index
//! `row * N + col`, the same addressing the labeler uses for disjoint-set
//! elements.

use crate::{error::GridError, source::GridSource};

/// An immutable `N×N` grid of finite brightness values.
///
/// # Examples
/// ```
/// use cellcount_core::Grid;
///
/// let grid = Grid::from_rows(&[[0.0, 0.5], [1.0, 0.25]])?;
/// assert_eq!(grid.side(), 2);
/// assert_eq!(grid.get(1, 0), Some(1.0));
/// assert_eq!(grid.get(2, 0), None);
/// # Ok::<(), cellcount_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    side: usize,
    values: Vec<f32>,
}

impl Grid {
    /// Builds a grid from a row-major buffer of `side * side` values.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`] when `side == 0`,
    /// [`GridError::CapacityOverflow`] when `side * side` overflows,
    /// [`GridError::LengthMismatch`] when the buffer has the wrong length and
    /// [`GridError::NonFiniteValue`] when a value is NaN or infinite.
    pub fn new(side: usize, values: Vec<f32>) -> Result<Self, GridError> {
        validate(side, &values)?;
        Ok(Self { side, values })
    }

    /// Builds a grid from equally sized rows; the row count must equal the
    /// row width.
    ///
    /// # Errors
    /// Returns [`GridError::Empty`] for no rows or empty rows,
    /// [`GridError::RaggedRow`] when widths differ,
    /// [`GridError::NotSquare`] when the row count differs from the width and
    /// [`GridError::NonFiniteValue`] for NaN or infinite values.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, GridError> {
        let (side, values) = flatten_square(rows)?;
        Self::new(side, values)
    }

    /// Builds a grid with every pixel set to `value`.
    ///
    /// # Errors
    /// Same conditions as [`Grid::new`].
    pub fn filled(side: usize, value: f32) -> Result<Self, GridError> {
        let len = side
            .checked_mul(side)
            .ok_or(GridError::CapacityOverflow { side })?;
        Self::new(side, vec![value; len])
    }

    /// Side length `N`.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of pixels, `N * N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major brightness values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Brightness at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.values.get(row * self.side + col).copied()
    }

    /// Rescales brightness into `[0, 1]` by subtracting the minimum and then
    /// dividing by the new maximum.
    ///
    /// A constant grid has no range to stretch and normalises to all zeros.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[[2.0, 4.0], [6.0, 10.0]])?;
    /// assert_eq!(grid.normalized().values(), &[0.0, 0.25, 0.5, 1.0]);
    /// # Ok::<(), cellcount_core::GridError>(())
    /// ```
    #[must_use]
    pub fn normalized(&self) -> Self {
        let min = f64::from(self.values.iter().copied().fold(f32::INFINITY, f32::min));
        let max = f64::from(self.values.iter().copied().fold(f32::NEG_INFINITY, f32::max));
        // Widened so spreads beyond `f32::MAX` stay finite.
        let range = max - min;
        let values = if range > 0.0 {
            self.values
                .iter()
                .map(|&value| ((f64::from(value) - min) / range) as f32)
                .collect()
        } else {
            vec![0.0; self.values.len()]
        };
        Self {
            side: self.side,
            values,
        }
    }
}

impl GridSource for Grid {
    fn name(&self) -> &str {
        "grid"
    }

    fn side(&self) -> usize {
        self.side
    }

    fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Checks that `values` describes a non-empty `side×side` grid of finite
/// brightness values.
pub(crate) fn validate(side: usize, values: &[f32]) -> Result<(), GridError> {
    check_shape(side, values.len())?;
    if let Some(index) = values.iter().position(|value| !value.is_finite()) {
        return Err(GridError::NonFiniteValue {
            row: index / side,
            col: index % side,
        });
    }
    Ok(())
}

pub(crate) fn check_shape(side: usize, len: usize) -> Result<(), GridError> {
    if side == 0 {
        return Err(GridError::Empty);
    }
    let expected = side
        .checked_mul(side)
        .ok_or(GridError::CapacityOverflow { side })?;
    if len != expected {
        return Err(GridError::LengthMismatch { side, len });
    }
    Ok(())
}

/// Concatenates equally sized rows into a row-major buffer, requiring as many
/// rows as each row has values.
pub(crate) fn flatten_square<T: Copy, R: AsRef<[T]>>(
    rows: &[R],
) -> Result<(usize, Vec<T>), GridError> {
    let Some(first) = rows.first() else {
        return Err(GridError::Empty);
    };
    let width = first.as_ref().len();
    if width == 0 {
        return Err(GridError::Empty);
    }

    let mut values = Vec::with_capacity(width.saturating_mul(rows.len()));
    for (row, values_in_row) in rows.iter().enumerate() {
        let values_in_row = values_in_row.as_ref();
        if values_in_row.len() != width {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                actual: values_in_row.len(),
            });
        }
        values.extend_from_slice(values_in_row);
    }

    if rows.len() != width {
        return Err(GridError::NotSquare {
            rows: rows.len(),
            columns: width,
        });
    }
    Ok((width, values))
}
