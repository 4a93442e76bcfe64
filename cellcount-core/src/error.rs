//! Error types for the cellcount core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DisjointSet`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// The structure was requested with zero elements.
    #[error("disjoint set must contain at least one element")]
    InvalidSize,
    /// An element index was outside `0..len`.
    #[error("element {index} is out of range for a disjoint set of {len} elements")]
    IndexOutOfRange {
        /// The offending element index.
        index: usize,
        /// Number of elements in the structure.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// The structure was requested with zero elements.
        InvalidSize => InvalidSize => "DISJOINT_SET_INVALID_SIZE",
        /// An element index was outside `0..len`.
        IndexOutOfRange => IndexOutOfRange { .. } => "DISJOINT_SET_INDEX_OUT_OF_RANGE",
    }
}

/// An error produced while constructing a [`crate::Grid`] or
/// [`crate::LabelGrid`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// The grid has no pixels.
    #[error("grid must contain at least one pixel")]
    Empty,
    /// A flat buffer did not hold `side * side` values.
    #[error("grid of side {side} needs {} values but {len} were given", side.saturating_mul(*side))]
    LengthMismatch {
        /// Requested side length.
        side: usize,
        /// Length of the supplied buffer.
        len: usize,
    },
    /// Row count and row width differ.
    #[error("grid must be square but has {rows} rows of {columns} values")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Width of the rows supplied.
        columns: usize,
    },
    /// A row did not match the width of the first row.
    #[error("row {row} has {actual} values but {expected} were expected")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// `side * side` does not fit in `usize`.
    #[error("grid of side {side} exceeds addressable capacity")]
    CapacityOverflow {
        /// Requested side length.
        side: usize,
    },
    /// A brightness value was NaN or infinite.
    #[error("pixel ({row}, {col}) is not a finite brightness value")]
    NonFiniteValue {
        /// Row of the offending pixel.
        row: usize,
        /// Column of the offending pixel.
        col: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The grid has no pixels.
        Empty => Empty => "GRID_EMPTY",
        /// A flat buffer did not hold `side * side` values.
        LengthMismatch => LengthMismatch { .. } => "GRID_LENGTH_MISMATCH",
        /// Row count and row width differ.
        NotSquare => NotSquare { .. } => "GRID_NOT_SQUARE",
        /// A row did not match the width of the first row.
        RaggedRow => RaggedRow { .. } => "GRID_RAGGED_ROW",
        /// `side * side` does not fit in `usize`.
        CapacityOverflow => CapacityOverflow { .. } => "GRID_CAPACITY_OVERFLOW",
        /// A brightness value was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "GRID_NON_FINITE_VALUE",
    }
}

/// Error type produced when configuring or running a [`crate::Labeler`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LabelError {
    /// The brightness threshold was NaN or infinite.
    #[error("threshold must be finite (got {threshold})")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f32,
    },
    /// The supplied [`crate::GridSource`] contained no pixels.
    #[error("grid source `{grid_source}` contains no pixels")]
    EmptySource {
        /// Identifier for the empty grid source.
        grid_source: Arc<str>,
    },
    /// The supplied [`crate::GridSource`] did not describe a valid grid.
    #[error("grid source `{grid_source}` is invalid: {error}")]
    Grid {
        /// Identifier for the offending grid source.
        grid_source: Arc<str>,
        /// Underlying grid validation failure.
        #[source]
        error: GridError,
    },
    /// A disjoint-set operation failed while labeling.
    #[error("disjoint-set operation failed: {error}")]
    DisjointSet {
        /// Underlying disjoint-set failure.
        #[from]
        error: DisjointSetError,
    },
    /// A label grid referenced a root id outside `0..side * side`.
    #[error("pixel ({row}, {col}) carries label {label} but labels must be below {capacity}")]
    LabelOutOfRange {
        /// Row of the offending pixel.
        row: usize,
        /// Column of the offending pixel.
        col: usize,
        /// The out-of-range label.
        label: usize,
        /// Exclusive upper bound on labels for this grid.
        capacity: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LabelError`] variants.
    enum LabelErrorCode for LabelError {
        /// The brightness threshold was NaN or infinite.
        InvalidThreshold => InvalidThreshold { .. } => "LABEL_INVALID_THRESHOLD",
        /// The supplied [`crate::GridSource`] contained no pixels.
        EmptySource => EmptySource { .. } => "LABEL_EMPTY_SOURCE",
        /// The supplied [`crate::GridSource`] did not describe a valid grid.
        InvalidGrid => Grid { .. } => "LABEL_INVALID_GRID",
        /// A disjoint-set operation failed while labeling.
        DisjointSetFailure => DisjointSet { .. } => "LABEL_DISJOINT_SET_FAILURE",
        /// A label grid referenced a root id outside `0..side * side`.
        LabelOutOfRange => LabelOutOfRange { .. } => "LABEL_OUT_OF_RANGE",
    }
}

impl LabelError {
    /// Retrieve the inner [`DisjointSetErrorCode`] when the error originated in
    /// a [`crate::DisjointSet`].
    #[must_use]
    pub const fn disjoint_set_code(&self) -> Option<DisjointSetErrorCode> {
        match self {
            Self::DisjointSet { error } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`GridErrorCode`] when the error originated in grid
    /// validation.
    #[must_use]
    pub const fn grid_code(&self) -> Option<GridErrorCode> {
        match self {
            Self::Grid { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LabelError>;
