use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DenseGridProviderError {
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound { column: String },
    #[error("column `{column}` must be a FixedSizeList<Float32, _> but found {actual:?}")]
    InvalidColumnType { column: String, actual: DataType },
    #[error("FixedSizeList child type must be Float32 but found {actual:?}")]
    InvalidListValueType { actual: DataType },
    #[error("invalid FixedSizeList width {actual}")]
    InvalidWidth { actual: i32 },
    #[error("column `{column}` must be non-nullable (child nullable: {nullable_child})")]
    NullableField {
        column: String,
        nullable_child: bool,
    },
    #[error("row {row} is null")]
    NullRow { row: usize },
    #[error("row {row} contains null value at column {col}")]
    NullValue { row: usize, col: usize },
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("grid with {rows} rows of width {width} exceeds capacity limits")]
    CapacityOverflow { rows: usize, width: usize },
    #[error("inconsistent widths across batches: expected {expected}, got {actual}")]
    InconsistentBatchWidth { expected: usize, actual: usize },
    #[error("grid contains no rows")]
    EmptyGrid,
    #[error("grid must be square but has {rows} rows of width {width}")]
    NotSquare { rows: usize, width: usize },
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
