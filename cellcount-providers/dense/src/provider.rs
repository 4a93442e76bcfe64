//! Dense grid provider implementation and ingestion utilities.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};

use cellcount_core::{Grid, GridError, GridSource};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use tracing::debug;

use crate::errors::DenseGridProviderError;
use crate::ingest::{append_grid_rows, validate_fixed_size_list_field};

/// Square brightness grid backed by a contiguous row-major buffer.
#[derive(Debug)]
pub struct DenseGridProvider {
    name: String,
    side: usize,
    values: Vec<f32>,
}

impl DenseGridProvider {
    /// Checks that `rows` lists of `width` values form a non-empty square.
    pub(crate) fn try_from_parts(
        name: impl Into<String>,
        rows: usize,
        width: usize,
        values: Vec<f32>,
    ) -> Result<Self, DenseGridProviderError> {
        if rows == 0 || width == 0 {
            return Err(DenseGridProviderError::EmptyGrid);
        }
        if rows != width {
            return Err(DenseGridProviderError::NotSquare { rows, width });
        }
        debug_assert_eq!(values.len(), rows.saturating_mul(width));
        Ok(Self {
            name: name.into(),
            side: rows,
            values,
        })
    }

    /// Loads a grid from an Arrow [`FixedSizeListArray`], one list per row.
    ///
    /// # Errors
    /// Returns [`DenseGridProviderError::NullRow`] or
    /// [`DenseGridProviderError::NullValue`] for nulls,
    /// [`DenseGridProviderError::InvalidListValueType`] for non-float
    /// children and [`DenseGridProviderError::NotSquare`] when the row count
    /// differs from the list width.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseGridProviderError> {
        let mut values = Vec::new();
        let width = append_grid_rows(array, None, 0, &mut values)?;
        Self::try_from_parts(name, array.len(), width, values)
    }

    /// Loads a grid from a Parquet column containing `FixedSizeList<Float32, N>` rows.
    ///
    /// # Errors
    /// Returns [`DenseGridProviderError::Io`] when the file cannot be opened
    /// and otherwise the same conditions as
    /// [`DenseGridProvider::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseGridProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads a grid from a Parquet reader.
    ///
    /// # Errors
    /// Returns [`DenseGridProviderError::ColumnNotFound`] for unknown columns,
    /// [`DenseGridProviderError::NullableField`] for nullable schemas and
    /// propagates Parquet decoding and grid shape failures.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseGridProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseGridProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let field = schema.field(column_index);
        let width = validate_fixed_size_list_field(field, column)?;
        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in reader {
            let batch = batch?;
            let column_array = batch.column(column_index);
            let list = column_array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseGridProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: column_array.data_type().clone(),
                })?;
            append_grid_rows(list, Some(width), rows, &mut values)?;
            rows += list.len();
        }
        debug!(column, rows, width, "parquet grid loaded");
        Self::try_from_parts(name, rows, width, values)
    }

    /// Side length `N` of the grid.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major brightness values.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.values
    }

    /// Converts the provider into a validated [`Grid`].
    ///
    /// # Errors
    /// Returns [`GridError::NonFiniteValue`] when the column held NaN or
    /// infinite values.
    pub fn into_grid(self) -> Result<Grid, GridError> {
        Grid::new(self.side, self.values)
    }
}

impl GridSource for DenseGridProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> usize {
        self.side
    }

    fn values(&self) -> &[f32] {
        &self.values
    }
}
