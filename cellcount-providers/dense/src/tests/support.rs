use super::{DenseGridProvider, DenseGridProviderError};
use crate::ingest::{append_grid_rows, validate_fixed_size_list_field};
use arrow_array::{Array, ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::convert::TryFrom;
use std::sync::Arc;

pub(crate) fn build_grid(rows: &[[f32; 3]]) -> FixedSizeListArray {
    let rows = rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
    build_list_array(&rows, 3, false)
}

pub(crate) fn build_list_array(
    rows: &[Vec<f32>],
    width: usize,
    child_nullable: bool,
) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == width));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, child_nullable)),
        i32::try_from(width).expect("width fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn brightness_field(width: usize, child_nullable: bool, list_nullable: bool) -> Field {
    Field::new(
        "brightness",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, child_nullable)),
            i32::try_from(width).expect("width fits in i32"),
        ),
        list_nullable,
    )
}

/// Mirrors the Parquet reader loop over in-memory batches, which may carry
/// different schemas.
pub(crate) fn try_from_record_batches(
    name: impl Into<String>,
    column: &str,
    batches: Vec<RecordBatch>,
) -> Result<DenseGridProvider, DenseGridProviderError> {
    let mut values = Vec::new();
    let mut rows = 0_usize;
    let mut width: Option<usize> = None;

    for batch in batches {
        let schema = batch.schema();
        let index = schema
            .index_of(column)
            .map_err(|_| DenseGridProviderError::ColumnNotFound {
                column: column.to_owned(),
            })?;
        let batch_width = validate_fixed_size_list_field(schema.field(index), column)?;
        if let Some(expected) = width.filter(|&expected| expected != batch_width) {
            return Err(DenseGridProviderError::InconsistentBatchWidth {
                expected,
                actual: batch_width,
            });
        }
        width = Some(batch_width);
        let column_array = batch.column(index);
        let list = column_array
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .ok_or_else(|| DenseGridProviderError::InvalidColumnType {
                column: column.to_owned(),
                actual: column_array.data_type().clone(),
            })?;
        append_grid_rows(list, width, rows, &mut values)?;
        rows += list.len();
    }

    DenseGridProvider::try_from_parts(name, rows, width.unwrap_or(0), values)
}

pub(crate) fn write_parquet(array: FixedSizeListArray) -> Bytes {
    let width = usize::try_from(array.value_length()).expect("width is non-negative");
    write_parquet_with_field(brightness_field(width, false, false), array)
}

pub(crate) fn write_parquet_with_field(field: Field, array: FixedSizeListArray) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field]));
    let batch =
        RecordBatch::try_new(schema.clone(), vec![Arc::new(array) as ArrayRef]).expect("batch");
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}
