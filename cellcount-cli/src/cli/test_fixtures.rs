//! Test fixture builders for CLI tests.
//!
//! Writes small grids to temporary files so the ingestion paths run without
//! external fixtures.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

/// Row-major 3×3 grid with one bright pair in the top row, a bright pixel on
/// the left edge and a bright bottom-right corner.
pub(super) const PLATE: [f32; 9] = [0.9, 0.9, 0.1, 0.1, 0.1, 0.1, 0.8, 0.1, 0.9];

/// [`PLATE`] as text, mixing separators and a comment line.
pub(super) const PLATE_TEXT: &str = "# plate\n0.9, 0.9, 0.1\n0.1 0.1 0.1\n0.8\t0.1 0.9\n";

/// Creates a Parquet file holding [`PLATE`] in a `brightness:
/// FixedSizeList<Float32, 3>` column.
///
/// # Errors
/// Returns an error when the file cannot be created or the Parquet writer
/// fails to write the batch.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let schema = build_schema();
    let batch = build_record_batch(schema.clone())?;
    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

fn item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float32, false))
}

fn build_schema() -> Arc<Schema> {
    let list_type = DataType::FixedSizeList(item_field(), 3);
    Arc::new(Schema::new(vec![Field::new("brightness", list_type, false)]))
}

fn build_record_batch(schema: Arc<Schema>) -> Result<RecordBatch, arrow_schema::ArrowError> {
    let values = Float32Array::from(PLATE.to_vec());
    let list = FixedSizeListArray::new(item_field(), 3, Arc::new(values) as ArrayRef, None);
    RecordBatch::try_new(schema, vec![Arc::new(list) as ArrayRef])
}
