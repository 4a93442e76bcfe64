//! Helpers for copying fixed-size list arrays into a row-major grid buffer.
use arrow_array::{Array, FixedSizeListArray, Float32Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseGridProviderError;

pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseGridProviderError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if field.is_nullable() || child.is_nullable() {
                return Err(DenseGridProviderError::NullableField {
                    column: column.to_owned(),
                    nullable_child: child.is_nullable(),
                });
            }
            if child.data_type() != &DataType::Float32 {
                return Err(DenseGridProviderError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            usize::try_from(*width)
                .map_err(|_| DenseGridProviderError::InvalidWidth { actual: *width })
        }
        other => Err(DenseGridProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn append_grid_rows(
    array: &FixedSizeListArray,
    expected_width: Option<usize>,
    start_row: usize,
    out: &mut Vec<f32>,
) -> Result<usize, DenseGridProviderError> {
    let width = validate_fixed_size_list(array)?;
    if let Some(expected) = expected_width.filter(|&expected| expected != width) {
        return Err(DenseGridProviderError::InconsistentBatchWidth {
            expected,
            actual: width,
        });
    }
    copy_rows(array, width, start_row, out)?;
    Ok(width)
}

pub(crate) fn validate_fixed_size_list(
    array: &FixedSizeListArray,
) -> Result<usize, DenseGridProviderError> {
    let value_type = array.value_type();
    if value_type != DataType::Float32 {
        return Err(DenseGridProviderError::InvalidListValueType { actual: value_type });
    }
    usize::try_from(array.value_length()).map_err(|_| DenseGridProviderError::InvalidWidth {
        actual: array.value_length(),
    })
}

pub(crate) fn copy_rows(
    array: &FixedSizeListArray,
    width: usize,
    start_row: usize,
    out: &mut Vec<f32>,
) -> Result<(), DenseGridProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(width)
        .ok_or(DenseGridProviderError::CapacityOverflow { rows, width })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let absolute_row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseGridProviderError::NullRow { row: absolute_row });
        }
        let row = array.value(row_index);
        let floats = row.as_any().downcast_ref::<Float32Array>().ok_or_else(|| {
            DenseGridProviderError::InvalidListValueType {
                actual: row.data_type().clone(),
            }
        })?;
        if floats.len() != width {
            return Err(DenseGridProviderError::InvalidRowLength {
                row: absolute_row,
                expected: width,
                actual: floats.len(),
            });
        }
        if let Some(col) = (0..width).find(|&col| floats.is_null(col)) {
            return Err(DenseGridProviderError::NullValue {
                row: absolute_row,
                col,
            });
        }
        out.extend_from_slice(floats.values());
    }
    Ok(())
}
