//! Text provider reading square brightness grids from line-based UTF-8.
//!
//! Each non-blank line is one grid row. Values are separated by whitespace,
//! commas or both, and lines whose first non-blank character is `#` are
//! comments.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use cellcount_core::{Grid, GridError, GridSource};
use thiserror::Error;

/// Errors raised while parsing a text grid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextGridProviderError {
    /// The input held no rows.
    #[error("input contains no grid rows")]
    EmptyInput,
    /// A token was not a number.
    #[error("line {line}, value {position}: `{token}` is not a number")]
    InvalidValue {
        /// One-based input line.
        line: usize,
        /// One-based position of the token within its row.
        position: usize,
        /// The offending token.
        token: String,
    },
    /// A row's width differs from the first row's.
    #[error("line {line} has {actual} values but {expected} were expected")]
    RaggedRow {
        /// One-based input line.
        line: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// The row count differs from the row width.
    #[error("grid must be square but has {rows} rows of width {width}")]
    NotSquare {
        /// Number of rows read.
        rows: usize,
        /// Width of every row.
        width: usize,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Square brightness grid parsed from text.
#[derive(Debug)]
pub struct TextGridProvider {
    name: String,
    side: usize,
    values: Vec<f32>,
}

impl TextGridProvider {
    /// Parses a grid from a buffered reader.
    ///
    /// # Errors
    /// Returns [`TextGridProviderError::EmptyInput`] when no rows are present,
    /// [`TextGridProviderError::InvalidValue`] for tokens that do not parse as
    /// `f32`, [`TextGridProviderError::RaggedRow`] and
    /// [`TextGridProviderError::NotSquare`] for malformed shapes, and
    /// [`TextGridProviderError::Io`] when reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use cellcount_core::GridSource;
    /// use cellcount_providers_text::TextGridProvider;
    ///
    /// let text = "# plate 7\n0.1, 0.9\n0.8 0.2\n";
    /// let provider = TextGridProvider::try_from_reader("plate", Cursor::new(text))?;
    /// assert_eq!(provider.side(), 2);
    /// assert_eq!(provider.values(), &[0.1, 0.9, 0.8, 0.2]);
    /// # Ok::<(), cellcount_providers_text::TextGridProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextGridProviderError> {
        let mut values = Vec::new();
        let mut rows = 0_usize;
        let mut width: Option<usize> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let line_number = index + 1;
            let before = values.len();
            parse_row(trimmed, line_number, &mut values)?;
            let actual = values.len() - before;
            match width {
                Some(expected) if expected != actual => {
                    return Err(TextGridProviderError::RaggedRow {
                        line: line_number,
                        expected,
                        actual,
                    });
                }
                Some(_) => {}
                None => width = Some(actual),
            }
            rows += 1;
        }

        let Some(width) = width else {
            return Err(TextGridProviderError::EmptyInput);
        };
        if rows != width {
            return Err(TextGridProviderError::NotSquare { rows, width });
        }
        Ok(Self {
            name: name.into(),
            side: width,
            values,
        })
    }

    /// Parses a grid from a file.
    ///
    /// # Errors
    /// Returns [`TextGridProviderError::Io`] when the file cannot be opened
    /// and otherwise the same conditions as
    /// [`TextGridProvider::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextGridProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Converts the provider into a validated [`Grid`].
    ///
    /// # Errors
    /// Returns [`GridError::NonFiniteValue`] for `NaN` or `inf` tokens, which
    /// parse as `f32` but are not brightness values.
    pub fn into_grid(self) -> Result<Grid, GridError> {
        Grid::new(self.side, self.values)
    }
}

fn parse_row(
    line: &str,
    line_number: usize,
    out: &mut Vec<f32>,
) -> Result<(), TextGridProviderError> {
    let tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    for (position, token) in tokens.enumerate() {
        let value = token
            .parse::<f32>()
            .map_err(|_| TextGridProviderError::InvalidValue {
                line: line_number,
                position: position + 1,
                token: token.to_owned(),
            })?;
        out.push(value);
    }
    Ok(())
}

impl GridSource for TextGridProvider {
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
