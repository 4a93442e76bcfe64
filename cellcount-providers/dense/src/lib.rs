//! Dense grid provider reading square brightness grids from Arrow and
//! Parquet.
//!
//! A grid is stored as one `FixedSizeList<Float32, N>` column holding `N`
//! rows, so every list is one row of the grid.

mod errors;
mod ingest;
mod provider;

pub use errors::DenseGridProviderError;
pub use provider::DenseGridProvider;

#[cfg(test)]
mod tests;
