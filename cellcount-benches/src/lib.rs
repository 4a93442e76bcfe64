//! Benchmark support crate for cellcount.
//!
//! Provides seeded synthetic grids and parameter types used by the Criterion
//! benchmarks for the two labeling stages: connected-component labeling and
//! cluster centre extraction.

pub mod error;
pub mod params;
pub mod source;
