//! Shared test utilities used across cellcount crates.

pub mod profile;
pub mod tracing;
