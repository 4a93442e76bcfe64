//! Command-line interface orchestration for the cellcount labeler.
//!
//! The `run` command loads a square brightness grid from a Parquet column or
//! a text file, labels its bright components and reports each cluster centre.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, LabelView, ParquetArgs, RunCommand, RunSource,
    TextArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
