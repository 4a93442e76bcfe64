//! Command implementations and argument parsing for the cellcount CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use cellcount_core::{Detection, GridSource, LabelError, Labeler, LabelerBuilder};
use cellcount_providers_dense::{DenseGridProvider, DenseGridProviderError};
use cellcount_providers_text::{TextGridProvider, TextGridProviderError};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_THRESHOLD: f32 = 0.7;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cellcount",
    about = "Count bright clusters in square brightness grids."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Label a grid and print the centre of every cluster.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Pixels must be strictly brighter than this value to form clusters.
    #[arg(
        long,
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(f32),
    )]
    pub threshold: f32,

    /// Rescale brightness into `[0, 1]` before applying the threshold.
    #[arg(long)]
    pub normalize: bool,

    /// Print the per-pixel label grid after the cluster centres.
    #[arg(long)]
    pub labels: bool,

    /// Print labels mapped through `l^31 mod 833`; implies `--labels`.
    #[arg(long = "shuffle-labels")]
    pub shuffle_labels: bool,

    /// Grid source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

impl RunCommand {
    fn label_view(&self) -> LabelView {
        if self.shuffle_labels {
            LabelView::Shuffled
        } else if self.labels {
            LabelView::Raw
        } else {
            LabelView::Hidden
        }
    }
}

/// Input grid sources.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read a Parquet file whose column holds one `FixedSizeList<Float32, N>` per grid row.
    Parquet(ParquetArgs),
    /// Read a text file with one grid row per line.
    Text(TextArgs),
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<Float32, N>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the grid source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// Path to a UTF-8 text file, values separated by whitespace or commas.
    pub path: PathBuf,

    /// Override name for the grid source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// How the label grid is rendered after the cluster centres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelView {
    /// Labels are not printed.
    #[default]
    Hidden,
    /// Labels are printed as root ids.
    Raw,
    /// Labels are printed as `l^31 mod 833`.
    Shuffled,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Parquet grid ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseGridProviderError),
    /// Text grid ingestion failed.
    #[error(transparent)]
    Text(#[from] TextGridProviderError),
    /// Configuration or labeling failed.
    #[error(transparent)]
    Core(#[from] LabelError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the grid source.
    pub grid_source: String,
    /// Labels and cluster centres produced by the labeler.
    pub detection: Detection,
    /// How [`render_summary`] prints the label grid.
    pub label_view: LabelView,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the grid or labeling fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cellcount_cli::cli::{Cli, Command, RunCommand, RunSource, TextArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0.9 0.9\n0.0 0.0\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         threshold: 0.5,
///         normalize: false,
///         labels: false,
///         shuffle_labels: false,
///         source: RunSource::Text(TextArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.detection.cluster_count(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(threshold = field::Empty, normalize = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let labeler = LabelerBuilder::new()
        .with_threshold(command.threshold)
        .with_normalization(command.normalize)
        .build()?;

    let span = Span::current();
    span.record("threshold", field::display(command.threshold));
    span.record("normalize", command.normalize);

    let label_view = command.label_view();
    let (grid_source, detection) = match command.source {
        RunSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            run_parquet(&labeler, args)?
        }
        RunSource::Text(args) => {
            span.record("source", field::display("text"));
            run_text(&labeler, args)?
        }
    };

    info!(
        grid_source = grid_source.as_str(),
        clusters = detection.cluster_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        grid_source,
        detection,
        label_view,
    })
}

#[instrument(
    name = "cli.run_parquet",
    err,
    skip(labeler, args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_parquet(
    labeler: &Labeler,
    args: ParquetArgs,
) -> Result<(String, Detection), CliError> {
    let ParquetArgs { path, column, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_grid_source_name(&path, name.as_deref());
    let provider = DenseGridProvider::try_from_parquet_path(chosen_name, &path, &column)?;
    let detection = labeler.run(&provider)?;
    info!(
        grid_source = provider.name(),
        side = provider.side(),
        clusters = detection.cluster_count(),
        "parquet execution completed"
    );
    Ok((provider.name().to_owned(), detection))
}

#[instrument(
    name = "cli.run_text",
    err,
    skip(labeler, args),
    fields(path = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_text(
    labeler: &Labeler,
    args: TextArgs,
) -> Result<(String, Detection), CliError> {
    let TextArgs { path, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_grid_source_name(&path, name.as_deref());
    let reader = open_text_reader(&path)?;
    let provider = TextGridProvider::try_from_reader(chosen_name, reader)?;
    let detection = labeler.run(&provider)?;
    info!(
        grid_source = provider.name(),
        side = provider.side(),
        clusters = detection.cluster_count(),
        "text execution completed"
    );
    Ok((provider.name().to_owned(), detection))
}

#[instrument(name = "cli.open_text_reader", err, fields(path = field::Empty))]
pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_grid_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "grid_source".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// The header names the grid source, its side and the cluster count; one
/// tab-separated `row\tcol` line per cluster centre follows. Depending on
/// [`ExecutionSummary::label_view`], the label grid is appended as
/// tab-separated rows.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cellcount_cli::cli::{ExecutionSummary, LabelView, render_summary};
/// # use cellcount_core::{Grid, LabelerBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let grid = Grid::from_rows(&[[0.9, 0.9], [0.0, 0.0]])?;
/// let detection = LabelerBuilder::new().build()?.run(&grid)?;
/// let summary = ExecutionSummary {
///     grid_source: "demo".into(),
///     detection,
///     label_view: LabelView::Raw,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "grid source: demo\nside: 2\nclusters: 1\n0\t0\nlabels:\n1\t1\n2\t3\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let labels = summary.detection.labels();
    writeln!(writer, "grid source: {}", summary.grid_source)?;
    writeln!(writer, "side: {}", labels.side())?;
    writeln!(writer, "clusters: {}", summary.detection.cluster_count())?;
    for centroid in summary.detection.centroids() {
        writeln!(writer, "{}\t{}", centroid.row(), centroid.col())?;
    }

    let values = match summary.label_view {
        LabelView::Hidden => return Ok(()),
        LabelView::Raw => labels.labels().to_vec(),
        LabelView::Shuffled => labels.shuffled(),
    };
    writeln!(writer, "labels:")?;
    for row in values.chunks(labels.side()) {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
