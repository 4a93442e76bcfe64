//! Connected-component labeling of bright pixels.
//!
//! Labeling runs in three sequential stages:
//!
//! - A union pass visits every pixel `(row, col)` with `row < N - 1` and
//!   `col < N - 1`. When the pixel is brighter than the threshold it is merged
//!   with its lower neighbour and then its right neighbour, each only if that
//!   neighbour is also brighter. The last row and last column never start a
//!   pair but still join components as the lower or right member, so the
//!   bottom-right pixel always stays a singleton.
//! - Every pixel of the full grid is resolved to its disjoint-set root, giving
//!   a [`LabelGrid`].
//! - Pixels are grouped by root; each group of at least two pixels yields the
//!   truncated mean of its rows and columns as a [`Centroid`], in ascending
//!   root-id order. Singletons are noise and are dropped.
//!
//! Comparisons are strict, so pixels exactly at the threshold never merge.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    disjoint_set::DisjointSet,
    error::LabelError,
    grid::{self, Grid},
    label_grid::LabelGrid,
    result::{Centroid, Detection},
    source::GridSource,
};

/// Smallest component reported as a cluster.
const MIN_CLUSTER_PIXELS: usize = 2;

/// Labels the connected bright components of `grid`.
///
/// Every pixel receives the flat index of its component's root; see the
/// module documentation for the exact neighbour scan.
///
/// # Errors
/// Returns [`LabelError::DisjointSet`] if the union pass fails, which only
/// happens for grids that do not hold `side * side` pixels.
///
/// # Examples
/// ```
/// use cellcount_core::{Grid, label};
///
/// let grid = Grid::from_rows(&[[1.0, 1.0], [0.0, 0.0]])?;
/// let labels = label(&grid, 0.5)?;
/// assert_eq!(labels.get(0, 0), labels.get(0, 1));
/// assert_ne!(labels.get(1, 0), labels.get(0, 0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn label(grid: &Grid, threshold: f32) -> Result<LabelGrid> {
    label_pixels(grid.side(), grid.values(), threshold).map(|(labels, _)| labels)
}

/// Computes the centroid of every component with at least two pixels.
///
/// Centroids are `(sum of rows / count, sum of cols / count)` with truncating
/// division, returned in ascending order of root id.
///
/// # Errors
/// Returns [`LabelError::LabelOutOfRange`] when a label is not below
/// `side * side`.
///
/// # Examples
/// ```
/// use cellcount_core::{Centroid, LabelGrid, cluster_centers};
///
/// let labels = LabelGrid::from_rows(&[[1, 1, 2], [3, 4, 5], [6, 7, 8]])?;
/// assert_eq!(cluster_centers(&labels)?, vec![Centroid::new(0, 0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.cluster_centers",
    level = "debug",
    err,
    skip(labels),
    fields(side = labels.side())
)]
pub fn cluster_centers(labels: &LabelGrid) -> Result<Vec<Centroid>> {
    let side = labels.side();
    let capacity = labels.len();
    let mut groups = vec![Accumulator::default(); capacity];

    for (index, &root) in labels.labels().iter().enumerate() {
        let (row, col) = (index / side, index % side);
        let group = groups.get_mut(root).ok_or(LabelError::LabelOutOfRange {
            row,
            col,
            label: root,
            capacity,
        })?;
        group.add(row, col);
    }

    let centroids: Vec<Centroid> = groups.iter().filter_map(Accumulator::centroid).collect();
    debug!(clusters = centroids.len(), "cluster centres extracted");
    Ok(centroids)
}

/// Running sums for one component.
#[derive(Clone, Copy, Default)]
struct Accumulator {
    count: usize,
    row_sum: usize,
    col_sum: usize,
}

impl Accumulator {
    fn add(&mut self, row: usize, col: usize) {
        self.count += 1;
        self.row_sum += row;
        self.col_sum += col;
    }

    fn centroid(&self) -> Option<Centroid> {
        (self.count >= MIN_CLUSTER_PIXELS)
            .then(|| Centroid::new(self.row_sum / self.count, self.col_sum / self.count))
    }
}

/// Diagnostic counters gathered from the disjoint set of one labeling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct UnionStats {
    pub(crate) merges: usize,
    pub(crate) calls: u64,
    pub(crate) compressions: u64,
}

#[instrument(
    name = "core.label",
    level = "debug",
    err,
    skip(values),
    fields(pixels = values.len())
)]
pub(crate) fn label_pixels(
    side: usize,
    values: &[f32],
    threshold: f32,
) -> Result<(LabelGrid, UnionStats)> {
    let pixels = side.saturating_mul(side);
    let mut set = DisjointSet::new(pixels)?;
    let bright = |index: usize| values.get(index).is_some_and(|&value| value > threshold);

    let mut merges = 0_usize;
    let last = side.saturating_sub(1);
    for row in 0..last {
        for col in 0..last {
            let here = row * side + col;
            if !bright(here) {
                continue;
            }
            let below = here + side;
            if bright(below) && set.union(here, below)? {
                merges += 1;
            }
            let right = here + 1;
            if bright(right) && set.union(here, right)? {
                merges += 1;
            }
        }
    }

    let labels = (0..pixels)
        .map(|index| set.root(index))
        .collect::<core::result::Result<Vec<_>, _>>()?;

    let stats = UnionStats {
        merges,
        calls: set.calls(),
        compressions: set.compressions(),
    };
    debug!(
        merges = stats.merges,
        calls = stats.calls,
        compressions = stats.compressions,
        components = set.component_count(),
        "union pass completed"
    );
    Ok((LabelGrid::from_parts(side, labels), stats))
}

/// Configured labeling runtime.
///
/// Built by [`crate::LabelerBuilder`]; holds the brightness threshold and
/// whether grids are normalised into `[0, 1]` before labeling.
///
/// # Examples
/// ```
/// use cellcount_core::{Centroid, Grid, LabelerBuilder};
///
/// let labeler = LabelerBuilder::new().with_threshold(0.5).build()?;
/// let grid = Grid::from_rows(&[
///     [1.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 0.0, 0.0],
///     [0.0, 0.0, 0.0, 0.0],
///     [0.0, 0.0, 0.0, 0.0],
/// ])?;
/// let detection = labeler.run(&grid)?;
/// assert_eq!(detection.centroids(), &[Centroid::new(0, 0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Labeler {
    threshold: f32,
    normalize: bool,
}

impl Labeler {
    pub(crate) fn new(threshold: f32, normalize: bool) -> Self {
        Self {
            threshold,
            normalize,
        }
    }

    /// Returns the brightness threshold pixels must exceed.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns whether grids are normalised before labeling.
    #[must_use]
    pub fn normalizes(&self) -> bool {
        self.normalize
    }

    /// Labels `grid`, normalising it first when configured to.
    ///
    /// # Errors
    /// Same conditions as [`label`].
    pub fn label(&self, grid: &Grid) -> Result<LabelGrid> {
        if self.normalize {
            label(&grid.normalized(), self.threshold)
        } else {
            label(grid, self.threshold)
        }
    }

    /// Validates `source`, labels it and extracts cluster centroids.
    ///
    /// # Errors
    /// Returns [`LabelError::EmptySource`] when the source supplies no
    /// pixels, [`LabelError::Grid`] when its buffer is not a valid square
    /// grid, and propagates labeling failures.
    pub fn run<S: GridSource>(&self, source: &S) -> Result<Detection> {
        self.run_source(source)
    }

    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            grid_source = %source.name(),
            threshold = self.threshold,
            normalize = self.normalize
        ),
    )]
    fn run_source<S: GridSource>(&self, source: &S) -> Result<Detection> {
        if source.is_empty() {
            warn!(
                grid_source = source.name(),
                "grid source is empty, returning error"
            );
            return Err(LabelError::EmptySource {
                grid_source: Arc::from(source.name()),
            });
        }
        let side = source.side();
        let invalid = |error| LabelError::Grid {
            grid_source: Arc::from(source.name()),
            error,
        };
        let (labels, stats) = if self.normalize {
            let normalized = Grid::new(side, source.values().to_vec())
                .map_err(invalid)?
                .normalized();
            label_pixels(side, normalized.values(), self.threshold)?
        } else {
            grid::validate(side, source.values()).map_err(invalid)?;
            label_pixels(side, source.values(), self.threshold)?
        };
        let centroids = cluster_centers(&labels)?;

        record_run(&stats, centroids.len());
        info!(
            grid_source = source.name(),
            clusters = centroids.len(),
            merges = stats.merges,
            "labeling completed"
        );
        Ok(Detection::new(labels, centroids))
    }
}

#[cfg(feature = "metrics")]
fn record_run(stats: &UnionStats, clusters: usize) {
    metrics::counter!("labeler_runs").increment(1);
    metrics::counter!("labeler_unions").increment(stats.calls);
    metrics::counter!("labeler_compressions").increment(stats.compressions);
    let clusters = u32::try_from(clusters).unwrap_or(u32::MAX);
    metrics::histogram!("labeler_clusters").record(f64::from(clusters));
}

#[cfg(not(feature = "metrics"))]
fn record_run(_stats: &UnionStats, _clusters: usize) {}

#[cfg(test)]
mod property;
