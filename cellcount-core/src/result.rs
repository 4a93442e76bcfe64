//! Result types for labeling runs.

use std::fmt;

use crate::label_grid::LabelGrid;

/// Integer centre of a cluster: the truncated mean row and mean column of its
/// member pixels.
///
/// # Examples
/// ```
/// use cellcount_core::Centroid;
///
/// let centroid = Centroid::new(3, 7);
/// assert_eq!(centroid.row(), 3);
/// assert_eq!(<(usize, usize)>::from(centroid), (3, 7));
/// assert_eq!(centroid.to_string(), "(3, 7)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Centroid {
    row: usize,
    col: usize,
}

impl Centroid {
    /// Creates a centroid at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row coordinate.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Column coordinate.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }
}

impl From<Centroid> for (usize, usize) {
    fn from(centroid: Centroid) -> Self {
        (centroid.row, centroid.col)
    }
}

impl From<(usize, usize)> for Centroid {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Output of [`crate::Labeler::run`]: the per-pixel labels and the centroid
/// of every multi-pixel cluster, ordered by root id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    labels: LabelGrid,
    centroids: Vec<Centroid>,
}

impl Detection {
    pub(crate) fn new(labels: LabelGrid, centroids: Vec<Centroid>) -> Self {
        Self { labels, centroids }
    }

    /// Per-pixel component labels.
    #[must_use]
    pub fn labels(&self) -> &LabelGrid {
        &self.labels
    }

    /// Cluster centroids in ascending root-id order.
    #[must_use]
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Number of clusters with at least two pixels.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    /// Splits the detection into its label grid and centroids.
    #[must_use]
    pub fn into_parts(self) -> (LabelGrid, Vec<Centroid>) {
        (self.labels, self.centroids)
    }
}
