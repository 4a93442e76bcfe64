//! Grid source abstraction for the cellcount labeler.

/// Abstraction over something that can supply a square brightness grid.
///
/// Providers hand the labeler a row-major buffer together with the grid side;
/// [`crate::Labeler::run`] validates the pair before labeling.
///
/// # Examples
/// ```
/// use cellcount_core::GridSource;
///
/// struct Checkerboard(Vec<f32>);
///
/// impl GridSource for Checkerboard {
///     fn name(&self) -> &str { "checkerboard" }
///     fn side(&self) -> usize { 2 }
///     fn values(&self) -> &[f32] { &self.0 }
/// }
///
/// let source = Checkerboard(vec![1.0, 0.0, 0.0, 1.0]);
/// assert_eq!(source.pixel_count(), 4);
/// assert!(!source.is_empty());
/// ```
pub trait GridSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the side length `N` of the `N×N` grid.
    fn side(&self) -> usize;

    /// Returns the brightness values in row-major order.
    fn values(&self) -> &[f32];

    /// Returns the number of values supplied.
    #[must_use]
    fn pixel_count(&self) -> usize {
        self.values().len()
    }

    /// Returns whether the source supplies no pixels.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.side() == 0 || self.values().is_empty()
    }
}
