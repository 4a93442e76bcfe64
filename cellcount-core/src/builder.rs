//! Builder utilities for configuring a [`Labeler`].
//!
//! Exposes the threshold and normalisation settings and validates them before
//! constructing [`Labeler`] instances.

use crate::{Result, error::LabelError, labeler::Labeler};

/// Threshold used when none is configured: the midpoint of the normalised
/// brightness range.
const DEFAULT_THRESHOLD: f32 = 0.5;

/// Configures and constructs [`Labeler`] instances.
///
/// # Examples
/// ```
/// use cellcount_core::LabelerBuilder;
///
/// let labeler = LabelerBuilder::new()
///     .with_threshold(0.7)
///     .with_normalization(true)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(labeler.threshold(), 0.7);
/// assert!(labeler.normalizes());
/// ```
#[derive(Debug, Clone)]
pub struct LabelerBuilder {
    threshold: f32,
    normalize: bool,
}

impl Default for LabelerBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            normalize: false,
        }
    }
}

impl LabelerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::LabelerBuilder;
    ///
    /// let builder = LabelerBuilder::new();
    /// assert_eq!(builder.threshold(), 0.5);
    /// assert!(!builder.normalization());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the brightness threshold. Pixels must be strictly brighter
    /// to take part in a cluster.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the configured threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Enables or disables min/max normalisation of grids before labeling.
    #[must_use]
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Returns whether normalisation is enabled.
    #[must_use]
    pub fn normalization(&self) -> bool {
        self.normalize
    }

    /// Validates the configuration and constructs a [`Labeler`].
    ///
    /// # Errors
    /// Returns [`LabelError::InvalidThreshold`] when the threshold is NaN or
    /// infinite.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::{LabelErrorCode, LabelerBuilder};
    ///
    /// let err = LabelerBuilder::new()
    ///     .with_threshold(f32::NAN)
    ///     .build()
    ///     .expect_err("NaN threshold is rejected");
    /// assert_eq!(err.code(), LabelErrorCode::InvalidThreshold);
    /// ```
    pub fn build(self) -> Result<Labeler> {
        if !self.threshold.is_finite() {
            return Err(LabelError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        Ok(Labeler::new(self.threshold, self.normalize))
    }
}
