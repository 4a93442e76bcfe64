use cellcount_core::GridSource;

/// In-memory grid source with an explicit side, so tests can hand the
/// labeler buffers that do not describe a valid grid.
#[derive(Clone)]
pub struct Plate {
    side: usize,
    values: Vec<f32>,
}

impl Plate {
    #[must_use]
    pub fn new(side: usize, values: Vec<f32>) -> Self {
        Self { side, values }
    }
}

impl GridSource for Plate {
    fn name(&self) -> &str {
        "plate"
    }

    fn side(&self) -> usize {
        self.side
    }

    fn values(&self) -> &[f32] {
        &self.values
    }
}
