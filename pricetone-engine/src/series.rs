//! Input time-series samples.

/// One data point of the sonified series.
///
/// `index` is the sample's position in its series; samples are immutable
/// once generated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub value: f32,
}

impl Sample {
    #[inline]
    pub fn new(index: usize, value: f32) -> Self {
        Self { index, value }
    }

    /// Index a plain slice of values into a sample series.
    pub fn series(values: &[f32]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Sample { index, value })
            .collect()
    }
}
