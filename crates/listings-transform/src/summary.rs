//! Distribution summaries.

/// Count, mean, sample standard deviation, and range of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    /// `None` for fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl DistributionSummary {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count,
            mean,
            std,
            min,
            max,
        })
    }
}
