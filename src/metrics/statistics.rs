use ndarray::Array1;
use serde::Serialize;

use crate::estimator::ParameterCount;

/// Summary statistics over a collection of parameter counts
///
/// `std_dev` is the sample standard deviation (n - 1 denominator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountStatistics {
    pub count: usize,
    pub mean: f64,
    pub min: ParameterCount,
    pub max: ParameterCount,
    pub range: ParameterCount,
    pub std_dev: f64,
}

impl CountStatistics {
    /// Compute statistics from a slice of counts, `None` when empty
    pub fn from_counts(counts: &[ParameterCount]) -> Option<Self> {
        let min = counts.iter().copied().min()?;
        let max = counts.iter().copied().max()?;

        let values: Array1<f64> = counts.iter().map(|&c| c as f64).collect();
        let mean = values.mean()?;
        let std_dev = if values.len() < 2 { 0.0 } else { values.std(1.0) };

        Some(CountStatistics {
            count: counts.len(),
            mean,
            min,
            max,
            range: max - min,
            std_dev,
        })
    }
}
