use statrs::statistics::Statistics;

use crate::error::{Error, Result};

/// Maximum total absolute deviation between two expert return arrays of one task
pub const EXPERT_TOLERANCE: f64 = 1e-6;

/// Mean, population standard deviation and size of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
    pub len: usize,
}

impl Summary {
    /// Summarize a non-empty sample
    ///
    /// `what` names the sample in the error returned for an empty one.
    pub fn of(values: &[f64], what: impl FnOnce() -> String) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptySample(what()));
        }
        Ok(Self {
            mean: values.mean(),
            std: values.population_std_dev(),
            len: values.len(),
        })
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.std
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.std
    }
}

/// Sum of absolute element-wise differences, `None` if the lengths differ
pub fn total_abs_deviation(a: &[f64], b: &[f64]) -> Option<f64> {
    (a.len() == b.len()).then(|| a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}
