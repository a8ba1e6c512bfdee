//! Descriptive statistics of the pH values in a filtered view.
//!
//! Matches the usual "describe" summary: count, mean, sample standard
//! deviation, min, quartiles and max. Quartiles interpolate linearly between
//! the two closest ranks. An empty view is a valid input and yields count 0
//! with every other statistic undefined (NaN).

use rwq_core::FilteredView;
use serde::Serialize;

/// Summary statistics of a set of pH values.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); NaN below two values.
    pub std: f64,
    pub min: f64,
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    /// The summary of no values at all.
    pub fn undefined() -> Summary {
        Summary {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }

    pub fn is_undefined(&self) -> bool {
        self.count == 0
    }

    /// Labelled statistics in display order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Summarize the pH values of a filtered view.
pub fn describe(view: &FilteredView<'_>) -> Summary {
    describe_values(&view.ph_values())
}

/// Summarize a slice of values. Non-finite values are ignored.
pub fn describe_values(values: &[f64]) -> Summary {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Summary::undefined();
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let variance =
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    } else {
        f64::NAN
    };

    Summary {
        count,
        mean,
        std,
        min: sorted[0],
        p25: quantile_sorted(&sorted, 0.25),
        p50: quantile_sorted(&sorted, 0.50),
        p75: quantile_sorted(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// `p`-th quantile of non-empty, ascending data, interpolating linearly
/// between closest ranks.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        sorted[n - 1]
    } else {
        (1.0 - g) * sorted[j] + g * sorted[j + 1]
    }
}
