//! Quartile Computation
//!
//! For `n` sorted samples:
//!
//! ```text
//! lo  = n / 4          lower quartile  = s[lo]
//! mid = n / 2          median          = s[mid]
//! hi  = n * 3 / 4      upper quartile  = s[hi]
//! average = sum(s[lo..hi]) / (hi - lo)
//! ```
//!
//! The average covers the half-open slice `[lo, hi)`: `s[hi]` is reported as
//! the upper quartile but is not part of the sum.

use serde::{Deserialize, Serialize};

/// Sorted-sample indices used by the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuartileIndices {
    /// Index of the lower quartile
    pub lower: usize,
    /// Index of the median
    pub median: usize,
    /// Index of the upper quartile (exclusive end of the averaged slice)
    pub upper: usize,
}

impl QuartileIndices {
    /// Indices for a sample set of length `n`
    pub fn for_len(n: usize) -> Self {
        Self {
            lower: n / 4,
            median: n / 2,
            upper: n * 3 / 4,
        }
    }
}

/// Reduced statistics of one sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quartiles {
    /// Sample at the lower quartile index
    pub lower: u64,
    /// Sample at the middle index
    pub median: u64,
    /// Mean of the interquartile slice
    pub average: u64,
    /// Sample at the upper quartile index
    pub upper: u64,
    /// Number of samples
    pub count: usize,
}

/// Reduce unsorted samples.
///
/// Sorts a copy; the input is left untouched. An empty input reduces to
/// all zeros.
///
/// # Examples
///
/// ```
/// # use tachymeter_stats::compute_quartiles;
/// let q = compute_quartiles(&[50, 10, 90, 30, 70, 20, 80, 40, 60]);
/// assert_eq!((q.lower, q.median, q.upper), (30, 50, 70));
/// assert_eq!(q.average, 45);
/// ```
pub fn compute_quartiles(samples: &[u64]) -> Quartiles {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    compute_quartiles_sorted(&sorted)
}

/// Reduce samples already sorted ascending.
pub fn compute_quartiles_sorted(sorted: &[u64]) -> Quartiles {
    if sorted.is_empty() {
        return Quartiles::default();
    }

    let n = sorted.len();
    let idx = QuartileIndices::for_len(n);

    // Only a single sample collapses the slice
    let average = if idx.upper > idx.lower {
        let sum: u128 = sorted[idx.lower..idx.upper]
            .iter()
            .map(|&s| u128::from(s))
            .sum();
        (sum / (idx.upper - idx.lower) as u128) as u64
    } else {
        sorted[idx.lower]
    };

    Quartiles {
        lower: sorted[idx.lower],
        median: sorted[idx.median],
        average,
        upper: sorted[idx.upper],
        count: n,
    }
}
