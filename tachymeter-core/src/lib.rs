#![warn(missing_docs)]
//! Tachymeter Core - Measurement Runtime
//!
//! This crate provides the pieces a benchmark job is built from:
//! - `Sizes` generators producing the input sizes to measure
//! - The `Clock` abstraction and a monotonic system clock
//! - The sampler that times a workload until its budget is met
//! - `Measurement`, the per-size quartile summary handed to reporters

mod clock;
mod sampler;
mod sizes;

pub use clock::{Clock, MonotonicClock, StepClock};
pub use sampler::{MIN_SAMPLE_COUNT, collect_samples, measure, needs_more_samples};
pub use sizes::{Sizes, SizesIter, powers, powers_of, seq, seq_of};

use serde::{Deserialize, Serialize};
use tachymeter_stats::Quartiles;

/// Timing summary for one input size.
///
/// All durations are in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Input size the workload was constructed and invoked with
    pub data_size: u64,
    /// Sample at the 25th percentile index
    pub lower_quartile: u64,
    /// Sample at the middle index
    pub median: u64,
    /// Mean of the interquartile slice
    pub average: u64,
    /// Sample at the 75th percentile index
    pub upper_quartile: u64,
    /// Number of samples taken
    pub num_runs: u64,
}

impl Measurement {
    /// Build a measurement for `data_size` from reduced sample statistics.
    pub fn from_quartiles(data_size: u64, quartiles: &Quartiles) -> Self {
        Self {
            data_size,
            lower_quartile: quartiles.lower,
            median: quartiles.median,
            average: quartiles.average,
            upper_quartile: quartiles.upper,
            num_runs: quartiles.count as u64,
        }
    }
}

/// Measurements of one job, in size-generator order.
pub type ResultSequence = Vec<Measurement>;

/// The timed half of a benchmark.
///
/// A workload is built fresh for every sample by the job's factory (untimed),
/// invoked once (timed) and dropped before the next sample starts.
///
/// Any `FnMut(u64) -> T` is a workload; its return value is passed through
/// [`std::hint::black_box`] so the optimizer cannot discard the work.
pub trait Workload {
    /// Run the measured operation once for `size`.
    fn invoke(&mut self, size: u64);
}

impl<F, T> Workload for F
where
    F: FnMut(u64) -> T,
{
    #[inline]
    fn invoke(&mut self, size: u64) {
        std::hint::black_box(self(size));
    }
}
