#![warn(missing_docs)]
//! # Tachymeter
//!
//! Micro-benchmark harness that measures how a workload's run time scales with
//! its input size.
//!
//! - **Size generators**: explicit sequences and geometric progressions,
//!   nestable to build products such as `1, 2, 5, 10, 20, 50, ...`
//! - **Untimed setup**: a fresh workload is constructed per sample outside
//!   the timed region, and dropped before the next sample
//! - **Robust summary**: quartiles, median and the mean of the interquartile
//!   range over at least nine samples per size
//! - **Plain output**: one CSV block per job, ready for plotting scripts
//!
//! ## Quick Start
//!
//! ```no_run
//! use tachymeter::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         "vec_sum",
//!         powers_of(seq([1, 2, 5]), 10, 10_000, 10),
//!         |size| {
//!             let data: Vec<u64> = (0..size).collect();
//!             move |_: u64| data.iter().sum::<u64>()
//!         },
//!         Duration::from_millis(20),
//!     );
//!     tachymeter::run(&mut registry)
//! }
//! ```
//!
//! The resulting binary runs every job by default, `<binary> name...` runs
//! the named jobs, and `<binary> -l` lists job names.

// Re-export core types
pub use tachymeter_core::{
    Clock, MIN_SAMPLE_COUNT, Measurement, MonotonicClock, ResultSequence, Sizes, SizesIter,
    StepClock, Workload, collect_samples, measure, needs_more_samples, powers, powers_of, seq,
    seq_of,
};

// Re-export stats
pub use tachymeter_stats::{Quartiles, compute_quartiles};

// Re-export reporters
pub use tachymeter_report::{
    CsvReporter, JsonReporter, OutputFormat, ReportError, Reporter, TextReporter,
    generate_csv_report,
};

// Re-export registry and configuration
pub use tachymeter_cli::{DispatchError, Registry, TachymeterConfig, dispatch, run_with_config};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Registry, Reporter, Sizes, powers, powers_of, seq, seq_of};
    pub use std::time::Duration;
}

/// Run the tachymeter harness.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     let mut registry = tachymeter::Registry::new();
///     // register jobs...
///     tachymeter::run(&mut registry)
/// }
/// ```
pub use tachymeter_cli::run;
