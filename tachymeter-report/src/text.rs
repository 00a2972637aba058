//! Human-Readable Output
//!
//! One aligned table per job, durations scaled to a readable unit.

use crate::{ReportError, Reporter};
use std::io::Write;
use tachymeter_core::Measurement;

/// Format a nanosecond count with a unit suited to its magnitude.
pub fn format_duration(nanos: u64) -> String {
    let ns = nanos as f64;
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

/// Render one job's results as a table.
pub fn format_human_output(name: &str, results: &[Measurement]) -> String {
    let mut output = String::new();

    output.push_str(name);
    output.push('\n');
    output.push_str(&"-".repeat(76));
    output.push('\n');
    output.push_str(&format!(
        "{:>12} {:>12} {:>12} {:>12} {:>12} {:>8}\n",
        "size", "lo_q", "median", "average", "hi_q", "runs"
    ));

    if results.is_empty() {
        output.push_str("  (no sizes)\n");
    }

    for m in results {
        output.push_str(&format!(
            "{:>12} {:>12} {:>12} {:>12} {:>12} {:>8}\n",
            m.data_size,
            format_duration(m.lower_quartile),
            format_duration(m.median),
            format_duration(m.average),
            format_duration(m.upper_quartile),
            m.num_runs
        ));
    }

    output.push('\n');
    output
}

/// Writes a table per job to a stream.
pub struct TextReporter {
    out: Box<dyn Write>,
}

impl TextReporter {
    /// Report to `out`
    pub fn new(out: impl Write + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Report to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Reporter for TextReporter {
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError> {
        self.out
            .write_all(format_human_output(name, results).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
