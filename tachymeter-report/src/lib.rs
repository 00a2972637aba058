#![warn(missing_docs)]
//! Tachymeter Report - Result Sinks
//!
//! A [`Reporter`] receives the complete result sequence of one job after the
//! job finishes. Provided reporters:
//! - CSV (the `# name` / `#size,...` format, one file per job)
//! - JSON (machine-readable)
//! - Human-readable aligned table

mod csv;
mod json;
mod text;

pub use csv::{CSV_COLUMNS_HEADER, CsvReporter, generate_csv_report, write_csv};
pub use json::{JobReport, JsonReporter, generate_json_report};
pub use text::{TextReporter, format_duration, format_human_output};

use tachymeter_core::Measurement;
use thiserror::Error;

/// Errors a reporter can return
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the output failed
    #[error("I/O error while reporting: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing the results failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sink for finished job results.
///
/// Called once per executed job, synchronously, after all of the job's sizes
/// have been measured. Implementations must not keep `results` past the call.
pub trait Reporter {
    /// Report the measurements of job `name`, in size-generator order
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError> {
        (**self).report(results, name)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError> {
        (**self).report(results, name)
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `# name` header followed by comma-separated rows
    #[default]
    Csv,
    /// JSON document per job
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
