//! JSON Output

use crate::{ReportError, Reporter};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tachymeter_core::Measurement;

/// Serialized form of one job's results
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobReport<'a> {
    /// Job name
    pub name: &'a str,
    /// Measurements in size order
    pub results: &'a [Measurement],
}

/// Generate a prettified JSON report for one job.
pub fn generate_json_report(name: &str, results: &[Measurement]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JobReport { name, results })
}

/// Writes each job as JSON to `<directory>/<name>.json` and/or a stream.
#[derive(Default)]
pub struct JsonReporter {
    directory: Option<PathBuf>,
    stream: Option<Box<dyn Write>>,
}

impl JsonReporter {
    /// A reporter with no outputs configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one file per job into `directory`, created on first use
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Also write every report to `stream`, one document per job
    pub fn with_stream(mut self, stream: impl Write + 'static) -> Self {
        self.stream = Some(Box::new(stream));
        self
    }
}

impl Reporter for JsonReporter {
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError> {
        let json = generate_json_report(name, results)?;

        if let Some(stream) = self.stream.as_mut() {
            writeln!(stream, "{json}")?;
            stream.flush()?;
        }

        if let Some(dir) = &self.directory {
            fs::create_dir_all(dir)?;
            let path = dir.join(format!("{name}.json"));
            let mut out = BufWriter::new(File::create(&path)?);
            writeln!(out, "{json}")?;
            out.flush()?;
            tracing::debug!(path = %path.display(), "wrote JSON report");
        }

        Ok(())
    }
}
