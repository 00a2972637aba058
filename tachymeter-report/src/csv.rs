//! CSV Output
//!
//! Per job:
//!
//! ```text
//! # <name>
//! #size,lo_q,median,agerage,hi_q,runs
//! <data_size>,<lower_quartile>,<median>,<average>,<upper_quartile>,<num_runs>
//! ...
//! ```
//!
//! Existing plotting scripts parse this layout, column comment included, so
//! it is written byte-for-byte as above.

use crate::{ReportError, Reporter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tachymeter_core::Measurement;

/// Column comment line following the `# <name>` line
pub const CSV_COLUMNS_HEADER: &str = "#size,lo_q,median,agerage,hi_q,runs";

/// Write one job's results in CSV form.
pub fn write_csv<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    results: &[Measurement],
) -> io::Result<()> {
    write!(out, "# {}\n{}\n", name, CSV_COLUMNS_HEADER)?;
    for m in results {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            m.data_size, m.lower_quartile, m.median, m.average, m.upper_quartile, m.num_runs
        )?;
    }
    Ok(())
}

/// Render one job's results as a CSV string.
pub fn generate_csv_report(name: &str, results: &[Measurement]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_csv(&mut buf, name, results);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes each job to `<directory>/<name>` and/or echoes it to a stream.
#[derive(Default)]
pub struct CsvReporter {
    directory: Option<PathBuf>,
    gossip: Option<Box<dyn Write>>,
}

impl CsvReporter {
    /// A reporter with no outputs configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one file per job into `directory`, created on first use
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Also write every report to `stream`
    pub fn with_gossip(mut self, stream: impl Write + 'static) -> Self {
        self.gossip = Some(Box::new(stream));
        self
    }

    /// Output directory, if any
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl std::fmt::Debug for CsvReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvReporter")
            .field("directory", &self.directory)
            .field("gossip", &self.gossip.is_some())
            .finish()
    }
}

impl Reporter for CsvReporter {
    fn report(&mut self, results: &[Measurement], name: &str) -> Result<(), ReportError> {
        if let Some(stream) = self.gossip.as_mut() {
            write_csv(stream, name, results)?;
            stream.flush()?;
        }

        if let Some(dir) = &self.directory {
            fs::create_dir_all(dir)?;
            let path = dir.join(name);
            let mut out = BufWriter::new(File::create(&path)?);
            write_csv(&mut out, name, results)?;
            out.flush()?;
            tracing::debug!(path = %path.display(), rows = results.len(), "wrote CSV report");
        }

        Ok(())
    }
}
