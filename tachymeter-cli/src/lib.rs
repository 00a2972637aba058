#![warn(missing_docs)]
//! Tachymeter CLI Library
//!
//! Job registration, command-line dispatch, configuration and logging for
//! benchmark binaries. Register jobs on a [`Registry`] and hand it to [`run`]
//! from `main`:
//!
//! ```no_run
//! use std::time::Duration;
//! use tachymeter_cli::Registry;
//! use tachymeter_core::powers;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         "vec_fill",
//!         powers(16, 4096, 4),
//!         |size| move |_: u64| vec![0u8; size as usize],
//!         Duration::from_millis(10),
//!     );
//!     tachymeter_cli::run(&mut registry)
//! }
//! ```

mod command;
mod config;
mod logging;
mod registry;

pub use command::{Command, Selection, usage};
pub use config::*;
pub use logging::{VERBOSE_ENV, default_directive, init_logging};
pub use registry::{DispatchError, Registry};

use anyhow::Context;
use std::io::Write;
use tachymeter_core::Clock;
use tachymeter_report::{CsvReporter, JsonReporter, OutputFormat, Reporter, TextReporter};

/// Run a benchmark binary: load configuration, set up logging and dispatch
/// on the process arguments, writing to stdout.
pub fn run<C: Clock>(registry: &mut Registry<C>) -> anyhow::Result<()> {
    let config = TachymeterConfig::discover()
        .context("failed to load tachymeter.toml")?
        .unwrap_or_default();
    init_logging(&config.log);

    let args: Vec<String> = std::env::args().collect();
    run_with_config(registry, &args, &config)
}

/// Dispatch on `args` with an explicit configuration, writing to stdout.
pub fn run_with_config<C, S>(
    registry: &mut Registry<C>,
    args: &[S],
    config: &TachymeterConfig,
) -> anyhow::Result<()>
where
    C: Clock,
    S: AsRef<str>,
{
    let mut stdout = std::io::stdout();
    dispatch(registry, args, config, &mut stdout)
}

/// Dispatch on `args`, sending list and usage text to `out`.
///
/// Reports go wherever `config.output` sends them.
pub fn dispatch<C, S, O>(
    registry: &mut Registry<C>,
    args: &[S],
    config: &TachymeterConfig,
    out: &mut O,
) -> anyhow::Result<()>
where
    C: Clock,
    S: AsRef<str>,
    O: Write + ?Sized,
{
    if let Some(min_time) = config.min_time_override()? {
        tracing::info!(min_time = ?min_time, "overriding job budgets from configuration");
        registry.set_min_time_override(Some(min_time));
    }

    let mut reporter = build_reporter(&config.output)?;
    registry.run(args, &mut *out, &mut reporter)?;
    out.flush()?;
    Ok(())
}

/// Build the reporter selected by `output`.
pub fn build_reporter(output: &OutputConfig) -> Result<Box<dyn Reporter>, ConfigError> {
    let format: OutputFormat = output
        .format
        .parse()
        .map_err(ConfigError::UnknownFormat)?;

    let reporter: Box<dyn Reporter> = match format {
        OutputFormat::Csv => {
            let mut reporter = CsvReporter::new();
            if let Some(dir) = &output.directory {
                reporter = reporter.with_directory(dir);
            }
            if output.echo {
                reporter = reporter.with_gossip(std::io::stdout());
            }
            Box::new(reporter)
        }
        OutputFormat::Json => {
            let mut reporter = JsonReporter::new();
            if let Some(dir) = &output.directory {
                reporter = reporter.with_directory(dir);
            }
            if output.echo {
                reporter = reporter.with_stream(std::io::stdout());
            }
            Box::new(reporter)
        }
        OutputFormat::Human => Box::new(TextReporter::stdout()),
    };

    if format != OutputFormat::Human && output.directory.is_none() && !output.echo {
        tracing::warn!("no output directory and echo disabled; results will be discarded");
    }

    Ok(reporter)
}
