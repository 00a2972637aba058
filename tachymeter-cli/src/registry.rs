//! Job Registry & Dispatch
//!
//! Jobs are registered once with a name, a size generator, a workload factory
//! and a time budget. [`Registry::run`] interprets the command line and either
//! lists the job names, prints usage, or measures the selected jobs in
//! registration order, handing each job's results to the reporter as soon as
//! the job finishes.

use crate::command::{Command, Selection, usage};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::time::Duration;
use tachymeter_core::{Clock, MonotonicClock, ResultSequence, Sizes, Workload, measure};
use tachymeter_report::{ReportError, Reporter};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Writing the job list or usage text failed
    #[error("failed to write to output stream: {0}")]
    Io(#[from] io::Error),
    /// A reporter rejected a job's results
    #[error("reporting job '{job}' failed: {source}")]
    Report {
        /// Job whose results could not be reported
        job: String,
        /// Underlying reporter error
        #[source]
        source: ReportError,
    },
}

/// A registered job, type-erased over its workload factory
trait Job<C: ?Sized> {
    fn name(&self) -> &str;
    fn sizes(&self) -> &Sizes;
    fn min_time(&self) -> Duration;
    fn measure_all(&mut self, clock: &C, min_time: Duration) -> ResultSequence;
}

struct FactoryJob<F, W> {
    name: String,
    sizes: Sizes,
    min_time: Duration,
    factory: F,
    _workload: PhantomData<fn() -> W>,
}

impl<C, F, W> Job<C> for FactoryJob<F, W>
where
    C: Clock + ?Sized,
    F: FnMut(u64) -> W,
    W: Workload,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn sizes(&self) -> &Sizes {
        &self.sizes
    }

    fn min_time(&self) -> Duration {
        self.min_time
    }

    fn measure_all(&mut self, clock: &C, min_time: Duration) -> ResultSequence {
        let mut results = ResultSequence::new();
        for size in self.sizes.iter() {
            results.push(measure(clock, size, min_time, &mut self.factory));
        }
        results
    }
}

/// Ordered collection of benchmark jobs sharing one clock.
pub struct Registry<C = MonotonicClock> {
    clock: C,
    jobs: Vec<Box<dyn Job<C>>>,
    min_time_override: Option<Duration>,
}

impl Registry<MonotonicClock> {
    /// Empty registry timed by the system monotonic clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Registry<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Registry<C> {
    /// Empty registry timed by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            jobs: Vec::new(),
            min_time_override: None,
        }
    }

    /// Append a job.
    ///
    /// `factory` is called once per sample to build a fresh workload for the
    /// current size; only the workload's `invoke` is timed. Names are not
    /// checked for uniqueness.
    pub fn register<F, W>(
        &mut self,
        name: impl Into<String>,
        sizes: impl Into<Sizes>,
        factory: F,
        min_time: Duration,
    ) -> &mut Self
    where
        F: FnMut(u64) -> W + 'static,
        W: Workload + 'static,
    {
        let job = FactoryJob {
            name: name.into(),
            sizes: sizes.into(),
            min_time,
            factory,
            _workload: PhantomData,
        };
        debug!(job = %job.name, sizes = %job.sizes, "registered job");
        self.jobs.push(Box::new(job));
        self
    }

    /// Number of registered jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is registered
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.jobs.iter().map(|job| job.name())
    }

    /// The clock samples are timed with
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run every job with `min_time` instead of its registered budget
    pub fn set_min_time_override(&mut self, min_time: Option<Duration>) {
        self.min_time_override = min_time;
    }

    /// Budget override, if set
    pub fn min_time_override(&self) -> Option<Duration> {
        self.min_time_override
    }

    /// Dispatch on `args` (`args[0]` is the program name).
    ///
    /// List and usage text go to `out`. Measured jobs are reported one at a
    /// time through `reporter`, in registration order.
    pub fn run<S, O, R>(
        &mut self,
        args: &[S],
        out: &mut O,
        reporter: &mut R,
    ) -> Result<(), DispatchError>
    where
        S: AsRef<str>,
        O: Write + ?Sized,
        R: Reporter + ?Sized,
    {
        match Command::parse(args) {
            Command::List => {
                for job in &self.jobs {
                    writeln!(out, "{}", job.name())?;
                }
                out.flush()?;
                Ok(())
            }
            Command::Usage { program } => {
                writeln!(out, "{}", usage(program))?;
                out.flush()?;
                Ok(())
            }
            Command::Run(selection) => self.execute(&selection, reporter),
        }
    }

    fn execute<R>(&mut self, selection: &Selection<'_>, reporter: &mut R) -> Result<(), DispatchError>
    where
        R: Reporter + ?Sized,
    {
        let clock = &self.clock;
        let budget_override = self.min_time_override;

        for job in &mut self.jobs {
            if !selection.matches(job.name()) {
                debug!(job = job.name(), "not selected");
                continue;
            }

            let min_time = budget_override.unwrap_or_else(|| job.min_time());
            info!(
                job = job.name(),
                sizes = job.sizes().len(),
                min_time = ?min_time,
                "running job"
            );

            let results = job.measure_all(clock, min_time);
            info!(job = job.name(), measured = results.len(), "job finished");

            reporter
                .report(&results, job.name())
                .map_err(|source| DispatchError::Report {
                    job: job.name().to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}
