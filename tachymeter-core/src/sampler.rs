//! Measurement Sampler
//!
//! Times one input size of a job. Each sample constructs a fresh workload
//! (untimed), invokes it between two clock readings, then drops it before the
//! next sample starts. Sampling continues while any of these hold:
//!
//! - the summed sample time is below the job's `min_time`
//! - fewer than 8 samples have been taken
//! - the sample count is even
//!
//! so every size gets at least [`MIN_SAMPLE_COUNT`] samples and always an odd
//! number, which gives the median a single middle element.

use crate::clock::Clock;
use crate::{Measurement, Workload};
use std::time::Duration;
use tachymeter_stats::compute_quartiles;

/// Smallest sample count the sampler ever produces
pub const MIN_SAMPLE_COUNT: usize = 9;

/// Sample count below which sampling never stops, regardless of budget
const MIN_SAMPLES_BEFORE_STOP: usize = 8;

/// Whether another sample is needed after `count` samples totalling `total`.
#[inline]
pub fn needs_more_samples(count: usize, total: Duration, min_time: Duration) -> bool {
    total < min_time || count < MIN_SAMPLES_BEFORE_STOP || count % 2 == 0
}

/// Run the sampling loop for one size and return the raw sample durations,
/// in the order they were taken.
///
/// Panics from the factory or the workload propagate unchanged.
pub fn collect_samples<C, F, W>(
    clock: &C,
    size: u64,
    min_time: Duration,
    factory: &mut F,
) -> Vec<Duration>
where
    C: Clock + ?Sized,
    F: FnMut(u64) -> W,
    W: Workload,
{
    let mut samples = Vec::with_capacity(MIN_SAMPLE_COUNT);
    let mut total = Duration::ZERO;

    while needs_more_samples(samples.len(), total, min_time) {
        let mut workload = factory(size);

        let before = clock.now();
        workload.invoke(size);
        let after = clock.now();

        drop(workload);

        let elapsed = after - before;
        total += elapsed;
        samples.push(elapsed);
    }

    samples
}

/// Sample `size` until the budget is met and reduce the samples to a
/// [`Measurement`].
pub fn measure<C, F, W>(clock: &C, size: u64, min_time: Duration, factory: &mut F) -> Measurement
where
    C: Clock + ?Sized,
    F: FnMut(u64) -> W,
    W: Workload,
{
    let samples = collect_samples(clock, size, min_time, factory);
    let nanos: Vec<u64> = samples.iter().map(|d| d.as_nanos() as u64).collect();
    let quartiles = compute_quartiles(&nanos);

    tracing::debug!(
        size,
        runs = quartiles.count,
        median_ns = quartiles.median,
        "measured size"
    );

    Measurement::from_quartiles(size, &quartiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::StepClock;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Clock replaying a fixed list of readings.
    struct ScriptedClock {
        readings: Vec<Duration>,
        pos: Cell<usize>,
    }

    impl ScriptedClock {
        /// Readings that make sample `i` last `durations_ms[i]` milliseconds
        fn with_sample_durations(durations_ms: &[u64]) -> Self {
            let mut readings = Vec::new();
            let mut t = Duration::ZERO;
            for &d in durations_ms {
                readings.push(t);
                t += Duration::from_millis(d);
                readings.push(t);
            }
            Self {
                readings,
                pos: Cell::new(0),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> Duration {
            let i = self.pos.get();
            self.pos.set(i + 1);
            self.readings[i]
        }
    }

    #[test]
    fn test_runs_nine_times_when_budget_met_by_first_sample() {
        let clock = StepClock::new(Duration::from_millis(1));
        let constructed = Cell::new(0);
        let invoked = Rc::new(Cell::new(0));

        let mut factory = |size: u64| {
            assert_eq!(size, 123);
            constructed.set(constructed.get() + 1);
            let invoked = Rc::clone(&invoked);
            move |_size: u64| invoked.set(invoked.get() + 1)
        };

        let samples = collect_samples(&clock, 123, Duration::from_millis(1), &mut factory);
        assert_eq!(samples.len(), 9);
        assert_eq!(constructed.get(), 9);
        assert_eq!(invoked.get(), 9);
    }

    #[test]
    fn test_runs_until_min_time_reached() {
        let clock = StepClock::new(Duration::from_millis(1));
        let mut factory = |_size: u64| |_size: u64| ();

        let samples = collect_samples(&clock, 123, Duration::from_millis(100), &mut factory);
        assert_eq!(samples.len(), 101);
        assert!(samples.iter().all(|d| *d == Duration::from_millis(1)));
    }

    #[test]
    fn test_sample_count_is_smallest_odd_covering_budget() {
        for (budget_ms, expected) in [(0, 9), (8, 9), (9, 9), (10, 11), (11, 11), (12, 13)] {
            let clock = StepClock::new(Duration::from_millis(1));
            let mut factory = |_size: u64| |_size: u64| ();
            let samples =
                collect_samples(&clock, 1, Duration::from_millis(budget_ms), &mut factory);
            assert_eq!(samples.len(), expected, "budget {budget_ms}ms");
        }
    }

    #[test]
    fn test_needs_more_samples() {
        let ms = Duration::from_millis;
        assert!(needs_more_samples(0, ms(0), ms(0)));
        assert!(needs_more_samples(7, ms(100), ms(1)));
        assert!(needs_more_samples(8, ms(100), ms(1)));
        assert!(!needs_more_samples(9, ms(100), ms(1)));
        assert!(needs_more_samples(9, ms(9), ms(10)));
        assert!(needs_more_samples(10, ms(10), ms(10)));
        assert!(!needs_more_samples(11, ms(11), ms(10)));
    }

    #[test]
    fn test_workload_lifetime_spans_one_sample() {
        #[derive(Debug, PartialEq)]
        enum Event {
            Construct(u64),
            Invoke(u64),
            Drop,
        }

        struct Probe {
            log: Rc<RefCell<Vec<Event>>>,
        }

        impl Workload for Probe {
            fn invoke(&mut self, size: u64) {
                self.log.borrow_mut().push(Event::Invoke(size));
            }
        }

        impl Drop for Probe {
            fn drop(&mut self) {
                self.log.borrow_mut().push(Event::Drop);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let clock = StepClock::new(Duration::from_millis(1));
        let mut factory = |size: u64| {
            log.borrow_mut().push(Event::Construct(size));
            Probe {
                log: Rc::clone(&log),
            }
        };

        collect_samples(&clock, 42, Duration::ZERO, &mut factory);

        let log = log.borrow();
        assert_eq!(log.len(), 27);
        for chunk in log.chunks(3) {
            assert_eq!(
                chunk,
                &[Event::Construct(42), Event::Invoke(42), Event::Drop]
            );
        }
    }

    #[test]
    fn test_construction_is_not_timed() {
        // The clock only advances when read, so construction that never reads
        // it can't leak into the samples.
        let clock = StepClock::new(Duration::from_micros(3));
        let mut factory = |size: u64| {
            let data: Vec<u64> = (0..size).collect();
            move |_size: u64| data.len()
        };
        let samples = collect_samples(&clock, 1000, Duration::ZERO, &mut factory);
        assert_eq!(clock.readings(), 18);
        assert!(samples.iter().all(|d| *d == Duration::from_micros(3)));
    }

    #[test]
    fn test_measure_reduces_to_quartiles() {
        let clock = ScriptedClock::with_sample_durations(&[5, 1, 9, 3, 7, 2, 8, 4, 6]);
        let mut factory = |_size: u64| |_size: u64| ();

        let m = measure(&clock, 77, Duration::ZERO, &mut factory);

        assert_eq!(m.data_size, 77);
        assert_eq!(m.num_runs, 9);
        assert_eq!(m.lower_quartile, 3_000_000);
        assert_eq!(m.median, 5_000_000);
        assert_eq!(m.upper_quartile, 7_000_000);
        // Mean of sorted[2..6] = (3 + 4 + 5 + 6) / 4 ms
        assert_eq!(m.average, 4_500_000);
    }

    #[test]
    fn test_measure_quartile_ordering() {
        let clock = ScriptedClock::with_sample_durations(&[9, 9, 1, 1, 5, 5, 3, 7, 2]);
        let mut factory = |_size: u64| |_size: u64| ();
        let m = measure(&clock, 1, Duration::ZERO, &mut factory);
        assert!(m.lower_quartile <= m.median);
        assert!(m.median <= m.upper_quartile);
    }

    #[test]
    #[should_panic(expected = "workload failed")]
    fn test_workload_panic_propagates() {
        fn failing(_size: u64) {
            panic!("workload failed");
        }

        let clock = StepClock::new(Duration::from_millis(1));
        let mut factory = |_size: u64| failing;
        collect_samples(&clock, 1, Duration::ZERO, &mut factory);
    }
}
