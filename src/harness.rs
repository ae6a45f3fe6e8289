use std::hint::black_box;
use std::time::{Duration, Instant};

use log::debug;
use stats_alloc::INSTRUMENTED_SYSTEM;

use crate::Error;

/// Allocation totals observed over a span of work.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Allocations {
    /// The number of allocations made.
    pub count: u64,
    /// The number of bytes allocated.
    pub bytes: u64,
}

impl Allocations {
    fn since(self, earlier: Self) -> Self {
        Self {
            count: self.count.saturating_sub(earlier.count),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// A source of running allocation totals.
pub trait AllocationCounter {
    /// Returns the totals allocated so far.
    fn snapshot(&self) -> Allocations;
}

/// Reads the totals kept by [`stats_alloc::INSTRUMENTED_SYSTEM`].
///
/// The executable must install that allocator as its global allocator.
/// Totals are process-wide, so allocations made by other threads during a
/// run are counted too.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCounter;

impl AllocationCounter for StatsCounter {
    fn snapshot(&self) -> Allocations {
        let stats = INSTRUMENTED_SYSTEM.stats();
        let grown = u64::try_from(stats.bytes_reallocated.max(0)).unwrap_or_default();
        Allocations {
            count: (stats.allocations + stats.reallocations) as u64,
            bytes: stats.bytes_allocated as u64 + grown,
        }
    }
}

/// Reports no allocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCounter;

impl AllocationCounter for NoopCounter {
    fn snapshot(&self) -> Allocations {
        Allocations::default()
    }
}

/// Controls how [`Harness::run`] picks an iteration count.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Config {
    /// How long to run the body before measuring.
    pub warm_up: Duration,
    /// How long the measured run should roughly take.
    pub measurement_time: Duration,
    /// The fewest iterations a measured run performs.
    pub min_iterations: u64,
    /// The most iterations a measured run performs.
    pub max_iterations: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warm_up: Duration::from_millis(100),
            measurement_time: Duration::from_secs(1),
            min_iterations: 1,
            max_iterations: 100_000_000,
        }
    }
}

impl Config {
    /// Sets the warm-up duration.
    #[must_use]
    pub const fn warm_up_time(mut self, warm_up: Duration) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Sets the target duration of a measured run.
    #[must_use]
    pub const fn measurement_time(mut self, measurement_time: Duration) -> Self {
        self.measurement_time = measurement_time;
        self
    }

    /// Bounds the iteration count of a measured run to `min..=max`.
    #[must_use]
    pub const fn iterations(mut self, min: u64, max: u64) -> Self {
        self.min_iterations = min;
        self.max_iterations = max;
        self
    }

    /// Returns how many iterations fill [`Config::measurement_time`] when one
    /// iteration takes `nanos_per_iteration`.
    #[must_use]
    pub fn iterations_for(&self, nanos_per_iteration: u128) -> u64 {
        let iterations = self
            .measurement_time
            .as_nanos()
            .checked_div(nanos_per_iteration)
            .unwrap_or(u128::MAX);
        u64::try_from(iterations)
            .unwrap_or(u64::MAX)
            .min(self.max_iterations)
            .max(self.min_iterations)
    }
}

/// The totals of one measured run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Statistics {
    label: &'static str,
    iterations: u64,
    elapsed: Duration,
    allocations: Allocations,
}

impl Statistics {
    /// Returns the label the run was performed under.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the number of times the body was executed.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Returns the total time spent executing the body.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the total number of allocations made by the body.
    #[must_use]
    pub const fn allocations(&self) -> u64 {
        self.allocations.count
    }

    /// Returns the total number of bytes allocated by the body.
    #[must_use]
    pub const fn allocated_bytes(&self) -> u64 {
        self.allocations.bytes
    }

    /// Returns the mean time of one iteration, in nanoseconds.
    #[must_use]
    pub fn nanos_per_iteration(&self) -> f64 {
        per_iteration(self.elapsed.as_nanos() as f64, self.iterations)
    }

    /// Returns the mean number of allocations of one iteration.
    #[must_use]
    pub fn allocations_per_iteration(&self) -> f64 {
        per_iteration(self.allocations.count as f64, self.iterations)
    }

    /// Returns the mean number of bytes allocated by one iteration.
    #[must_use]
    pub fn bytes_per_iteration(&self) -> f64 {
        per_iteration(self.allocations.bytes as f64, self.iterations)
    }
}

fn per_iteration(total: f64, iterations: u64) -> f64 {
    if iterations == 0 {
        0.
    } else {
        total / iterations as f64
    }
}

/// Repeatedly executes an extraction body, measuring time and allocations.
#[derive(Debug, Default)]
pub struct Harness<C = StatsCounter> {
    config: Config,
    counter: C,
}

impl<C> Harness<C>
where
    C: AllocationCounter,
{
    /// Returns a harness that calibrates with `config` and counts allocations
    /// with `counter`.
    pub const fn new(config: Config, counter: C) -> Self {
        Self { config, counter }
    }

    /// Returns the configuration of this harness.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Warms up `body`, picks an iteration count from the observed speed, and
    /// performs a measured run of that many iterations.
    pub fn run<F>(&self, label: &'static str, mut body: F) -> Result<Statistics, Error>
    where
        F: FnMut() -> Result<String, Error>,
    {
        let nanos_per_iteration = self.warm_up(&mut body)?;
        let iterations = self.config.iterations_for(nanos_per_iteration);
        debug!("{label}: {nanos_per_iteration}ns per iteration during warm-up, running {iterations} iterations");
        self.run_iterations(label, iterations, body)
    }

    /// Executes `body` exactly `iterations` times back to back, timing the
    /// loop and counting the allocations it makes.
    ///
    /// The first error returned by `body` aborts the run.
    pub fn run_iterations<F>(
        &self,
        label: &'static str,
        iterations: u64,
        mut body: F,
    ) -> Result<Statistics, Error>
    where
        F: FnMut() -> Result<String, Error>,
    {
        let before = self.counter.snapshot();
        let start = Instant::now();
        repeat(iterations, &mut body)?;
        let elapsed = start.elapsed();
        let allocations = self.counter.snapshot().since(before);

        debug!(
            "{label}: {iterations} iterations in {elapsed:?}, {} allocations, {} bytes",
            allocations.count, allocations.bytes
        );
        Ok(Statistics {
            label,
            iterations,
            elapsed,
            allocations,
        })
    }

    fn warm_up<F>(&self, body: &mut F) -> Result<u128, Error>
    where
        F: FnMut() -> Result<String, Error>,
    {
        let start = Instant::now();
        let mut batch = 1_u64;
        let mut total = 0_u64;
        loop {
            repeat(batch, body)?;
            total += batch;
            let elapsed = start.elapsed();
            if elapsed >= self.config.warm_up {
                return Ok(elapsed.as_nanos() / u128::from(total));
            }
            batch = batch.saturating_mul(2);
        }
    }
}

fn repeat<F>(iterations: u64, body: &mut F) -> Result<(), Error>
where
    F: FnMut() -> Result<String, Error>,
{
    // Observation sink: keeps each result alive until the next one replaces
    // it so the extraction can't be optimized away.
    let mut last = String::new();
    for _ in 0..iterations {
        last = black_box(body()?);
    }
    drop(black_box(last));
    Ok(())
}
