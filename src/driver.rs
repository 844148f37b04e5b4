//! Tick loop that drives a task manager from a clock.
//!
//! The driver sleeps one tick interval, samples the clock, advances the
//! manager, and writes what happened to an output sink. Clocks are
//! pluggable so the loop can run against virtual time in tests.

use std::cell::Cell;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::container::{Discipline, TaskContainer};
use crate::error::{Result, TaskError};
use crate::scheduler::{ManagerStats, TaskManager, TickReport};
use crate::validation::validate_tick_interval;

/// Source of the seconds reading fed to [`TaskManager::update`].
pub trait Clock {
    /// Seconds since the clock's zero point.
    fn now_secs(&self) -> f64;

    /// Waits for `duration` of this clock's time.
    fn sleep(&self, duration: Duration);
}

/// Wall clock that reads zero when constructed.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: `sleep` advances time instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    /// Sets the clock to an absolute reading, which may go backwards.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }
}

/// Tick loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Container discipline; must match the driven manager's.
    pub discipline: Discipline,
    /// Interval between ticks (seconds).
    pub tick_secs: f64,
    /// Stop after this many ticks. `None` = no limit.
    pub max_ticks: Option<u64>,
    /// Stop once no task is pending.
    pub stop_when_idle: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            discipline: Discipline::Fifo,
            tick_secs: 1.0,
            max_ticks: None,
            stop_when_idle: false,
        }
    }
}

impl DriverConfig {
    /// Checks that the loop can run with these settings.
    pub fn validate(&self) -> Result<()> {
        self.tick_interval().map(|_| ())
    }

    fn tick_interval(&self) -> Result<Duration> {
        let secs = validate_tick_interval(self.tick_secs)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| TaskError::InvalidConfig(format!("tick interval {secs}s: {e}")))
    }
}

/// Runs a task manager against a clock.
#[derive(Debug)]
pub struct Driver<K, C = crate::container::Container> {
    config: DriverConfig,
    interval: Duration,
    manager: TaskManager<C>,
    clock: K,
    ticks: u64,
}

impl<K: Clock, C: TaskContainer> Driver<K, C> {
    /// Creates a driver.
    ///
    /// Fails on an unusable tick interval, or when the manager's
    /// discipline differs from the configured one.
    pub fn new(config: DriverConfig, manager: TaskManager<C>, clock: K) -> Result<Self> {
        let interval = config.tick_interval()?;
        if manager.discipline() != config.discipline {
            return Err(TaskError::InvalidConfig(format!(
                "configured for a {} but the manager holds a {}",
                config.discipline,
                manager.discipline()
            )));
        }
        Ok(Self {
            config,
            interval,
            manager,
            clock,
            ticks: 0,
        })
    }

    /// Sleeps one interval and advances the manager to the new reading.
    pub fn tick(&mut self) -> TickReport {
        self.clock.sleep(self.interval);
        let report = self.manager.update(self.clock.now_secs());
        self.ticks += 1;
        info!(
            tick = self.ticks,
            now = report.now_secs,
            completed = report.completion_count(),
            pending = self.manager.size(),
            "tick"
        );
        report
    }

    /// Whether the configured stop condition has been reached.
    pub fn finished(&self) -> bool {
        if let Some(max) = self.config.max_ticks {
            if self.ticks >= max {
                return true;
            }
        }
        self.config.stop_when_idle && self.manager.is_empty()
    }

    /// Runs ticks until a stop condition holds, writing completions and
    /// the pending listing after every tick.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<ManagerStats> {
        self.write_listing(out)?;

        while !self.finished() {
            let report = self.tick();
            for task in &report.completed {
                writeln!(out, "{} completed\n", task.name())?;
            }
            self.write_listing(out)?;
        }

        Ok(self.manager.stats())
    }

    // A non-empty listing is followed by a blank separator line; the
    // empty one is not.
    fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let listing = self.manager.listing();
        write!(out, "{listing}")?;
        if !listing.is_empty() {
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn manager(&self) -> &TaskManager<C> {
        &self.manager
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Consumes the driver, returning the manager.
    pub fn into_manager(self) -> TaskManager<C> {
        self.manager
    }
}
