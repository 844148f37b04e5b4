//! Task model and default-name factory.
//!
//! A task is a named unit of work with a remaining-time estimate in
//! seconds. The estimate only ever shrinks, and only the manager
//! shrinks it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};
use crate::validation::validate_duration;

/// Upper bound (exclusive) for randomly drawn durations, in seconds.
pub const MAX_RANDOM_DURATION: u32 = 47;

/// A named unit of work with a remaining-time estimate.
///
/// # Time Representation
/// Remaining time is in seconds on the same clock the manager is driven
/// with. It is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    name: String,
    remaining_secs: f64,
}

#[derive(Deserialize)]
struct RawTask {
    name: String,
    remaining_secs: f64,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskError;

    fn try_from(raw: RawTask) -> Result<Self> {
        Task::new(raw.name, raw.remaining_secs)
    }
}

impl Task {
    /// Creates a task with an explicit duration (seconds).
    ///
    /// Fails with [`TaskError::InvalidDuration`] when the duration is
    /// negative or not finite.
    pub fn new(name: impl Into<String>, duration_secs: f64) -> Result<Self> {
        let name = name.into();
        let remaining_secs = validate_duration(&name, duration_secs)?;
        Ok(Self {
            name,
            remaining_secs,
        })
    }

    /// Creates a task whose duration is a whole number of seconds drawn
    /// uniformly from `[0, MAX_RANDOM_DURATION)`.
    pub fn with_random_duration<R: Rng>(name: impl Into<String>, rng: &mut R) -> Self {
        Self {
            name: name.into(),
            remaining_secs: f64::from(rng.random_range(0..MAX_RANDOM_DURATION)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining time in seconds.
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    pub(crate) fn set_remaining_secs(&mut self, secs: f64) {
        debug_assert!(secs >= 0.0, "remaining time went negative: {secs}");
        self.remaining_secs = secs.max(0.0);
    }
}

/// Produces tasks with sequential default names (`Task #0`, `Task #1`, ...).
///
/// Owns its own counter and random source; two factories never share
/// state. Names from one factory are never repeated.
///
/// # Example
/// ```
/// use u_taskman::models::TaskFactory;
///
/// let mut factory = TaskFactory::seeded(7);
/// assert_eq!(factory.next_task().name(), "Task #0");
/// assert_eq!(factory.next_task().name(), "Task #1");
/// ```
#[derive(Debug, Clone)]
pub struct TaskFactory {
    counter: u64,
    rng: StdRng,
}

impl TaskFactory {
    /// Creates a factory seeded from the operating system.
    pub fn new() -> Self {
        Self {
            counter: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a factory with a fixed seed (reproducible durations).
    pub fn seeded(seed: u64) -> Self {
        Self {
            counter: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates the next default-named task with a random duration.
    pub fn next_task(&mut self) -> Task {
        let name = format!("Task #{}", self.counter);
        self.counter += 1;
        Task::with_random_duration(name, &mut self.rng)
    }

    /// Creates a named task with a random duration from this factory's source.
    pub fn named(&mut self, name: impl Into<String>) -> Task {
        Task::with_random_duration(name, &mut self.rng)
    }

    /// Number of tasks generated by [`next_task`](Self::next_task) so far.
    pub fn generated(&self) -> u64 {
        self.counter
    }
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self::new()
    }
}
