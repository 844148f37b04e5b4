//! Per-tick reports and cumulative manager statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Ticks | Calls to `update`, including rejected backwards readings |
//! | Completed | Tasks popped as finished |
//! | Simulated time | Sum of accepted elapsed intervals |
//! | Idle time | Elapsed time that found no task to consume it |
//! | Pending work | Sum of remaining time still queued |

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Outcome of a single `update` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Clock reading passed to `update` (seconds).
    pub now_secs: f64,
    /// Time consumed by this tick (seconds); zero for rejected readings.
    pub elapsed_secs: f64,
    /// Tasks completed during the tick, in completion order.
    pub completed: Vec<Task>,
    /// Elapsed time left over after the container ran empty (seconds).
    pub leftover_secs: f64,
}

impl TickReport {
    pub(crate) fn new(now_secs: f64, elapsed_secs: f64) -> Self {
        Self {
            now_secs,
            elapsed_secs,
            completed: Vec::new(),
            leftover_secs: 0.0,
        }
    }

    /// Number of tasks completed in this tick.
    pub fn completion_count(&self) -> usize {
        self.completed.len()
    }

    /// Names of the completed tasks, in completion order.
    pub fn completed_names(&self) -> Vec<&str> {
        self.completed.iter().map(Task::name).collect()
    }

    /// Whether no task completed.
    pub fn is_idle(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Cumulative statistics for a task manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerStats {
    /// Number of `update` calls.
    pub ticks: u64,
    /// Tasks completed so far.
    pub completed: u64,
    /// Total accepted elapsed time (seconds).
    pub simulated_secs: f64,
    /// Elapsed time during which no task was pending (seconds).
    pub idle_secs: f64,
    /// Tasks still pending.
    pub pending: usize,
    /// Remaining time across pending tasks (seconds).
    pub pending_work_secs: f64,
}

impl ManagerStats {
    pub(crate) fn record(&mut self, report: &TickReport) {
        self.completed += report.completion_count() as u64;
        self.simulated_secs += report.elapsed_secs;
        self.idle_secs += report.leftover_secs;
    }

    /// Fraction of simulated time spent working on tasks (`0.0..=1.0`).
    ///
    /// Returns 0.0 before any time has elapsed.
    pub fn utilization(&self) -> f64 {
        if self.simulated_secs > 0.0 {
            (self.simulated_secs - self.idle_secs) / self.simulated_secs
        } else {
            0.0
        }
    }
}
