//! Error type shared by containers, tasks, and the driver.

use thiserror::Error;

use crate::container::Discipline;

/// Errors raised by task construction and container access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    /// `peek` or `pop` on a container holding no tasks.
    #[error("{operation} on empty {discipline}")]
    EmptyContainer {
        discipline: Discipline,
        operation: &'static str,
    },

    /// A negative, NaN, or infinite duration was supplied for a task.
    #[error("invalid duration for task '{name}': {duration}")]
    InvalidDuration { name: String, duration: f64 },

    /// Driver or CLI configuration that cannot be run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
