//! Task domain model.
//!
//! A [`Task`] is a named work item with a remaining-time estimate in
//! seconds. [`TaskFactory`] generates default-named tasks with random
//! durations from an owned counter and random source.

mod task;

pub use task::{Task, TaskFactory, MAX_RANDOM_DURATION};
