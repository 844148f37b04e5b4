//! Task manager, tick reports, and listing.
//!
//! Provides the stateful manager that advances a container along a
//! seconds clock, plus per-tick and cumulative reporting.
//!
//! # Algorithm
//!
//! `TaskManager::update` consumes the time elapsed since the previous
//! tick against the container head, completing as many tasks as the
//! interval covers and shortening the next one with whatever is left.
//!
//! # Reporting
//!
//! `TickReport` lists what completed in one tick; `ManagerStats`
//! accumulates ticks, completions, simulated and idle time.

mod listing;
mod manager;
mod stats;

pub use listing::{format_secs, TaskListing};
pub use manager::TaskManager;
pub use stats::{ManagerStats, TickReport};
