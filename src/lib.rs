//! Simulated-time task manager for the U-Engine ecosystem.
//!
//! Holds named tasks with remaining-time estimates and completes them in
//! FIFO or LIFO order as a clock advances. One tick may finish zero, one,
//! or several tasks.
//!
//! # Modules
//!
//! - **`models`**: `Task` and the default-name `TaskFactory`
//! - **`container`**: `TaskContainer` trait, `TaskQueue` (FIFO),
//!   `TaskStack` (LIFO), and the `Container` enum over both
//! - **`scheduler`**: `TaskManager`, `TickReport`, `ManagerStats`, `TaskListing`
//! - **`driver`**: clock abstraction and the tick loop
//! - **`validation`**: duration and configuration checks
//!
//! # Example
//!
//! ```
//! use u_taskman::container::Discipline;
//! use u_taskman::models::Task;
//! use u_taskman::scheduler::TaskManager;
//!
//! let mut manager = TaskManager::new(Discipline::Lifo);
//! manager.add_task(Task::new("a", 10.0).unwrap());
//! manager.add_task(Task::new("b", 3.0).unwrap());
//!
//! let report = manager.update(4.0);
//! assert_eq!(report.completed_names(), vec!["b"]);
//! assert_eq!(manager.list_tasks()[0].remaining_secs(), 9.0);
//! ```

pub mod container;
pub mod driver;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TaskError};
