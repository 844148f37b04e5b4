//! Task manager: elapsed-time completion over one container.
//!
//! # Algorithm
//!
//! On each tick the manager computes `delta = now - last_tick` and feeds
//! it to the container head:
//!
//! 1. If `delta` is smaller than the head's remaining time, the head is
//!    shortened by `delta` and the tick ends.
//! 2. Otherwise the head's remaining time is subtracted from `delta`, the
//!    head is popped as completed, and the loop continues.
//!
//! A head whose remaining time equals `delta` completes. Several tasks
//! may complete within one tick.
//!
//! # Complexity
//! O(k) per tick where k = tasks completed in that tick.

use tracing::{debug, trace, warn};

use super::stats::{ManagerStats, TickReport};
use crate::container::{Container, Discipline, TaskContainer};
use crate::error::Result;
use crate::models::Task;
use crate::validation::validate_start_time;

/// Owns one task container and advances it along a seconds clock.
///
/// The container type is fixed for the manager's lifetime.
///
/// # Example
///
/// ```
/// use u_taskman::container::Discipline;
/// use u_taskman::models::Task;
/// use u_taskman::scheduler::TaskManager;
///
/// let mut manager = TaskManager::new(Discipline::Fifo);
/// manager.add_task(Task::new("a", 5.0).unwrap());
/// manager.add_task(Task::new("b", 3.0).unwrap());
///
/// let report = manager.update(6.0);
/// assert_eq!(report.completed_names(), vec!["a"]);
/// assert_eq!(manager.list_tasks()[0].remaining_secs(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct TaskManager<C = Container> {
    container: C,
    last_tick_secs: f64,
    stats: ManagerStats,
}

impl TaskManager<Container> {
    /// Creates a manager with an empty container of the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        Self::with_container(Container::new(discipline))
    }
}

impl<C: TaskContainer> TaskManager<C> {
    /// Creates a manager around an existing container.
    pub fn with_container(container: C) -> Self {
        Self {
            container,
            last_tick_secs: 0.0,
            stats: ManagerStats::default(),
        }
    }

    /// Sets the clock reading that the first tick measures from.
    ///
    /// Defaults to `0.0`, which assumes the driving clock starts at zero.
    /// Fails with `InvalidConfig` for NaN or infinite readings.
    pub fn with_start_time(mut self, start_secs: f64) -> Result<Self> {
        self.last_tick_secs = validate_start_time(start_secs)?;
        Ok(self)
    }

    /// Adds a task according to the container's discipline.
    pub fn add_task(&mut self, task: Task) {
        trace!(task = task.name(), remaining = task.remaining_secs(), "task added");
        self.container.push(task);
    }

    /// Removes the next-to-complete task without completing it.
    ///
    /// Fails with `EmptyContainer` when there is nothing to remove.
    pub fn delete_last_task(&mut self) -> Result<Task> {
        let task = self.container.pop()?;
        debug!(task = task.name(), "task deleted");
        Ok(task)
    }

    /// Advances the clock to `now_secs`, completing tasks as time allows.
    ///
    /// A reading earlier than the previous one (or NaN) counts as no
    /// elapsed time: tasks are left alone and the last tick time is kept,
    /// so the skipped interval is not consumed twice.
    pub fn update(&mut self, now_secs: f64) -> TickReport {
        self.stats.ticks += 1;

        let elapsed = now_secs - self.last_tick_secs;
        if elapsed.is_nan() || elapsed < 0.0 {
            warn!(
                now = now_secs,
                last = self.last_tick_secs,
                "clock moved backwards; treating tick as zero elapsed"
            );
            return TickReport::new(now_secs, 0.0);
        }
        self.last_tick_secs = now_secs;

        let mut report = TickReport::new(now_secs, elapsed);
        let mut delta = elapsed;

        while delta > 0.0 {
            let Ok(head) = self.container.peek_mut() else {
                break;
            };
            let remaining = head.remaining_secs();

            if delta < remaining {
                head.set_remaining_secs(remaining - delta);
                delta = 0.0;
                break;
            }

            delta -= remaining;
            let Ok(done) = self.container.pop() else {
                break;
            };
            debug!(task = done.name(), at = now_secs, "task completed");
            report.completed.push(done);
        }

        report.leftover_secs = delta;
        self.stats.record(&report);
        report
    }

    /// Tasks in completion order.
    pub fn list_tasks(&self) -> Vec<&Task> {
        self.container.iter().collect()
    }

    /// Iterator over tasks in completion order.
    pub fn tasks(&self) -> C::Iter<'_> {
        self.container.iter()
    }

    /// Number of pending tasks.
    pub fn size(&self) -> usize {
        self.container.size()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn discipline(&self) -> Discipline {
        self.container.discipline()
    }

    /// Clock reading of the last accepted tick (seconds).
    pub fn last_tick_secs(&self) -> f64 {
        self.last_tick_secs
    }

    /// Sum of remaining time across pending tasks (seconds).
    pub fn pending_work_secs(&self) -> f64 {
        self.container.iter().map(Task::remaining_secs).sum()
    }

    /// Cumulative statistics since construction.
    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            pending: self.size(),
            pending_work_secs: self.pending_work_secs(),
            ..self.stats.clone()
        }
    }

    /// Read access to the underlying container.
    pub fn container(&self) -> &C {
        &self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{TaskQueue, TaskStack};
    use crate::error::TaskError;

    fn task(name: &str, secs: f64) -> Task {
        Task::new(name, secs).unwrap()
    }

    fn manager_with(discipline: Discipline, tasks: &[(&str, f64)]) -> TaskManager {
        let mut manager = TaskManager::new(discipline);
        for &(name, secs) in tasks {
            manager.add_task(task(name, secs));
        }
        manager
    }

    fn remaining(manager: &TaskManager) -> Vec<(String, f64)> {
        manager
            .tasks()
            .map(|t| (t.name().to_string(), t.remaining_secs()))
            .collect()
    }

    #[test]
    fn test_partial_then_stop() {
        let mut m = manager_with(Discipline::Fifo, &[("task1", 5.0), ("task2", 3.0), ("task3", 2.0)]);
        let report = m.update(6.0);

        assert_eq!(report.completed_names(), vec!["task1"]);
        assert_eq!(report.elapsed_secs, 6.0);
        assert_eq!(report.leftover_secs, 0.0);
        assert_eq!(
            remaining(&m),
            vec![("task2".to_string(), 2.0), ("task3".to_string(), 2.0)]
        );
        assert_eq!(m.last_tick_secs(), 6.0);
    }

    #[test]
    fn test_multiple_completions_in_one_tick() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 1.0), ("b", 2.0), ("c", 4.0)]);
        let report = m.update(3.5);

        assert_eq!(report.completed_names(), vec!["a", "b"]);
        assert_eq!(remaining(&m), vec![("c".to_string(), 3.5)]);
    }

    #[test]
    fn test_exact_boundary_completes() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 4.0), ("b", 2.0)]);
        let report = m.update(4.0);

        assert_eq!(report.completed_names(), vec!["a"]);
        assert_eq!(remaining(&m), vec![("b".to_string(), 2.0)]);
    }

    #[test]
    fn test_lifo_completes_newest_first() {
        let mut m = manager_with(Discipline::Lifo, &[("old", 10.0), ("new", 3.0)]);
        let report = m.update(5.0);

        assert_eq!(report.completed_names(), vec!["new"]);
        assert_eq!(remaining(&m), vec![("old".to_string(), 8.0)]);
    }

    #[test]
    fn test_successive_ticks_use_delta() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 10.0)]);
        m.update(4.0);
        assert_eq!(m.list_tasks()[0].remaining_secs(), 6.0);
        let report = m.update(10.0);
        assert_eq!(report.elapsed_secs, 6.0);
        assert_eq!(report.completed_names(), vec!["a"]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_leftover_when_drained() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 1.0), ("b", 1.0)]);
        let report = m.update(5.0);
        assert_eq!(report.completion_count(), 2);
        assert_eq!(report.leftover_secs, 3.0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_update_on_empty_is_noop() {
        let mut m = TaskManager::new(Discipline::Lifo);
        let report = m.update(3.0);
        assert!(report.is_idle());
        assert_eq!(report.leftover_secs, 3.0);
        assert_eq!(m.last_tick_secs(), 3.0);
    }

    #[test]
    fn test_zero_elapsed_leaves_zero_duration_task() {
        let mut m = manager_with(Discipline::Fifo, &[("instant", 0.0)]);
        let report = m.update(0.0);
        assert!(report.is_idle());
        assert_eq!(m.size(), 1);

        let report = m.update(0.5);
        assert_eq!(report.completed_names(), vec!["instant"]);
        assert_eq!(report.leftover_secs, 0.5);
    }

    #[test]
    fn test_backwards_time_is_zero_elapsed() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 10.0)]);
        m.update(5.0);

        let report = m.update(2.0);
        assert!(report.is_idle());
        assert_eq!(report.elapsed_secs, 0.0);
        assert_eq!(m.last_tick_secs(), 5.0);
        assert_eq!(m.list_tasks()[0].remaining_secs(), 5.0);

        // The interval 2..5 is not consumed again.
        let report = m.update(7.0);
        assert_eq!(report.elapsed_secs, 2.0);
        assert_eq!(m.list_tasks()[0].remaining_secs(), 3.0);
    }

    #[test]
    fn test_nan_time_is_zero_elapsed() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 10.0)]);
        let report = m.update(f64::NAN);
        assert!(report.is_idle());
        assert_eq!(m.last_tick_secs(), 0.0);
        assert_eq!(m.list_tasks()[0].remaining_secs(), 10.0);
    }

    #[test]
    fn test_start_time_offset() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 3.0)])
            .with_start_time(100.0)
            .unwrap();
        let report = m.update(102.0);
        assert_eq!(report.elapsed_secs, 2.0);
        assert_eq!(m.list_tasks()[0].remaining_secs(), 1.0);
    }

    #[test]
    fn test_non_finite_start_time_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = TaskManager::new(Discipline::Fifo)
                .with_start_time(bad)
                .unwrap_err();
            assert!(matches!(err, TaskError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_delete_last_task() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 1.0), ("b", 2.0)]);
        assert_eq!(m.delete_last_task().unwrap().name(), "a");
        assert_eq!(m.size(), 1);

        let mut s = manager_with(Discipline::Lifo, &[("a", 1.0), ("b", 2.0)]);
        assert_eq!(s.delete_last_task().unwrap().name(), "b");
    }

    #[test]
    fn test_delete_on_empty_fails_without_mutation() {
        let mut m = TaskManager::new(Discipline::Fifo);
        let err = m.delete_last_task().unwrap_err();
        assert!(matches!(err, TaskError::EmptyContainer { .. }));
        assert_eq!(m.size(), 0);
        assert!(m.list_tasks().is_empty());
    }

    #[test]
    fn test_listing_is_idempotent() {
        let m = manager_with(Discipline::Lifo, &[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let first: Vec<Task> = m.list_tasks().into_iter().cloned().collect();
        let second: Vec<Task> = m.list_tasks().into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut m = manager_with(
            Discipline::Fifo,
            &[("a", 0.3), ("b", 0.7), ("c", 1.1), ("d", 2.9)],
        );
        let mut now = 0.0;
        while !m.is_empty() {
            now += 0.25;
            m.update(now);
            assert!(m.tasks().all(|t| t.remaining_secs() >= 0.0));
        }
    }

    #[test]
    fn test_generic_containers() {
        let mut q = TaskManager::with_container(TaskQueue::new());
        q.add_task(task("a", 1.0));
        q.add_task(task("b", 1.0));
        assert_eq!(q.update(1.0).completed_names(), vec!["a"]);

        let mut s = TaskManager::with_container(TaskStack::new());
        s.add_task(task("a", 1.0));
        s.add_task(task("b", 1.0));
        assert_eq!(s.update(1.0).completed_names(), vec!["b"]);
        assert_eq!(s.discipline(), Discipline::Lifo);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut m = manager_with(Discipline::Fifo, &[("a", 2.0), ("b", 2.0), ("c", 5.0)]);
        m.update(3.0);
        m.update(1.0);
        m.update(5.0);

        let stats = m.stats();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.simulated_secs, 5.0);
        assert_eq!(stats.idle_secs, 0.0);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.pending_work_secs, 4.0);
        assert_eq!(m.pending_work_secs(), 4.0);
    }
}
