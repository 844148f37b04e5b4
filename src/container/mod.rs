//! Ordered task containers.
//!
//! A container holds tasks in the order they will complete. Two
//! disciplines are provided:
//!
//! | Discipline | Type | Push | Pop | Completion order |
//! |------------|------|------|-----|------------------|
//! | FIFO | [`TaskQueue`] | tail | head | insertion order |
//! | LIFO | [`TaskStack`] | top | top | reverse insertion order |
//!
//! [`Container`] is the closed set of both, chosen at runtime from a
//! [`Discipline`].
//!
//! # Usage
//!
//! ```
//! use u_taskman::container::{Container, Discipline, TaskContainer};
//! use u_taskman::models::Task;
//!
//! let mut stack = Container::new(Discipline::Lifo);
//! stack.push(Task::new("first", 1.0).unwrap());
//! stack.push(Task::new("second", 2.0).unwrap());
//! assert_eq!(stack.peek().unwrap().name(), "second");
//! ```

mod queue;
mod stack;

pub use queue::TaskQueue;
pub use stack::TaskStack;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};
use crate::models::Task;

/// Completion-order policy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// First in, first out.
    #[default]
    Fifo,
    /// Last in, first out.
    Lifo,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Fifo => f.write_str("queue"),
            Discipline::Lifo => f.write_str("stack"),
        }
    }
}

/// An ordered collection of tasks with a fixed completion discipline.
///
/// # Contract
/// - `size()` always equals the number of stored tasks.
/// - `peek`/`pop` fail with [`TaskError::EmptyContainer`] when empty and
///   leave the container untouched.
/// - `push` never reorders tasks already stored.
/// - `iter()` yields tasks in completion order, starting with `peek()`.
pub trait TaskContainer {
    /// Iterator over stored tasks in completion order.
    type Iter<'a>: Iterator<Item = &'a Task>
    where
        Self: 'a;

    /// The discipline this container follows.
    fn discipline(&self) -> Discipline;

    /// Number of stored tasks.
    fn size(&self) -> usize;

    /// The next task to complete, without removing it.
    fn peek(&self) -> Result<&Task>;

    /// Mutable access to the next task to complete.
    fn peek_mut(&mut self) -> Result<&mut Task>;

    /// Removes and returns the next task to complete.
    fn pop(&mut self) -> Result<Task>;

    /// Stores a task according to the discipline.
    fn push(&mut self, task: Task);

    /// Stored tasks in completion order.
    fn iter(&self) -> Self::Iter<'_>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

pub(crate) fn empty(discipline: Discipline, operation: &'static str) -> TaskError {
    TaskError::EmptyContainer {
        discipline,
        operation,
    }
}

/// A container of either discipline.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Queue(TaskQueue),
    Stack(TaskStack),
}

impl Container {
    /// Creates an empty container for the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Fifo => Container::Queue(TaskQueue::new()),
            Discipline::Lifo => Container::Stack(TaskStack::new()),
        }
    }
}

impl From<TaskQueue> for Container {
    fn from(queue: TaskQueue) -> Self {
        Container::Queue(queue)
    }
}

impl From<TaskStack> for Container {
    fn from(stack: TaskStack) -> Self {
        Container::Stack(stack)
    }
}

/// Completion-order iterator over a [`Container`].
#[derive(Debug, Clone)]
pub enum ContainerIter<'a> {
    Queue(<TaskQueue as TaskContainer>::Iter<'a>),
    Stack(<TaskStack as TaskContainer>::Iter<'a>),
}

impl<'a> Iterator for ContainerIter<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ContainerIter::Queue(it) => it.next(),
            ContainerIter::Stack(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ContainerIter::Queue(it) => it.size_hint(),
            ContainerIter::Stack(it) => it.size_hint(),
        }
    }
}

impl TaskContainer for Container {
    type Iter<'a> = ContainerIter<'a>;

    fn discipline(&self) -> Discipline {
        match self {
            Container::Queue(q) => q.discipline(),
            Container::Stack(s) => s.discipline(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Container::Queue(q) => q.size(),
            Container::Stack(s) => s.size(),
        }
    }

    fn peek(&self) -> Result<&Task> {
        match self {
            Container::Queue(q) => q.peek(),
            Container::Stack(s) => s.peek(),
        }
    }

    fn peek_mut(&mut self) -> Result<&mut Task> {
        match self {
            Container::Queue(q) => q.peek_mut(),
            Container::Stack(s) => s.peek_mut(),
        }
    }

    fn pop(&mut self) -> Result<Task> {
        match self {
            Container::Queue(q) => q.pop(),
            Container::Stack(s) => s.pop(),
        }
    }

    fn push(&mut self, task: Task) {
        match self {
            Container::Queue(q) => q.push(task),
            Container::Stack(s) => s.push(task),
        }
    }

    fn iter(&self) -> ContainerIter<'_> {
        match self {
            Container::Queue(q) => ContainerIter::Queue(q.iter()),
            Container::Stack(s) => ContainerIter::Stack(s.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, secs: f64) -> Task {
        Task::new(name, secs).unwrap()
    }

    fn names<C: TaskContainer>(c: &C) -> Vec<String> {
        c.iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn test_new_matches_discipline() {
        assert_eq!(Container::new(Discipline::Fifo).discipline(), Discipline::Fifo);
        assert_eq!(Container::new(Discipline::Lifo).discipline(), Discipline::Lifo);
        assert!(matches!(Container::new(Discipline::Fifo), Container::Queue(_)));
        assert!(matches!(Container::new(Discipline::Lifo), Container::Stack(_)));
    }

    #[test]
    fn test_fifo_order() {
        let mut c = Container::new(Discipline::Fifo);
        for name in ["t1", "t2", "t3"] {
            c.push(task(name, 1.0));
        }
        assert_eq!(names(&c), vec!["t1", "t2", "t3"]);
        let popped: Vec<String> = (0..3).map(|_| c.pop().unwrap().name().to_string()).collect();
        assert_eq!(popped, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_lifo_order() {
        let mut c = Container::new(Discipline::Lifo);
        for name in ["t1", "t2", "t3"] {
            c.push(task(name, 1.0));
        }
        assert_eq!(names(&c), vec!["t3", "t2", "t1"]);
        let popped: Vec<String> = (0..3).map(|_| c.pop().unwrap().name().to_string()).collect();
        assert_eq!(popped, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_size_tracks_push_pop() {
        for discipline in [Discipline::Fifo, Discipline::Lifo] {
            let mut c = Container::new(discipline);
            let mut pushes = 0;
            let mut pops = 0;
            for i in 0..10 {
                c.push(task(&format!("t{i}"), 1.0));
                pushes += 1;
                if i % 3 == 0 && c.pop().is_ok() {
                    pops += 1;
                }
                assert_eq!(c.size(), pushes - pops);
            }
            while c.pop().is_ok() {
                pops += 1;
            }
            assert_eq!(c.size(), 0);
            assert_eq!(pushes, pops);
            assert!(c.pop().is_err());
            assert_eq!(c.size(), 0);
        }
    }

    #[test]
    fn test_empty_errors() {
        let mut c = Container::new(Discipline::Lifo);
        assert_eq!(
            c.peek().unwrap_err(),
            TaskError::EmptyContainer {
                discipline: Discipline::Lifo,
                operation: "peek"
            }
        );
        assert!(c.peek_mut().is_err());
        assert_eq!(c.pop().unwrap_err().to_string(), "pop on empty stack");
        assert!(c.is_empty());
        assert_eq!(c.iter().count(), 0);
    }

    #[test]
    fn test_peek_mut_edits_head() {
        let mut c = Container::new(Discipline::Fifo);
        c.push(task("a", 5.0));
        c.push(task("b", 3.0));
        c.peek_mut().unwrap().set_remaining_secs(1.0);
        assert_eq!(c.peek().unwrap().remaining_secs(), 1.0);
        assert_eq!(c.iter().nth(1).unwrap().remaining_secs(), 3.0);
    }

    #[test]
    fn test_from_variants() {
        let mut q = TaskQueue::new();
        q.push(task("a", 1.0));
        let c: Container = q.into();
        assert_eq!(c.size(), 1);
        assert_eq!(Container::from(TaskStack::new()).discipline(), Discipline::Lifo);
    }

    #[test]
    fn test_discipline_display_and_serde() {
        assert_eq!(Discipline::Fifo.to_string(), "queue");
        assert_eq!(Discipline::Lifo.to_string(), "stack");
        assert_eq!(serde_json::to_string(&Discipline::Lifo).unwrap(), "\"lifo\"");
        let d: Discipline = serde_json::from_str("\"fifo\"").unwrap();
        assert_eq!(d, Discipline::Fifo);
    }
}
