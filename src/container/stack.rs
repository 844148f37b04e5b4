//! LIFO task stack.

use std::iter::Rev;
use std::slice;

use super::{empty, Discipline, TaskContainer};
use crate::error::Result;
use crate::models::Task;

/// Last-in, first-out task container.
///
/// The top of the stack is the end of the backing vector; iteration
/// walks from the top down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStack {
    tasks: Vec<Task>,
}

impl TaskStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl TaskContainer for TaskStack {
    type Iter<'a> = Rev<slice::Iter<'a, Task>>;

    fn discipline(&self) -> Discipline {
        Discipline::Lifo
    }

    fn size(&self) -> usize {
        self.tasks.len()
    }

    fn peek(&self) -> Result<&Task> {
        self.tasks
            .last()
            .ok_or_else(|| empty(Discipline::Lifo, "peek"))
    }

    fn peek_mut(&mut self) -> Result<&mut Task> {
        self.tasks
            .last_mut()
            .ok_or_else(|| empty(Discipline::Lifo, "peek"))
    }

    fn pop(&mut self) -> Result<Task> {
        self.tasks.pop().ok_or_else(|| empty(Discipline::Lifo, "pop"))
    }

    fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.tasks.iter().rev()
    }
}

impl FromIterator<Task> for TaskStack {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
