//! FIFO task queue.

use std::collections::vec_deque::{self, VecDeque};

use super::{empty, Discipline, TaskContainer};
use crate::error::Result;
use crate::models::Task;

/// First-in, first-out task container.
///
/// Tasks are pushed at the tail and popped from the head, so they
/// complete in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }
}

impl TaskContainer for TaskQueue {
    type Iter<'a> = vec_deque::Iter<'a, Task>;

    fn discipline(&self) -> Discipline {
        Discipline::Fifo
    }

    fn size(&self) -> usize {
        self.tasks.len()
    }

    fn peek(&self) -> Result<&Task> {
        self.tasks
            .front()
            .ok_or_else(|| empty(Discipline::Fifo, "peek"))
    }

    fn peek_mut(&mut self) -> Result<&mut Task> {
        self.tasks
            .front_mut()
            .ok_or_else(|| empty(Discipline::Fifo, "peek"))
    }

    fn pop(&mut self) -> Result<Task> {
        self.tasks
            .pop_front()
            .ok_or_else(|| empty(Discipline::Fifo, "pop"))
    }

    fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.tasks.iter()
    }
}

impl FromIterator<Task> for TaskQueue {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut queue = TaskQueue::new();
        for task in iter {
            queue.push(task);
        }
        queue
    }
}
