//! Text rendering of pending tasks.

use std::fmt;

use super::TaskManager;
use crate::container::TaskContainer;
use crate::models::Task;

/// Displayable snapshot of a manager's pending tasks, in completion order.
///
/// ```text
/// There are 2 tasks to do
/// a: 10s left
/// b: 3s left
/// ```
///
/// An empty snapshot renders as `There isnt any task`. Remaining times
/// are printed with six significant digits (see [`format_secs`]).
#[derive(Debug, Clone)]
pub struct TaskListing<'a> {
    tasks: Vec<&'a Task>,
}

impl<'a> TaskListing<'a> {
    pub fn new(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl fmt::Display for TaskListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return writeln!(f, "There isnt any task");
        }
        writeln!(f, "There are {} tasks to do", self.tasks.len())?;
        for task in &self.tasks {
            writeln!(f, "{}: {}s left", task.name(), format_secs(task.remaining_secs()))?;
        }
        Ok(())
    }
}

const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats seconds with six significant digits, shortest form.
///
/// Trailing zeros are dropped; magnitudes below `1e-4` or from `1e6` up
/// switch to exponent notation (`1.23457e+06`).
pub fn format_secs(secs: f64) -> String {
    if !secs.is_finite() {
        return secs.to_string();
    }

    // Rounding to the digit budget first fixes the exponent (9.9999996 -> 1e1).
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, secs);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..SIGNIFICANT_DIGITS).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs());
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exp) as usize;
    trim_fraction(&format!("{secs:.decimals$}")).to_string()
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

impl<C: TaskContainer> TaskManager<C> {
    /// Snapshot of pending tasks for display.
    pub fn listing(&self) -> TaskListing<'_> {
        TaskListing::new(self.tasks())
    }
}
