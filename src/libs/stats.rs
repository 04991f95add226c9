//! Completion statistics over a set of tasks.
//!
//! ```text
//! completion_rate = completed / total * 100   (0 when there are no tasks)
//! pending         = total - completed
//! ```
//!
//! Overdue tasks are counted relative to an explicit reference time so the
//! numbers are reproducible.

use super::task::{Priority, Task};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Task counts per priority. Every bucket exists even when it is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage in the 0.0..=100.0 range.
    pub completion_rate: f64,
    pub by_priority: PriorityCounts,
    pub overdue: usize,
}

/// Computes [`Statistics`] for `tasks` as seen at `now`.
///
/// # Examples
///
/// ```rust
/// use doable::libs::stats::statistics;
///
/// let stats = statistics(&[], chrono::Local::now().naive_local());
/// assert_eq!(stats.total, 0);
/// assert_eq!(stats.completion_rate, 0.0);
/// ```
pub fn statistics(tasks: &[Task], now: NaiveDateTime) -> Statistics {
    let mut by_priority = PriorityCounts::default();
    let mut completed = 0;
    let mut overdue = 0;

    for task in tasks {
        by_priority.bump(task.priority);
        if task.completed {
            completed += 1;
        }
        if task.is_overdue(now) {
            overdue += 1;
        }
    }

    let total = tasks.len();
    let completion_rate = if total > 0 { completed as f64 / total as f64 * 100.0 } else { 0.0 };

    Statistics {
        total,
        completed,
        pending: total - completed,
        completion_rate,
        by_priority,
        overdue,
    }
}
