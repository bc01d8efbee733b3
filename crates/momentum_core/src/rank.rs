//! Prioritization ranking for incomplete tasks.
//!
//! # Responsibility
//! - Order incomplete tasks for "top priorities" surfacing.
//!
//! # Invariants
//! - Pure and synchronous: no I/O, deterministic for a given input.
//! - Equal (priority, impact) pairs keep their relative input order, so
//!   output is stable across calls. Truncating to a display prefix is the
//!   caller's concern.

use crate::model::task::Task;

/// Returns incomplete tasks ordered by priority descending, ties broken by
/// impact descending.
pub fn rank_top_priorities(tasks: &[Task]) -> Vec<Task> {
    let mut open: Vec<Task> = tasks
        .iter()
        .filter(|task| !task.completed)
        .cloned()
        .collect();

    open.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.impact.cmp(&a.impact))
    });

    open
}
