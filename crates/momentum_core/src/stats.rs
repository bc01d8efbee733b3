//! Aggregate progress metrics.
//!
//! # Responsibility
//! - Derive [`TaskStats`] from the current task collection.
//!
//! # Invariants
//! - Pure and synchronous: no I/O, deterministic for a given input.
//! - An empty collection yields all-zero stats, never a division error.

use crate::model::task::{Task, TaskStats};

/// Upper bound on the momentum score.
const MOMENTUM_CAP: i64 = 100;

/// Computes aggregate stats over the full task collection.
pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    if tasks.is_empty() {
        return TaskStats::empty();
    }

    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let total_impact: i64 = tasks.iter().map(|task| task.impact).sum();

    let completion_rate = ((completed as f64 / total as f64) * 100.0).round() as i64;
    let average_impact = (total_impact as f64 / total as f64 * 10.0).round() / 10.0;
    let momentum_score = (completed as i64 * 12 + total_impact * 2).min(MOMENTUM_CAP);

    TaskStats {
        total,
        completed,
        completion_rate,
        average_impact,
        momentum_score,
    }
}
