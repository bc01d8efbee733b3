//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and the payload used to create one.
//! - Normalize free-text input before it reaches persistence.
//!
//! # Invariants
//! - `id` is assigned by the store, strictly increasing, never reused.
//! - A task with an empty trimmed title must never be persisted.
//! - A blank micro-task is stored as absent, not as an empty string.

use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Priority applied when a create payload leaves it unspecified.
pub const DEFAULT_PRIORITY: i64 = 1;

/// Persisted task record.
///
/// Fields serialize in camelCase so presentation/FFI layers see the same
/// shape the table columns describe (`microTask` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable surrogate key, ordered by creation time.
    pub id: TaskId,
    /// Non-empty title, trimmed before storage.
    pub title: String,
    /// Intended range 1-10; the store accepts any integer.
    pub impact: i64,
    /// Smallest concrete next step toward completion, if captured.
    pub micro_task: Option<String>,
    /// Completion toggle; the only mutable field after creation.
    pub completed: bool,
    /// Intended range 1-10, defaulted to 1 at creation.
    pub priority: i64,
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub impact: i64,
    /// `None` falls back to [`DEFAULT_PRIORITY`].
    pub priority: Option<i64>,
    pub micro_task: Option<String>,
}

impl NewTask {
    /// Returns the trimmed title, or `None` when nothing remains.
    ///
    /// A `None` here means the payload must be rejected without a write.
    pub fn normalized_title(&self) -> Option<String> {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Returns the trimmed micro-task, with blank input collapsed to `None`.
    pub fn normalized_micro_task(&self) -> Option<String> {
        self.micro_task
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Returns the priority to persist.
    pub fn effective_priority(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }
}

/// Aggregate progress metrics derived from the full task collection.
///
/// Never persisted; recomputed from the current collection on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Count of all tasks.
    pub total: usize,
    /// Count of completed tasks.
    pub completed: usize,
    /// `round(completed / total * 100)`; 0 for an empty collection.
    pub completion_rate: i64,
    /// Mean impact rounded to one decimal; 0.0 for an empty collection.
    pub average_impact: f64,
    /// `min(100, completed * 12 + total_impact * 2)`; 0 for an empty collection.
    pub momentum_score: i64,
}

impl TaskStats {
    /// Stats for an empty collection; all metrics are zero.
    pub fn empty() -> Self {
        Self {
            total: 0,
            completed: 0,
            completion_rate: 0,
            average_impact: 0.0,
            momentum_score: 0,
        }
    }
}
