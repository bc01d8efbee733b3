//! Suggestion payload consumed from the remote suggestion collaborator.
//!
//! The fetching call itself lives outside this crate. A suggestion carries
//! no contract into the store beyond converting into an ordinary create
//! payload when the user accepts it.

use crate::model::task::NewTask;
use serde::Deserialize;

/// Prefill record offered to the user during task creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSuggestion {
    pub title: String,
    pub impact: i64,
    pub priority: i64,
    pub micro_task: String,
}

impl From<TaskSuggestion> for NewTask {
    fn from(suggestion: TaskSuggestion) -> Self {
        Self {
            title: suggestion.title,
            impact: suggestion.impact,
            priority: Some(suggestion.priority),
            micro_task: Some(suggestion.micro_task),
        }
    }
}
