//! Core domain logic for Momentum, a single-user task tracker.
//! This crate is the single source of truth for task persistence and
//! derived-progress invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod rank;
pub mod repo;
pub mod service;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::suggestion::TaskSuggestion;
pub use model::task::{NewTask, Task, TaskId, TaskStats};
pub use rank::rank_top_priorities;
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{AddTaskOutcome, TaskService};
pub use stats::compute_stats;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
