//! Task orchestration facade.
//!
//! # Responsibility
//! - Own the in-memory cache of the current task list and its readiness flag.
//! - Route every mutation through the store and resynchronize by re-fetching.
//! - Expose stats and ranked views as on-demand projections of the cache.
//!
//! # Invariants
//! - The cache only ever reflects a completed store round-trip; mutations
//!   never patch it optimistically.
//! - Readiness transitions `NotReady -> Ready` once, on the first completed
//!   refresh, success or failure; it never transitions back.
//! - Store failures are logged and swallowed; the cache keeps its last
//!   successfully loaded value.

use crate::model::task::{NewTask, Task, TaskId, TaskStats};
use crate::rank::rank_top_priorities;
use crate::repo::task_repo::TaskRepository;
use crate::stats::compute_stats;
use log::{error, info, warn};

/// Result of submitting a create payload through the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTaskOutcome {
    /// The task was persisted and the cache refreshed.
    Added(TaskId),
    /// The trimmed title was empty; nothing was written.
    RejectedEmptyTitle,
    /// The store reported a failure; the cache kept its prior value.
    StoreFailed,
}

/// Stateful facade over the task store, consumed by presentation code.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    ready: bool,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a facade with an empty, not-yet-ready cache.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            ready: false,
        }
    }

    /// Reloads the task list from the store and replaces the cache.
    ///
    /// On failure the cache keeps its last known good value. Either way the
    /// facade is ready afterwards.
    pub fn refresh(&mut self) -> &[Task] {
        match self.repo.list() {
            Ok(tasks) => {
                info!(
                    "event=tasks_refresh module=service status=ok count={}",
                    tasks.len()
                );
                self.tasks = tasks;
            }
            Err(err) => {
                error!("event=tasks_refresh module=service status=error error={err}");
            }
        }
        self.ready = true;
        &self.tasks
    }

    /// Persists a new task and resynchronizes the cache.
    ///
    /// An empty trimmed title is surfaced as a non-fatal rejection rather
    /// than an error; no record is written.
    pub fn add_task(&mut self, payload: NewTask) -> AddTaskOutcome {
        match self.repo.create(&payload) {
            Ok(Some(id)) => {
                info!("event=task_add module=service status=ok id={id}");
                self.refresh();
                AddTaskOutcome::Added(id)
            }
            Ok(None) => {
                warn!("event=task_add module=service status=rejected reason=empty_title");
                AddTaskOutcome::RejectedEmptyTitle
            }
            Err(err) => {
                error!("event=task_add module=service status=error error={err}");
                AddTaskOutcome::StoreFailed
            }
        }
    }

    /// Flips one task's completion flag and resynchronizes the cache.
    ///
    /// Unknown ids are a store-level no-op; store failures leave the cache
    /// untouched.
    pub fn toggle_completion(&mut self, id: TaskId, completed: bool) -> &[Task] {
        match self.repo.set_completed(id, completed) {
            Ok(()) => {
                info!(
                    "event=task_toggle module=service status=ok id={id} completed={completed}"
                );
                self.refresh();
            }
            Err(err) => {
                error!("event=task_toggle module=service status=error id={id} error={err}");
            }
        }
        &self.tasks
    }

    /// Deletes one task and resynchronizes the cache.
    pub fn delete_task(&mut self, id: TaskId) -> &[Task] {
        match self.repo.delete(id) {
            Ok(()) => {
                info!("event=task_delete module=service status=ok id={id}");
                self.refresh();
            }
            Err(err) => {
                error!("event=task_delete module=service status=error id={id} error={err}");
            }
        }
        &self.tasks
    }

    /// Current cached task list, ordered by `id` descending.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the first load attempt has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Aggregate stats computed fresh from the current cache.
    pub fn stats(&self) -> TaskStats {
        compute_stats(&self.tasks)
    }

    /// Ranked incomplete tasks computed fresh from the current cache.
    pub fn top_priorities(&self) -> Vec<Task> {
        rank_top_priorities(&self.tasks)
    }
}
