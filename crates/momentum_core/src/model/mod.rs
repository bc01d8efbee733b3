//! Domain model for the task tracker.
//!
//! # Responsibility
//! - Define the canonical task record and its creation payload.
//! - Define derived aggregate shapes consumed by presentation layers.
//!
//! # Invariants
//! - Every persisted task is identified by a stable store-assigned `TaskId`.
//! - Input normalization (title/micro-task trimming) lives here, so all
//!   write paths share one rule set.

pub mod suggestion;
pub mod task;
