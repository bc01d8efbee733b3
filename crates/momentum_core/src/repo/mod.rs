//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the task collection.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes normalize input before any SQL mutation.
//! - Repository reads reject malformed persisted rows instead of masking
//!   them.

pub mod task_repo;
