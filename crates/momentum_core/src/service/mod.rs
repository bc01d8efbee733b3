//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the facade consumed by presentation.
//! - Keep UI layers decoupled from storage details.

pub mod task_service;
