//! Core use-case services.
//!
//! # Responsibility
//! - Enforce cross-entity rules above the plain entity records.
//! - Keep callers (CLI, tests) decoupled from table layout.

pub mod workspace;
