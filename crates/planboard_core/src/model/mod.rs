//! Entity model for the user → project → task hierarchy.
//!
//! # Responsibility
//! - Define the three entity records and their field-level rules.
//! - Keep cross-entity rules (membership, uniqueness, capacity) out of the
//!   records; those live in `service::workspace`.
//!
//! # Invariants
//! - Forward edges (`User::projects`, `Project::tasks`) are authoritative.
//! - Back-references (`Project::owner`, `Task::project`) are navigation only.

pub mod ids;
pub mod project;
pub mod task;
pub mod user;
pub mod validation;
