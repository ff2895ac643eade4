//! In-process registries backing entity identity.
//!
//! # Responsibility
//! - Own process-wide identity state behind explicit allocate/release calls.
//!
//! # Invariants
//! - Registries are owned values; there is no ambient global state.

pub mod task_ids;
