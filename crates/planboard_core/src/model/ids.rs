//! Entity identifiers and kind tags.
//!
//! # Invariants
//! - Ids are plain integers assigned monotonically by their owning allocator.
//! - An id is never reassigned to another entity within one workspace.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Workspace-local user identifier.
    UserId
);
entity_id!(
    /// Workspace-local project identifier.
    ProjectId
);
entity_id!(
    /// Process-wide task identifier drawn from `TaskIdAllocator`.
    TaskId
);

/// Kind tag for the three entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tagged reference used by the generic attach entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    User(UserId),
    Project(ProjectId),
    Task(TaskId),
}

impl EntityRef {
    pub fn kind(self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Project(_) => EntityKind::Project,
            Self::Task(_) => EntityKind::Task,
        }
    }
}

impl From<UserId> for EntityRef {
    fn from(value: UserId) -> Self {
        Self::User(value)
    }
}

impl From<ProjectId> for EntityRef {
    fn from(value: ProjectId) -> Self {
        Self::Project(value)
    }
}

impl From<TaskId> for EntityRef {
    fn from(value: TaskId) -> Self {
        Self::Task(value)
    }
}
