//! Core error taxonomy.
//!
//! # Responsibility
//! - Give every constraint failure one semantic variant callers can match.
//! - Carry enough ids/values to explain the rejection without re-querying.
//!
//! # Invariants
//! - An operation returning `Err` has not mutated workspace state.

use crate::model::ids::{EntityKind, ProjectId, TaskId, UserId};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by entity and workspace operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Field value broke a length, vocabulary or format rule.
    Validation(ValidationError),
    /// Container was handed an entity kind it cannot hold.
    WrongEntityKind {
        expected: EntityKind,
        found: EntityKind,
    },
    /// Entity is already a member of the target container.
    DuplicateMember {
        project_id: ProjectId,
        task_id: TaskId,
    },
    /// Project name collides inside the owning user's project set.
    NameTaken { user_id: UserId, name: String },
    /// Container already holds its configured maximum.
    CapacityExceeded { container: EntityKind, max: usize },
    /// Field is read-only after construction.
    ImmutableField(&'static str),
    /// Field name is not addressable.
    UnknownField(String),
    UserNotFound(UserId),
    ProjectNotFound(ProjectId),
    TaskNotFound(TaskId),
}

impl CoreError {
    /// Stable reason code for diagnostics; never carries user text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::WrongEntityKind { .. } => "wrong_entity_kind",
            Self::DuplicateMember { .. } => "duplicate_member",
            Self::NameTaken { .. } => "name_taken",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::ImmutableField(_) => "immutable_field",
            Self::UnknownField(_) => "unknown_field",
            Self::UserNotFound(_) | Self::ProjectNotFound(_) | Self::TaskNotFound(_) => {
                "not_found"
            }
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::WrongEntityKind { expected, found } => {
                write!(f, "expected a {expected}, got a {found}")
            }
            Self::DuplicateMember {
                project_id,
                task_id,
            } => write!(f, "task {task_id} is already in project {project_id}"),
            Self::NameTaken { user_id, name } => write!(
                f,
                "project name `{name}` is already used by user {user_id}"
            ),
            Self::CapacityExceeded { container, max } => match container {
                EntityKind::User => write!(f, "cannot add more than {max} projects to a user"),
                EntityKind::Project => {
                    write!(f, "cannot add more than {max} tasks to a project")
                }
                EntityKind::Task => write!(f, "{container} is at capacity ({max})"),
            },
            Self::ImmutableField(field) => write!(f, "{field} is read-only"),
            Self::UnknownField(field) => write!(f, "unknown field: `{field}`"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
