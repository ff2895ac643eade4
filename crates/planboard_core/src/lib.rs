//! Core domain logic for Planboard.
//! Users own projects, projects own tasks; this crate is the single source of
//! truth for the membership, uniqueness, capacity and cascade rules.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod registry;
pub mod report;
pub mod service;

pub use config::{ConfigError, Limits};
pub use error::{CoreError, CoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::ids::{EntityKind, EntityRef, ProjectId, TaskId, UserId};
pub use model::project::{NewProject, Project};
pub use model::task::{NewTask, Task, TaskField, TaskStatus};
pub use model::user::User;
pub use model::validation::ValidationError;
pub use registry::task_ids::TaskIdAllocator;
pub use report::{project_tasks_report, user_projects_report, user_tasks_report};
pub use service::workspace::{Workspace, WorkspaceSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
