//! Project domain model.
//!
//! # Responsibility
//! - Hold validated project fields and the ordered task membership list.
//! - Record the non-owning back-reference to the owning user.
//!
//! # Invariants
//! - `tasks` keeps insertion order and holds each task id at most once.
//! - Name uniqueness is scoped to the owning user and enforced by the
//!   workspace, so `set_name` here only checks the length rule.

use crate::model::ids::{ProjectId, TaskId, UserId};
use crate::model::validation::{check_description, check_name, ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Unvalidated project input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    /// Owner to attach to right after creation.
    pub owner: Option<UserId>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = value.into();
        self
    }

    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.owner = Some(user_id);
        self
    }
}

/// Task container owned by at most one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    tasks: Vec<TaskId>,
    owner: Option<UserId>,
}

impl Project {
    pub(crate) fn new(
        id: ProjectId,
        name: String,
        description: String,
    ) -> Result<Self, ValidationError> {
        check_name("project name", &name)?;
        check_description("project description", &description)?;
        Ok(Self {
            id,
            name,
            description,
            tasks: Vec::new(),
            owner: None,
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Held task ids in insertion order.
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.tasks.contains(&task_id)
    }

    /// User currently owning this project.
    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        check_description("project description", &value)?;
        self.description = value;
        Ok(())
    }

    pub(crate) fn set_name(&mut self, value: String) -> Result<(), ValidationError> {
        check_name("project name", &value)?;
        self.name = value;
        Ok(())
    }

    pub(crate) fn push_task(&mut self, task_id: TaskId) {
        self.tasks.push(task_id);
    }

    /// Removes `task_id` if present. Returns whether it was a member.
    pub(crate) fn remove_task(&mut self, task_id: TaskId) -> bool {
        match self.tasks.iter().position(|id| *id == task_id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<UserId>) {
        self.owner = owner;
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Project: {} - {}", self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::model::ids::{ProjectId, TaskId};
    use crate::model::validation::ValidationError;

    fn project(name: &str) -> Project {
        Project::new(ProjectId(1), name.to_string(), String::new()).unwrap()
    }

    #[test]
    fn new_rejects_long_name() {
        let err = Project::new(ProjectId(1), "p".repeat(31), String::new()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "project name", .. }));
    }

    #[test]
    fn remove_task_keeps_remaining_order() {
        let mut project = project("P1");
        for id in 1..=4 {
            project.push_task(TaskId(id));
        }

        assert!(project.remove_task(TaskId(2)));
        assert!(!project.remove_task(TaskId(2)));
        assert_eq!(project.tasks(), &[TaskId(1), TaskId(3), TaskId(4)]);
    }

    #[test]
    fn failed_description_update_keeps_previous_value() {
        let mut project = project("P1");
        project.set_description("short").unwrap();

        project
            .set_description("d".repeat(151))
            .expect_err("151 chars must fail");
        assert_eq!(project.description(), "short");
    }

    #[test]
    fn display_is_one_line_summary() {
        let mut project = project("P1");
        project.set_description("first project").unwrap();
        assert_eq!(project.to_string(), "Project: P1 - first project");
    }
}
