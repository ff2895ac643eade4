//! User domain model: root of the ownership tree.

use crate::model::ids::{ProjectId, UserId};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Project container at the top of the hierarchy.
///
/// `username` carries no cross-user uniqueness rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: String,
    full_name: String,
    projects: Vec<ProjectId>,
}

impl User {
    pub(crate) fn new(id: UserId, username: String, full_name: String) -> Self {
        Self {
            id,
            username,
            full_name,
            projects: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Owned project ids in insertion order.
    pub fn projects(&self) -> &[ProjectId] {
        &self.projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn owns_project(&self, project_id: ProjectId) -> bool {
        self.projects.contains(&project_id)
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.full_name = value.into();
    }

    pub(crate) fn push_project(&mut self, project_id: ProjectId) {
        self.projects.push(project_id);
    }

    pub(crate) fn remove_project(&mut self, project_id: ProjectId) -> bool {
        match self.projects.iter().position(|id| *id == project_id) {
            Some(index) => {
                self.projects.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "User: {} - {}", self.username, self.full_name)
    }
}
