//! Task domain model.
//!
//! # Responsibility
//! - Hold validated task fields and the immutable task id.
//! - Record the non-owning back-reference to the holding project.
//!
//! # Invariants
//! - `id` is assigned once by `TaskIdAllocator` and never changes.
//! - Setters validate before assigning; a rejected value leaves the old one.
//! - `project` is navigation only and is maintained by the workspace.

use crate::error::{CoreError, CoreResult};
use crate::model::ids::{ProjectId, TaskId};
use crate::model::validation::{
    check_description, check_name, format_due_date, parse_due_date, ValidationError,
};
use crate::registry::task_ids::TaskIdAllocator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task progress state.
///
/// Any state is reachable from any other in one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressable task fields for string-driven updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Id,
    Name,
    Description,
    Status,
    DueDate,
}

impl FromStr for TaskField {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "status" => Ok(Self::Status),
            "due_date" => Ok(Self::DueDate),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

/// Unvalidated task input.
///
/// Unset name/description default to empty text and status to `todo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<String>,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: TaskStatus::Todo.as_str().to_string(),
            due_date: None,
        }
    }
}

impl NewTask {
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

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = value.into();
        self
    }

    pub fn due_date(mut self, value: impl Into<String>) -> Self {
        self.due_date = Some(value.into());
        self
    }
}

/// Leaf entity of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    project: Option<ProjectId>,
}

impl Task {
    /// Validates `input`, then draws a fresh id from `ids`.
    ///
    /// No id is consumed when validation fails.
    ///
    /// # Errors
    /// - `CoreError::Validation` for any field rule violation.
    pub fn create(ids: &mut TaskIdAllocator, input: NewTask) -> CoreResult<Self> {
        check_name("task name", &input.name)?;
        check_description("task description", &input.description)?;
        let status = input.status.parse::<TaskStatus>()?;
        let due_date = input.due_date.as_deref().map(parse_due_date).transpose()?;

        Ok(Self {
            id: ids.allocate(),
            name: input.name,
            description: input.description,
            status,
            due_date,
            project: None,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Due date in `YYYY-MM-DD` form, if set.
    pub fn due_date_text(&self) -> Option<String> {
        self.due_date.map(format_due_date)
    }

    /// Project currently holding this task.
    pub fn project(&self) -> Option<ProjectId> {
        self.project
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        check_name("task name", &value)?;
        self.name = value;
        Ok(())
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        check_description("task description", &value)?;
        self.description = value;
        Ok(())
    }

    pub fn set_status(&mut self, value: &str) -> Result<(), ValidationError> {
        self.status = value.parse()?;
        Ok(())
    }

    /// Sets or clears the due date.
    pub fn set_due_date(&mut self, value: Option<&str>) -> Result<(), ValidationError> {
        self.due_date = value.map(parse_due_date).transpose()?;
        Ok(())
    }

    /// Updates one field addressed by name.
    ///
    /// # Errors
    /// - `CoreError::ImmutableField("id")` when targeting the id.
    /// - `CoreError::UnknownField` for unrecognized field names.
    /// - `CoreError::Validation` when the value breaks the field rule.
    ///
    /// An empty `due_date` value clears the date.
    pub fn set_field(&mut self, field: &str, value: &str) -> CoreResult<()> {
        match field.parse::<TaskField>()? {
            TaskField::Id => return Err(CoreError::ImmutableField("id")),
            TaskField::Name => self.set_name(value)?,
            TaskField::Description => self.set_description(value)?,
            TaskField::Status => self.set_status(value)?,
            TaskField::DueDate => self.set_due_date(Some(value).filter(|v| !v.is_empty()))?,
        }
        Ok(())
    }

    pub(crate) fn set_project(&mut self, project: Option<ProjectId>) {
        self.project = project;
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task: {} - {} | Status: {} | Due: {}",
            self.name,
            self.description,
            self.status,
            self.due_date_text().as_deref().unwrap_or("None")
        )
    }
}
