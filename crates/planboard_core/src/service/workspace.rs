//! Workspace service: entity tables plus every cross-entity rule.
//!
//! # Responsibility
//! - Own all users, projects and tasks and hand out ids for them.
//! - Attach, reparent, rename and cascade-delete while keeping forward
//!   edges, back-references and the live task-id set consistent.
//!
//! # Invariants
//! - A task is held by at most one project; a project by at most one user.
//! - Project names are unique within one user's project list.
//! - `User::projects` and `Project::tasks` never exceed configured limits.
//! - Every check runs before the first write, so `Err` means no change.

use crate::config::Limits;
use crate::error::{CoreError, CoreResult};
use crate::model::ids::{EntityKind, EntityRef, ProjectId, TaskId, UserId};
use crate::model::project::{NewProject, Project};
use crate::model::task::{NewTask, Task};
use crate::model::user::User;
use crate::model::validation::check_name;
use crate::registry::task_ids::TaskIdAllocator;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable flat view of workspace state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceSnapshot<'a> {
    pub users: Vec<&'a User>,
    pub projects: Vec<&'a Project>,
    pub tasks: Vec<&'a Task>,
    pub live_task_ids: Vec<TaskId>,
}

/// In-memory owner of the user → project → task tree.
#[derive(Debug, Clone)]
pub struct Workspace {
    limits: Limits,
    task_ids: TaskIdAllocator,
    next_user_id: u64,
    next_project_id: u64,
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Workspace {
    pub fn new(limits: Limits) -> Self {
        Self::with_allocator(limits, TaskIdAllocator::new())
    }

    /// Creates a workspace drawing task ids from `task_ids`.
    pub fn with_allocator(limits: Limits, task_ids: TaskIdAllocator) -> Self {
        Self {
            limits,
            task_ids,
            next_user_id: 1,
            next_project_id: 1,
            users: BTreeMap::new(),
            projects: BTreeMap::new(),
            tasks: BTreeMap::new(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Replaces limits for subsequent enforcing calls.
    ///
    /// Containers already above a lowered limit keep their members.
    pub fn set_limits(&mut self, limits: Limits) {
        debug!(
            "event=limits_update module=workspace max_projects={} max_tasks={}",
            limits.max_projects_per_user, limits.max_tasks_per_project
        );
        self.limits = limits;
    }

    // ---- creation -------------------------------------------------------

    pub fn create_user(
        &mut self,
        username: impl Into<String>,
        full_name: impl Into<String>,
    ) -> UserId {
        let id = UserId(self.next_user_id);
        self.next_user_id += 1;
        self.users
            .insert(id, User::new(id, username.into(), full_name.into()));
        info!("event=user_create module=workspace status=ok user_id={id}");
        id
    }

    /// Creates an unattached task with a fresh process-wide id.
    pub fn create_task(&mut self, input: NewTask) -> CoreResult<TaskId> {
        let task = Task::create(&mut self.task_ids, input)
            .map_err(|err| rejected("task_create", err))?;
        let id = task.id();
        self.tasks.insert(id, task);
        info!("event=task_create module=workspace status=ok task_id={id}");
        Ok(id)
    }

    /// Creates a project, attaching it to `input.owner` when given.
    ///
    /// Attachment follows the `add_project` rules; if it would fail the
    /// project is not created at all.
    pub fn create_project(&mut self, input: NewProject) -> CoreResult<ProjectId> {
        let id = ProjectId(self.next_project_id);
        let project = Project::new(id, input.name, input.description)
            .map_err(|err| rejected("project_create", err.into()))?;
        if let Some(owner) = input.owner {
            self.ensure_project_admissible(owner, &project)
                .map_err(|err| rejected("project_create", err))?;
        }

        self.next_project_id += 1;
        self.projects.insert(id, project);
        info!("event=project_create module=workspace status=ok project_id={id}");
        if let Some(owner) = input.owner {
            self.link_project(owner, id)?;
        }
        Ok(id)
    }

    // ---- lookup ---------------------------------------------------------

    pub fn user(&self, id: UserId) -> CoreResult<&User> {
        self.users.get(&id).ok_or(CoreError::UserNotFound(id))
    }

    pub fn project(&self, id: ProjectId) -> CoreResult<&Project> {
        self.projects.get(&id).ok_or(CoreError::ProjectNotFound(id))
    }

    pub fn task(&self, id: TaskId) -> CoreResult<&Task> {
        self.tasks.get(&id).ok_or(CoreError::TaskNotFound(id))
    }

    /// Mutable user access for username/full-name edits.
    pub fn user_mut(&mut self, id: UserId) -> CoreResult<&mut User> {
        self.users.get_mut(&id).ok_or(CoreError::UserNotFound(id))
    }

    /// Mutable project access for description edits.
    ///
    /// Renames go through `set_project_name` for the uniqueness check.
    pub fn project_mut(&mut self, id: ProjectId) -> CoreResult<&mut Project> {
        self.projects
            .get_mut(&id)
            .ok_or(CoreError::ProjectNotFound(id))
    }

    /// Mutable task access for field setters.
    pub fn task_mut(&mut self, id: TaskId) -> CoreResult<&mut Task> {
        self.tasks.get_mut(&id).ok_or(CoreError::TaskNotFound(id))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Projects owned by `user_id`, in insertion order.
    pub fn user_projects(&self, user_id: UserId) -> CoreResult<Vec<&Project>> {
        self.user(user_id)?
            .projects()
            .iter()
            .map(|id| self.project(*id))
            .collect()
    }

    /// Tasks held by `project_id`, in insertion order.
    pub fn project_tasks(&self, project_id: ProjectId) -> CoreResult<Vec<&Task>> {
        self.project(project_id)?
            .tasks()
            .iter()
            .map(|id| self.task(*id))
            .collect()
    }

    /// Total tasks across every project owned by `user_id`.
    pub fn number_of_tasks(&self, user_id: UserId) -> CoreResult<usize> {
        Ok(self
            .user_projects(user_id)?
            .iter()
            .map(|project| project.task_count())
            .sum())
    }

    pub fn is_task_id_live(&self, id: TaskId) -> bool {
        self.task_ids.is_live(id)
    }

    pub fn live_task_ids(&self) -> Vec<TaskId> {
        self.task_ids.live_ids()
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot<'_> {
        WorkspaceSnapshot {
            users: self.users.values().collect(),
            projects: self.projects.values().collect(),
            tasks: self.tasks.values().collect(),
            live_task_ids: self.task_ids.live_ids(),
        }
    }

    // ---- mutation -------------------------------------------------------

    /// Renames a project.
    ///
    /// # Errors
    /// - `Validation` when the name exceeds 30 characters.
    /// - `NameTaken` when another project of the same owner uses the name.
    ///   Unattached projects skip the uniqueness check.
    pub fn set_project_name(
        &mut self,
        project_id: ProjectId,
        name: impl Into<String>,
    ) -> CoreResult<()> {
        let name = name.into();
        self.ensure_rename_allowed(project_id, &name)
            .map_err(|err| rejected("project_rename", err))?;
        self.project_mut(project_id)?.set_name(name)?;
        info!("event=project_rename module=workspace status=ok project_id={project_id}");
        Ok(())
    }

    /// Appends `task_id` to the project's task list.
    ///
    /// A task held by another project is detached from it first.
    ///
    /// # Errors
    /// - `DuplicateMember` when the task is already in this project.
    /// - `CapacityExceeded` when the project holds `max_tasks_per_project`.
    pub fn add_task(&mut self, project_id: ProjectId, task_id: TaskId) -> CoreResult<()> {
        self.ensure_task_admissible(project_id, task_id)
            .map_err(|err| rejected("task_attach", err))?;

        let previous = self.task(task_id)?.project();
        if let Some(previous) = previous {
            if let Some(project) = self.projects.get_mut(&previous) {
                project.remove_task(task_id);
            }
        }
        self.task_mut(task_id)?.set_project(Some(project_id));
        self.project_mut(project_id)?.push_task(task_id);
        info!(
            "event=task_attach module=workspace status=ok project_id={project_id} task_id={task_id}"
        );
        Ok(())
    }

    /// Appends `project_id` to the user's project list, moving it away from
    /// any previous owner in the same step.
    ///
    /// # Errors
    /// - `CapacityExceeded` when the user holds `max_projects_per_user`.
    /// - `NameTaken` when any owned project, including this one, has the
    ///   same name.
    pub fn add_project(&mut self, user_id: UserId, project_id: ProjectId) -> CoreResult<()> {
        let project = self.project(project_id)?;
        self.ensure_project_admissible(user_id, project)
            .map_err(|err| rejected("project_attach", err))?;
        self.link_project(user_id, project_id)
    }

    /// Attaches `child` under `parent`, checking entity kinds at runtime.
    ///
    /// # Errors
    /// - `WrongEntityKind` when `parent` cannot hold `child`. A task parent is
    ///   reported as a non-container (`expected: Project`).
    pub fn attach(&mut self, child: EntityRef, parent: EntityRef) -> CoreResult<()> {
        match (parent, child) {
            (EntityRef::Project(project_id), EntityRef::Task(task_id)) => {
                self.add_task(project_id, task_id)
            }
            (EntityRef::User(user_id), EntityRef::Project(project_id)) => {
                self.add_project(user_id, project_id)
            }
            (EntityRef::Project(_), other) => Err(rejected(
                "attach",
                CoreError::WrongEntityKind {
                    expected: EntityKind::Task,
                    found: other.kind(),
                },
            )),
            (EntityRef::User(_), other) => Err(rejected(
                "attach",
                CoreError::WrongEntityKind {
                    expected: EntityKind::Project,
                    found: other.kind(),
                },
            )),
            (EntityRef::Task(_), _) => Err(rejected(
                "attach",
                CoreError::WrongEntityKind {
                    expected: EntityKind::Project,
                    found: EntityKind::Task,
                },
            )),
        }
    }

    // ---- deletion -------------------------------------------------------

    /// Deletes a task, detaching it from its project and releasing its id.
    pub fn delete_task(&mut self, task_id: TaskId) -> CoreResult<()> {
        let task = self
            .tasks
            .remove(&task_id)
            .ok_or(CoreError::TaskNotFound(task_id))?;
        if let Some(project_id) = task.project() {
            if let Some(project) = self.projects.get_mut(&project_id) {
                project.remove_task(task_id);
            }
        }
        self.task_ids.release(task_id);
        info!("event=task_delete module=workspace status=ok task_id={task_id}");
        Ok(())
    }

    /// Deletes every held task, then detaches and drops the project.
    pub fn delete_project(&mut self, project_id: ProjectId) -> CoreResult<()> {
        let task_ids = self.project(project_id)?.tasks().to_vec();
        for task_id in &task_ids {
            self.delete_task(*task_id)?;
        }

        let project = self
            .projects
            .remove(&project_id)
            .ok_or(CoreError::ProjectNotFound(project_id))?;
        if let Some(owner) = project.owner() {
            if let Some(user) = self.users.get_mut(&owner) {
                user.remove_project(project_id);
            }
        }
        info!(
            "event=project_delete module=workspace status=ok project_id={project_id} tasks_deleted={}",
            task_ids.len()
        );
        Ok(())
    }

    /// Deletes every owned project (and their tasks), then the user.
    pub fn remove_user(&mut self, user_id: UserId) -> CoreResult<()> {
        let project_ids = self.user(user_id)?.projects().to_vec();
        for project_id in &project_ids {
            self.delete_project(*project_id)?;
        }
        self.users.remove(&user_id);
        info!(
            "event=user_remove module=workspace status=ok user_id={user_id} projects_deleted={}",
            project_ids.len()
        );
        Ok(())
    }

    // ---- internals ------------------------------------------------------

    fn ensure_task_admissible(&self, project_id: ProjectId, task_id: TaskId) -> CoreResult<()> {
        let project = self.project(project_id)?;
        self.task(task_id)?;
        if project.contains_task(task_id) {
            return Err(CoreError::DuplicateMember {
                project_id,
                task_id,
            });
        }
        let max = self.limits.max_tasks_per_project;
        if project.task_count() >= max {
            return Err(CoreError::CapacityExceeded {
                container: EntityKind::Project,
                max,
            });
        }
        Ok(())
    }

    fn ensure_project_admissible(&self, user_id: UserId, project: &Project) -> CoreResult<()> {
        let user = self.user(user_id)?;
        let max = self.limits.max_projects_per_user;
        if user.project_count() >= max {
            return Err(CoreError::CapacityExceeded {
                container: EntityKind::User,
                max,
            });
        }
        if self.name_taken(user, project.name(), None) {
            return Err(CoreError::NameTaken {
                user_id,
                name: project.name().to_string(),
            });
        }
        Ok(())
    }

    fn ensure_rename_allowed(&self, project_id: ProjectId, name: &str) -> CoreResult<()> {
        let project = self.project(project_id)?;
        check_name("project name", name)?;
        if let Some(owner) = project.owner() {
            let user = self.user(owner)?;
            if self.name_taken(user, name, Some(project_id)) {
                return Err(CoreError::NameTaken {
                    user_id: owner,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn name_taken(&self, user: &User, name: &str, exclude: Option<ProjectId>) -> bool {
        user.projects()
            .iter()
            .filter(|id| Some(**id) != exclude)
            .filter_map(|id| self.projects.get(id))
            .any(|project| project.name() == name)
    }

    /// Detach-from-old and attach-to-new; callers run admission checks first.
    fn link_project(&mut self, user_id: UserId, project_id: ProjectId) -> CoreResult<()> {
        let previous = self.project(project_id)?.owner();
        if let Some(previous) = previous {
            if let Some(old_owner) = self.users.get_mut(&previous) {
                old_owner.remove_project(project_id);
            }
        }
        self.project_mut(project_id)?.set_owner(Some(user_id));
        self.user_mut(user_id)?.push_project(project_id);

        match previous {
            Some(previous) if previous != user_id => info!(
                "event=project_reparent module=workspace status=ok project_id={project_id} from_user={previous} to_user={user_id}"
            ),
            _ => info!(
                "event=project_attach module=workspace status=ok project_id={project_id} user_id={user_id}"
            ),
        }
        Ok(())
    }
}

fn rejected(event: &str, err: CoreError) -> CoreError {
    warn!(
        "event={event} module=workspace status=rejected reason={}",
        err.code()
    );
    err
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use crate::config::Limits;
    use crate::error::CoreError;
    use crate::model::ids::{EntityKind, ProjectId, UserId};
    use crate::model::project::NewProject;
    use crate::model::task::NewTask;

    fn owned_project(ws: &mut Workspace, user: UserId, name: &str) -> ProjectId {
        let input = NewProject::named(name).owned_by(user);
        ws.create_project(input).unwrap()
    }

    #[test]
    fn add_task_moves_task_between_projects() {
        let mut ws = Workspace::default();
        let a = ws.create_project(NewProject::named("A")).unwrap();
        let b = ws.create_project(NewProject::named("B")).unwrap();
        let task = ws.create_task(NewTask::named("t")).unwrap();

        ws.add_task(a, task).unwrap();
        ws.add_task(b, task).unwrap();

        assert!(ws.project(a).unwrap().tasks().is_empty());
        assert_eq!(ws.project(b).unwrap().tasks(), &[task]);
        assert_eq!(ws.task(task).unwrap().project(), Some(b));
    }

    #[test]
    fn duplicate_is_reported_before_capacity() {
        let mut ws = Workspace::new(Limits::new(30, 1));
        let project = ws.create_project(NewProject::named("P")).unwrap();
        let task = ws.create_task(NewTask::named("t")).unwrap();
        ws.add_task(project, task).unwrap();

        let err = ws.add_task(project, task).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMember { .. }));
    }

    #[test]
    fn create_project_with_full_owner_leaves_nothing_behind() {
        let mut ws = Workspace::new(Limits::new(1, 20));
        let user = ws.create_user("nima", "");
        owned_project(&mut ws, user, "P1");

        let err = ws
            .create_project(NewProject::named("P2").owned_by(user))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::CapacityExceeded {
                container: EntityKind::User,
                max: 1
            }
        );
        assert_eq!(ws.projects().count(), 1);
    }

    #[test]
    fn re_adding_owned_project_hits_its_own_name() {
        let mut ws = Workspace::default();
        let user = ws.create_user("nima", "");
        let project = owned_project(&mut ws, user, "P1");

        let err = ws.add_project(user, project).unwrap_err();
        assert!(matches!(err, CoreError::NameTaken { .. }));
        assert_eq!(ws.user(user).unwrap().projects(), &[project]);
    }

    #[test]
    fn lowering_limits_keeps_existing_members() {
        let mut ws = Workspace::default();
        let project = ws.create_project(NewProject::named("P")).unwrap();
        for i in 0..3 {
            let task = ws.create_task(NewTask::named(format!("t{i}"))).unwrap();
            ws.add_task(project, task).unwrap();
        }

        ws.set_limits(Limits::new(30, 2));
        let extra = ws.create_task(NewTask::named("extra")).unwrap();
        let err = ws.add_task(project, extra).unwrap_err();

        assert!(matches!(err, CoreError::CapacityExceeded { max: 2, .. }));
        assert_eq!(ws.project(project).unwrap().task_count(), 3);
    }
}
