//! Human-readable listings for users, projects and tasks.
//!
//! Output is illustrative text for consoles, not a stable wire format.
//! Listing order always equals container order.

use crate::error::CoreResult;
use crate::model::ids::{ProjectId, UserId};
use crate::model::task::Task;
use crate::service::workspace::Workspace;

/// Renders every task held by `project_id`.
pub fn project_tasks_report(workspace: &Workspace, project_id: ProjectId) -> CoreResult<String> {
    let project = workspace.project(project_id)?;
    let tasks = workspace.project_tasks(project_id)?;
    if tasks.is_empty() {
        return Ok(format!("No tasks in Project '{}'.\n", project.name()));
    }

    let mut out = format!("Tasks in Project '{}':\n", project.name());
    for task in tasks {
        push_line(&mut out, task_line(task));
    }
    Ok(out)
}

/// Renders the name and description of every project owned by `user_id`.
pub fn user_projects_report(workspace: &Workspace, user_id: UserId) -> CoreResult<String> {
    let user = workspace.user(user_id)?;
    let projects = workspace.user_projects(user_id)?;
    if projects.is_empty() {
        return Ok(format!("{} has no projects.\n", user.username()));
    }

    let mut out = format!("{}'s Projects:\n", user.username());
    for project in projects {
        push_line(
            &mut out,
            format!("{} - {}", project.name(), project.description()),
        );
    }
    Ok(out)
}

/// Renders each owned project's task listing, grouped by project.
pub fn user_tasks_report(workspace: &Workspace, user_id: UserId) -> CoreResult<String> {
    let user = workspace.user(user_id)?;
    if workspace.number_of_tasks(user_id)? == 0 {
        return Ok(format!(
            "{} has no tasks across all projects.\n",
            user.username()
        ));
    }

    let mut out = format!("{}'s Tasks Across All Projects:\n", user.username());
    for project_id in user.projects() {
        out.push_str(&project_tasks_report(workspace, *project_id)?);
    }
    Ok(out)
}

fn task_line(task: &Task) -> String {
    format!(
        "{} - {} - {} | Status: {} | Due: {}",
        task.id(),
        task.name(),
        task.description(),
        task.status(),
        task.due_date_text().as_deref().unwrap_or("None")
    )
}

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{project_tasks_report, user_projects_report, user_tasks_report};
    use crate::model::ids::{ProjectId, UserId};
    use crate::model::project::NewProject;
    use crate::model::task::NewTask;
    use crate::service::workspace::Workspace;

    fn owned_project(ws: &mut Workspace, user: UserId, name: &str) -> ProjectId {
        let input = NewProject::named(name).owned_by(user);
        ws.create_project(input).unwrap()
    }

    #[test]
    fn empty_variants_are_distinct() {
        let mut ws = Workspace::default();
        let user = ws.create_user("nima", "Nima");
        let project = owned_project(&mut ws, user, "P1");

        assert_eq!(
            project_tasks_report(&ws, project).unwrap(),
            "No tasks in Project 'P1'.\n"
        );
        assert_eq!(
            user_tasks_report(&ws, user).unwrap(),
            "nima has no tasks across all projects.\n"
        );

        let loner = ws.create_user("solo", "");
        assert_eq!(
            user_projects_report(&ws, loner).unwrap(),
            "solo has no projects.\n"
        );
    }

    #[test]
    fn project_listing_has_one_line_per_project() {
        let mut ws = Workspace::default();
        let user = ws.create_user("nima", "");
        owned_project(&mut ws, user, "P1");
        let p2 = owned_project(&mut ws, user, "P2");
        ws.project_mut(p2).unwrap().set_description("second").unwrap();

        assert_eq!(
            user_projects_report(&ws, user).unwrap(),
            "nima's Projects:\nP1 - \nP2 - second\n"
        );
    }

    #[test]
    fn task_listing_follows_insertion_order() {
        let mut ws = Workspace::default();
        let project = ws.create_project(NewProject::named("P1")).unwrap();
        let second = ws
            .create_task(NewTask::named("second").due_date("2025-01-02"))
            .unwrap();
        let first = ws
            .create_task(NewTask::named("first").description("d").status("doing"))
            .unwrap();
        ws.add_task(project, first).unwrap();
        ws.add_task(project, second).unwrap();

        let report = project_tasks_report(&ws, project).unwrap();
        assert_eq!(
            report,
            format!(
                "Tasks in Project 'P1':\n\
                 {first} - first - d | Status: doing | Due: None\n\
                 {second} - second -  | Status: todo | Due: 2025-01-02\n"
            )
        );
    }

    #[test]
    fn user_task_report_groups_by_project() {
        let mut ws = Workspace::default();
        let user = ws.create_user("nima", "");
        let p1 = owned_project(&mut ws, user, "P1");
        let p2 = owned_project(&mut ws, user, "P2");
        let task = ws.create_task(NewTask::named("only")).unwrap();
        ws.add_task(p2, task).unwrap();

        let report = user_tasks_report(&ws, user).unwrap();
        let header = report.find("nima's Tasks Across All Projects:").unwrap();
        let empty_p1 = report.find("No tasks in Project 'P1'.").unwrap();
        let listed_p2 = report.find("Tasks in Project 'P2':").unwrap();
        assert!(header < empty_p1 && empty_p1 < listed_p2);
        assert!(ws.project(p1).unwrap().tasks().is_empty());
    }
}
