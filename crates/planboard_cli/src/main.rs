//! Demo entry point.
//!
//! # Responsibility
//! - Wire config, logging and the core workspace into one sample scenario.
//! - Print text reports, or the JSON snapshot with `--json`.

use clap::Parser;
use log::info;
use planboard_core::{
    default_log_level, init_logging, user_projects_report, user_tasks_report, Limits,
    NewProject, NewTask, Workspace,
};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Planboard demo: one user, two projects, three tasks")]
struct Cli {
    /// Print the workspace snapshot as JSON instead of text reports.
    #[arg(long)]
    json: bool,
    /// Absolute directory for rolling log files; logging stays off when unset.
    #[arg(long)]
    log_dir: Option<String>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let limits = Limits::from_env()?;
    info!(
        "event=cli_start module=cli status=ok max_projects={} max_tasks={}",
        limits.max_projects_per_user, limits.max_tasks_per_project
    );
    let mut ws = Workspace::new(limits);

    let me = ws.create_user("Nima", "");
    let first = ws.create_project(NewProject::named("TestProject1"))?;
    let second = ws.create_project(NewProject::named("TestProject2"))?;
    ws.add_project(me, first)?;
    ws.add_project(me, second)?;

    for (project, name, description) in [
        (first, "Task1", "This is task 1"),
        (first, "Task2", "This is task 2"),
        (second, "Task3", "This is task 3"),
    ] {
        let task = ws.create_task(NewTask::named(name).description(description))?;
        ws.add_task(project, task)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ws.snapshot())?);
        return Ok(());
    }

    println!("{}", ws.user(me)?);
    print!("{}", user_projects_report(&ws, me)?);
    print!("{}", user_tasks_report(&ws, me)?);
    Ok(())
}
