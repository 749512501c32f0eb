//! Create and fork command implementations

use colored::Colorize;
use forge_core::{NewProject, Project, ProjectId, ProjectStore};
use forge_git::{InitOutcome, SyncOutcome};

use crate::context::Context;
use crate::error::Result;

/// Run the create command
pub fn run_create(ctx: &Context, owner: &str, name: &str, private: bool) -> Result<()> {
    println!(
        "{} Creating project {}...",
        "=>".blue().bold(),
        format!("{owner}/{name}").cyan()
    );
    create_project(ctx, NewProject::origin(owner, name).private(private))
}

/// Run the fork command
pub fn run_fork(
    ctx: &Context,
    parent: ProjectId,
    owner: &str,
    name: &str,
    private: bool,
) -> Result<()> {
    println!(
        "{} Forking {} into {}...",
        "=>".blue().bold(),
        parent.to_string().dimmed(),
        format!("{owner}/{name}").cyan()
    );
    create_project(ctx, NewProject::fork(parent, owner, name).private(private))
}

/// Store the record, then initialize it under the project's lock file.
///
/// A failed initialization removes the record again when rollback is enabled.
fn create_project(ctx: &Context, new: NewProject) -> Result<()> {
    let lifecycle = ctx.lifecycle();
    let project = lifecycle.store().insert(new)?;

    let outcome = ctx.with_project_lock(project.id, || Ok(lifecycle.on_created(project.id)?));
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            if ctx.config().rollback_on_failure {
                lifecycle.store().remove(project.id)?;
            }
            return Err(err);
        }
    };

    let project = lifecycle.store().get(project.id)?.unwrap_or(project);
    report(&project, &outcome);
    Ok(())
}

fn report(project: &Project, outcome: &InitOutcome) {
    match outcome {
        InitOutcome::RootMissing => {
            println!(
                "{} Root directory is missing, repositories were not created.",
                "WARN".yellow().bold()
            );
        }
        InitOutcome::Initialized { sync } => {
            if let SyncOutcome::Pushed { tip, .. } = sync {
                println!("{} Seeded bare store at {:.7}", "=>".blue().bold(), tip);
            }
        }
    }

    println!(
        "{} Created project {} ({})",
        "OK".green().bold(),
        format!("{}/{}", project.owner_namespace, project.name).cyan(),
        project.id
    );
    if let Ok(layout) = project.layout() {
        println!("   {}      {}", "bare:".dimmed(), layout.bare_path());
        println!("   {} {}", "satellite:".dimmed(), layout.satellite_path());
    }
}
