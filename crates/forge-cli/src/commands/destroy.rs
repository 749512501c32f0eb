//! Destroy command implementation

use colored::Colorize;
use forge_core::ProjectId;
use forge_git::CleanupOutcome;

use crate::context::Context;
use crate::error::Result;

/// Run the destroy command
pub fn run_destroy(ctx: &Context, id: ProjectId) -> Result<()> {
    println!("{} Destroying project {}...", "=>".blue().bold(), id);

    let outcome = ctx.with_project_lock(id, || Ok(ctx.lifecycle().destroy(id)?))?;
    ctx.remove_project_lock(id)?;

    match outcome {
        CleanupOutcome::Removed => {
            println!(
                "{} Project {} and its repositories removed.",
                "OK".green().bold(),
                id
            );
        }
        CleanupOutcome::AlreadyAbsent => {
            println!(
                "{} Project {} removed, no repositories were on disk.",
                "OK".green().bold(),
                id
            );
        }
    }
    Ok(())
}
