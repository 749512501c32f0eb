//! Push command implementation

use colored::Colorize;
use forge_core::ProjectId;
use forge_git::SyncOutcome;

use crate::context::Context;
use crate::error::Result;

/// Run the push command
pub fn run_push(ctx: &Context, id: ProjectId) -> Result<()> {
    let branch = &ctx.config().primary_branch;
    println!(
        "{} Pushing {} into the bare store...",
        "=>".blue().bold(),
        branch.cyan()
    );

    let outcome = ctx.with_project_lock(id, || Ok(ctx.lifecycle().push_to_bare(id)?))?;

    match outcome {
        SyncOutcome::NothingToSync => {
            println!("{} Nothing to push, {} has no commits.", "OK".green().bold(), branch);
        }
        SyncOutcome::UpToDate { tip } => {
            println!("{} Bare store already at {:.7}.", "OK".green().bold(), tip);
        }
        SyncOutcome::Pushed { previous: Some(previous), tip } => {
            println!(
                "{} Pushed {} {:.7}..{:.7}",
                "OK".green().bold(),
                branch,
                previous,
                tip
            );
        }
        SyncOutcome::Pushed { previous: None, tip } => {
            println!("{} Pushed {} at {:.7} (new branch)", "OK".green().bold(), branch, tip);
        }
    }
    Ok(())
}
