//! Info and list command implementations

use chrono::{DateTime, Utc};
use colored::Colorize;
use forge_core::{FileProjectStore, Project, ProjectId, ProjectLifecycle, ProjectStore};
use forge_fs::NormalizedPath;
use serde::Serialize;

use crate::context::Context;
use crate::error::Result;

const RECENT_COMMITS: usize = 5;

/// JSON view of a project.
#[derive(Debug, Serialize)]
struct ProjectInfo {
    id: ProjectId,
    owner: String,
    name: String,
    parent: Option<ProjectId>,
    private: bool,
    root_dir: Option<NormalizedPath>,
    bare_path: Option<NormalizedPath>,
    satellite_path: Option<NormalizedPath>,
    last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    recent_commits: Vec<CommitView>,
}

#[derive(Debug, Serialize)]
struct CommitView {
    id: String,
    summary: String,
    author: String,
    timestamp: DateTime<Utc>,
}

impl ProjectInfo {
    fn gather(
        lifecycle: &ProjectLifecycle<FileProjectStore>,
        project: &Project,
        max_commits: usize,
    ) -> Result<Self> {
        let layout = project.layout().ok();
        let (last_updated, recent_commits) = match &layout {
            Some(_) => (
                lifecycle.last_updated(project.id)?,
                lifecycle.recent_commits(project.id, max_commits)?,
            ),
            None => (None, Vec::new()),
        };

        Ok(Self {
            id: project.id,
            owner: project.owner_namespace.clone(),
            name: project.name.clone(),
            parent: project.lineage.parent(),
            private: project.is_private,
            root_dir: project.root_dir.clone(),
            bare_path: layout.as_ref().map(|l| l.bare_path().clone()),
            satellite_path: layout.as_ref().map(|l| l.satellite_path().clone()),
            last_updated,
            recent_commits: recent_commits
                .into_iter()
                .map(|c| CommitView {
                    id: c.id.to_string(),
                    summary: c.summary,
                    author: c.author,
                    timestamp: c.timestamp,
                })
                .collect(),
        })
    }
}

fn display_path(path: &Option<NormalizedPath>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => "(not assigned)".to_string(),
    }
}

/// Run the info command
pub fn run_info(ctx: &Context, id: ProjectId, json: bool) -> Result<()> {
    let lifecycle = ctx.lifecycle();
    let project = lifecycle
        .store()
        .get(id)?
        .ok_or(forge_core::Error::ProjectNotFound { id })?;
    let info = ProjectInfo::gather(lifecycle, &project, RECENT_COMMITS)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", format!("{}/{}", info.owner, info.name).bold());
    println!();
    println!("{}:        {}", "Id".dimmed(), info.id);
    match info.parent {
        Some(parent) => println!("{}:   fork of {}", "Lineage".dimmed(), parent),
        None => println!("{}:   origin", "Lineage".dimmed()),
    }
    println!(
        "{}:   {}",
        "Private".dimmed(),
        if info.private { "yes" } else { "no" }
    );
    println!("{}:      {}", "Root".dimmed(), display_path(&info.root_dir));
    println!("{}:      {}", "Bare".dimmed(), display_path(&info.bare_path));
    println!("{}: {}", "Satellite".dimmed(), display_path(&info.satellite_path));
    match info.last_updated {
        Some(time) => println!("{}:   {}", "Updated".dimmed(), time.to_rfc3339()),
        None => println!("{}:   {}", "Updated".dimmed(), "never".dimmed()),
    }
    println!();

    println!("{}:", "Recent Commits".bold());
    if info.recent_commits.is_empty() {
        println!("  {} (use {} after committing)", "None".dimmed(), "forge push".cyan());
    } else {
        for commit in &info.recent_commits {
            println!("  {} {}", format!("{:.7}", commit.id).yellow(), commit.summary);
        }
    }
    Ok(())
}

/// Run the list command
pub fn run_list(ctx: &Context, json: bool) -> Result<()> {
    let lifecycle = ctx.lifecycle();
    let projects = lifecycle.store().list()?;

    if json {
        let infos = projects
            .iter()
            .map(|p| ProjectInfo::gather(lifecycle, p, 0))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!(
            "{} (use {} to add one)",
            "No projects".dimmed(),
            "forge create <owner> <name>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Projects".bold());
    println!();
    for project in &projects {
        let slug = format!("{}/{}", project.owner_namespace, project.name);
        let lineage = match project.lineage.parent() {
            Some(parent) => format!("fork of {parent}"),
            None => "origin".to_string(),
        };
        println!("  {:<24} {} ({})", slug.green(), project.id, lineage.dimmed());
    }
    println!();
    println!("{} {} projects.", "Total:".dimmed(), projects.len());
    Ok(())
}
