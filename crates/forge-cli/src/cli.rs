//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use forge_core::ProjectId;

/// Project Forge - Manage per-project bare stores and satellite clones
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(
    author,
    version,
    about = "Manage per-project bare stores and satellite clones",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (.toml or .json)
    #[arg(long, global = true, env = "FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base directory holding all project trees
    #[arg(long, global = true, env = "FORGE_REPO_DIR")]
    pub repo_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a project with an empty history
    ///
    /// Examples:
    ///   forge create alice blog
    ///   forge create alice notes --private
    Create {
        /// Owner namespace (username, email, ...)
        owner: String,

        /// Project name, unique per owner
        name: String,

        /// Mark the project as private
        #[arg(long)]
        private: bool,
    },

    /// Create a project seeded from another project's satellite
    Fork {
        /// Id of the parent project
        parent: ProjectId,

        /// Owner namespace of the fork
        owner: String,

        /// Name of the fork
        name: String,

        /// Mark the fork as private
        #[arg(long)]
        private: bool,
    },

    /// Push the satellite's primary branch into the bare store
    Push {
        /// Project id
        id: ProjectId,
    },

    /// Delete a project record and its repositories
    Destroy {
        /// Project id
        id: ProjectId,
    },

    /// Show paths, lineage and recent history of a project
    Info {
        /// Project id
        id: ProjectId,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List all projects
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
