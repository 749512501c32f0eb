//! Project Forge CLI
//!
//! Creates, forks, pushes and destroys per-project repository trees.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = result {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Project Forge CLI", "forge".green().bold());
        println!();
        println!("Run {} for available commands.", "forge --help".cyan());
        return Ok(());
    };

    let ctx = Context::load(cli.config, cli.repo_dir)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Create {
            owner,
            name,
            private,
        } => commands::run_create(ctx, &owner, &name, private),
        Commands::Fork {
            parent,
            owner,
            name,
            private,
        } => commands::run_fork(ctx, parent, &owner, &name, private),
        Commands::Push { id } => commands::run_push(ctx, id),
        Commands::Destroy { id } => commands::run_destroy(ctx, id),
        Commands::Info { id, json } => commands::run_info(ctx, id, json),
        Commands::List { json } => commands::run_list(ctx, json),
    }
}
