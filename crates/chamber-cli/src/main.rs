#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        let status = commands::shared::status::status_of(&error);
        eprintln!("chamber error ({status}): {error:#}");
        std::process::exit(commands::shared::status::exit_code(status));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    enter_project(flags.project.as_deref())?;
    let config = bootstrap::load_config(&flags)?;

    if let cli::Commands::Config { action } = &cli.command {
        return commands::config::handle(action, &config, &flags);
    }

    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize chamber application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CHAMBER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Run every command from the project root so relative config and database
/// paths resolve against it.
fn enter_project(project: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = project else {
        return Ok(());
    };
    let root = Path::new(path);
    if !root.is_dir() {
        anyhow::bail!("invalid --project '{}': directory does not exist", root.display());
    }
    std::env::set_current_dir(root)
        .with_context(|| format!("failed to enter project directory {}", root.display()))
}
