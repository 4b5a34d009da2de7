//! wfmon CLI - Command line interface for workflow-monitor
//!
//! Shows which issues are done but still have open PRs, which PRs wait on
//! your review, and which PRs have enough approvals to move on to QA.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ConfigArgs, FetchArgs};

/// workflow-monitor: Jira and GitHub review status at a glance
#[derive(Parser, Debug)]
#[command(name = "wfmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to the config file (defaults to ~/.config/wfmon/config.toml)
    #[arg(short, long, global = true, env = "WFMON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Fetch issues and pull requests and print insights (default)
    #[command(visible_alias = "f")]
    Fetch(FetchArgs),

    /// Show current configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.debug {
        tracing::debug!("Debug output enabled");
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("wfmon {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Fetch(args)) => {
            args.execute(cli.config.as_deref()).await?;
        }
        Some(Commands::Config(args)) => {
            args.execute(cli.config.as_deref())?;
        }
        None => {
            FetchArgs::default().execute(cli.config.as_deref()).await?;
        }
    }

    Ok(())
}
