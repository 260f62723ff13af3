//! lsaddr CLI - List the network addresses a process is talking to
//!
//! A command-line tool that finds the connections owned by a process
//! and prints them as CSV, a packet-filter expression or JSON.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lsaddr_core::{ConfigStore, OutputFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lsaddr")]
#[command(author, version, about = "List the network addresses a process is talking to")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Process name, PID pattern, or path to an .app bundle (macOS)
    #[arg(required = true)]
    selector: Option<String>,

    /// Output format: csv, bpf or json
    #[arg(short, long)]
    out: Option<OutputFormat>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (default: ~/.lsaddr/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    match cli.command {
        Some(Commands::Config { init }) => {
            if init {
                commands::config::init(&store).await?;
            }
            commands::config::show(&store).await?;
        }
        None => {
            let selector = cli
                .selector
                .ok_or_else(|| anyhow::anyhow!("a selector is required"))?;
            commands::lookup::run(&store, &selector, cli.out).await?;
        }
    }

    Ok(())
}
