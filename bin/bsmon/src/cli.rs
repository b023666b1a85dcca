//! Command line entry point.

use std::path::PathBuf;

use bsmon_observability::{LogArgs, init_logging};
use bsmon_registry::DispatchStrategy;
use clap::{Parser, Subcommand};
use eyre::Result;

use crate::config::MonitorConfig;

/// Bitswap monitor - distributes captured Bitswap traffic to subscribers
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Logging configuration (applies to all subcommands).
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Dispatch JSON-lines captured events to a logging and an echo subscriber.
    Replay(ReplayArgs),
}

#[derive(Debug, clap::Args)]
pub(crate) struct ReplayArgs {
    /// Configuration file (TOML).
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Override the configured dispatch strategy.
    #[arg(long, value_name = "STRATEGY")]
    pub(crate) strategy: Option<DispatchStrategy>,

    /// Write every delivered event to stdout as a JSON line.
    #[arg(long)]
    pub(crate) echo: bool,

    /// Input file with one captured event per line. Reads stdin if omitted.
    pub(crate) input: Option<PathBuf>,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<()> {
        let Cli { mut logs, command } = self;

        match command {
            Commands::Replay(args) => {
                let mut config = MonitorConfig::load(args.config.as_deref())?;
                logs.merge(&config.log);
                init_logging(&logs)?;

                if let Some(strategy) = args.strategy {
                    config.dispatch.strategy = strategy;
                }
                crate::replay::run(args, config).await
            }
        }
    }
}
