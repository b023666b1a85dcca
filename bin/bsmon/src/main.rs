//! Bitswap monitor replay tool.

mod cli;
mod config;
mod replay;

use clap::Parser;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    cli::Cli::parse().run().await
}
