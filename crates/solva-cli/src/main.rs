//! Solva CLI - Command-line interface for regulatory solvency ratios.
//!
//! # Usage
//!
//! ```bash
//! # Credit RWA of a banking book
//! solva credit --exposures exposures.csv
//!
//! # Market RWA of each fund in a NAV table
//! solva market --navs navs.csv
//!
//! # Operational RWA from three years of gross income
//! solva operational --incomes 1100,1200,1300
//!
//! # Solvency coefficient under the 2013 circular, exported to CSV
//! solva --policy BAM.14G13 solvency --own-funds 1200 \
//!     --exposures exposures.csv --navs navs.csv --column OPCVM --income 1200 \
//!     --export report.csv
//! ```

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solva_config::PolicyRegistry;

mod cli;
mod commands;
mod data;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/json/csv output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let format = cli.format;
    let registry = PolicyRegistry::new();
    let policy = match &cli.policy_file {
        Some(path) => registry.load_file(path)?,
        None => registry.get(&cli.policy)?,
    };
    tracing::debug!(policy = %policy.name, min_ratio = %policy.min_solvency_ratio, "policy selected");

    match cli.command {
        Commands::Credit(args) => commands::credit::execute(args, format, &policy)?,
        Commands::Market(args) => commands::market::execute(args, format, &policy)?,
        Commands::Operational(args) => commands::operational::execute(args, format, &policy)?,
        Commands::Capital(args) => commands::capital::execute(args, format, &policy)?,
        Commands::Solvency(args) => commands::solvency::execute(args, format, &policy)?,
        Commands::Policy(args) => commands::policy::execute(args, format, &registry, &policy)?,
    }

    Ok(())
}
