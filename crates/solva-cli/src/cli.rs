//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    CapitalArgs, CreditArgs, MarketArgs, OperationalArgs, PolicyArgs, SolvencyArgs,
};

/// Solva - Regulatory solvency ratio engine (Bank Al-Maghrib)
#[derive(Parser)]
#[command(name = "solva")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Regulatory policy to apply
    #[arg(
        short,
        long,
        default_value = "BAM.26G2006",
        env = "SOLVA_POLICY",
        global = true
    )]
    pub policy: String,

    /// TOML policy file; takes precedence over --policy
    #[arg(long, global = true)]
    pub policy_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Credit risk RWA from an exposure file
    Credit(CreditArgs),

    /// Market risk RWA from a NAV table
    Market(MarketArgs),

    /// Operational risk RWA (basic indicator approach)
    Operational(OperationalArgs),

    /// Aggregate capital tiers and check minima
    Capital(CapitalArgs),

    /// Solvency coefficient and compliance
    Solvency(SolvencyArgs),

    /// List and inspect regulatory policies
    Policy(PolicyArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
