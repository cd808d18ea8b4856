//! Capital command implementation.
//!
//! Aggregates CET1, AT1 and Tier 2 ratios and checks each tier minimum.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use solva_config::RegulatoryPolicy;
use solva_core::types::CapitalTiers;

use crate::cli::OutputFormat;
use crate::output::{format_percent, print_header, print_json, print_output, status_marker};

/// Arguments for the capital command.
#[derive(Args, Debug)]
pub struct CapitalArgs {
    /// Common Equity Tier 1 ratio (%)
    #[arg(long, allow_negative_numbers = true)]
    pub cet1: Decimal,

    /// Additional Tier 1 ratio (%)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub at1: Decimal,

    /// Tier 2 ratio (%)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub tier2: Decimal,
}

#[derive(Debug, Serialize, Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: &'static str,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Minimum")]
    minimum: String,
    #[tabled(rename = "Check")]
    check: String,
}

/// Execute the capital command.
pub fn execute(args: CapitalArgs, format: OutputFormat, policy: &RegulatoryPolicy) -> Result<()> {
    let aggregator = policy.capital_aggregator();
    let tiers = CapitalTiers::new(args.cet1, args.at1, args.tier2);
    let adequacy = aggregator.aggregate(&tiers)?;
    let minima = aggregator.minima();

    let rows = |marker: fn(bool) -> String| {
        vec![
            TierRow {
                tier: "CET1",
                ratio: format_percent(tiers.cet1_ratio),
                minimum: format_percent(minima.cet1),
                check: marker(adequacy.checks.cet1_ok),
            },
            TierRow {
                tier: "Tier 1",
                ratio: format_percent(adequacy.tier1),
                minimum: format_percent(minima.tier1),
                check: marker(adequacy.checks.tier1_ok),
            },
            TierRow {
                tier: "Total",
                ratio: format_percent(adequacy.total),
                minimum: format_percent(minima.total),
                check: marker(adequacy.checks.total_ok),
            },
        ]
    };

    match format {
        OutputFormat::Table => {
            print_header(&format!("Capital Adequacy ({})", policy.name));
            print_output(&rows(status_marker), format)?;
            println!(
                "{}",
                if adequacy.compliant {
                    "All tier minima met"
                } else {
                    "Tier minima breached"
                }
            );
        }
        OutputFormat::Csv => print_output(&rows(|ok| ok.to_string()), format)?,
        OutputFormat::Json => print_json(&adequacy)?,
        OutputFormat::Minimal => println!("{}", adequacy.compliant),
    }

    Ok(())
}
