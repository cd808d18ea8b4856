//! Credit command implementation.
//!
//! Weights every exposure of a CSV file and sums the credit RWA.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use solva_config::RegulatoryPolicy;
use solva_risk::{total_rwa, ExposureRwa};

use crate::cli::OutputFormat;
use crate::data::load_exposures;
use crate::output::{
    format_amount, format_weight, print_csv, print_header, print_json, print_table, KeyValue,
};

/// Arguments for the credit command.
#[derive(Args, Debug)]
pub struct CreditArgs {
    /// Exposure CSV (id,category,ead,ccf,covered,mitigant_weight,provisioning_rate)
    #[arg(short, long)]
    pub exposures: PathBuf,
}

/// One weighted exposure.
#[derive(Debug, Serialize, Tabled)]
struct ExposureRow {
    #[tabled(rename = "Exposure")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Credit Equivalent")]
    credit_equivalent: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Covered")]
    covered: String,
    #[tabled(rename = "RWA")]
    rwa: String,
}

impl ExposureRow {
    fn new(index: usize, detail: &ExposureRwa) -> Self {
        Self {
            id: detail
                .id
                .clone()
                .unwrap_or_else(|| format!("#{}", index + 1)),
            category: detail.category.code().to_string(),
            credit_equivalent: format_amount(detail.credit_equivalent),
            weight: format_weight(detail.applied_weight),
            covered: match detail.mitigant_weight {
                Some(weight) => format!(
                    "{} @ {}",
                    format_amount(detail.covered_amount),
                    format_weight(weight)
                ),
                None => "-".to_string(),
            },
            rwa: format_amount(detail.rwa),
        }
    }
}

#[derive(Serialize)]
struct CreditOutput<'a> {
    policy: &'a str,
    exposures: &'a [ExposureRwa],
    credit_rwa: Decimal,
}

/// Execute the credit command.
pub fn execute(args: CreditArgs, format: OutputFormat, policy: &RegulatoryPolicy) -> Result<()> {
    let exposures = load_exposures(&args.exposures)?;
    let engine = policy.credit_engine();
    let detail = engine.breakdown(&exposures)?;
    let credit_rwa = total_rwa(&detail)?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<ExposureRow> = detail
                .iter()
                .enumerate()
                .map(|(i, d)| ExposureRow::new(i, d))
                .collect();
            print_header(&format!("Credit Risk ({})", policy.name));
            print_table(&rows)?;
            print_table(&[
                KeyValue::new("Exposures", detail.len().to_string()),
                KeyValue::amount("Credit RWA", credit_rwa),
            ])?;
        }
        OutputFormat::Json => print_json(&CreditOutput {
            policy: &policy.name,
            exposures: &detail,
            credit_rwa,
        })?,
        OutputFormat::Csv => {
            let rows: Vec<ExposureRow> = detail
                .iter()
                .enumerate()
                .map(|(i, d)| ExposureRow::new(i, d))
                .collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => println!("{}", format_amount(credit_rwa)),
    }

    Ok(())
}
