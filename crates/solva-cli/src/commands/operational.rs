//! Operational command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use solva_config::RegulatoryPolicy;
use solva_risk::operational::average_gross_income;

use crate::cli::OutputFormat;
use crate::output::{format_amount, format_weight, print_header, print_json, print_output, KeyValue};

/// Arguments for the operational command.
#[derive(Args, Debug)]
#[group(id = "income_source", required = true, multiple = false)]
pub struct OperationalArgs {
    /// Average annual gross income
    #[arg(short, long, allow_negative_numbers = true)]
    pub income: Option<Decimal>,

    /// Annual gross incomes, comma separated; non-positive years are excluded
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub incomes: Option<Vec<Decimal>>,
}

impl OperationalArgs {
    /// Resolves the average gross income.
    pub fn average_income(&self) -> Result<Decimal> {
        match (&self.income, &self.incomes) {
            (Some(income), _) => Ok(*income),
            (None, Some(incomes)) => Ok(average_gross_income(incomes)?),
            (None, None) => Err(anyhow::anyhow!("--income or --incomes is required")),
        }
    }
}

#[derive(Serialize)]
struct OperationalOutput {
    avg_gross_income: Decimal,
    alpha: Decimal,
    capital_charge: Decimal,
    operational_rwa: Decimal,
}

/// Execute the operational command.
pub fn execute(
    args: OperationalArgs,
    format: OutputFormat,
    policy: &RegulatoryPolicy,
) -> Result<()> {
    let avg_gross_income = args.average_income()?;
    let engine = policy.operational_engine();
    let operational_rwa = engine.compute_operational_rwa(avg_gross_income)?;
    let capital_charge = engine.capital_charge(avg_gross_income)?;

    let output = OperationalOutput {
        avg_gross_income,
        alpha: engine.params().alpha,
        capital_charge,
        operational_rwa,
    };

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::amount("Average Gross Income", output.avg_gross_income),
                KeyValue::new("Alpha", format_weight(output.alpha)),
                KeyValue::amount("Capital Charge", output.capital_charge),
                KeyValue::amount("Operational RWA", output.operational_rwa),
            ];
            if format == OutputFormat::Table {
                print_header(&format!("Operational Risk ({})", policy.name));
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Minimal => println!("{}", format_amount(operational_rwa)),
    }

    Ok(())
}
