//! Market command implementation.
//!
//! Computes the volatility-based market RWA of each instrument in a NAV
//! table.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use solva_config::RegulatoryPolicy;
use solva_risk::MarketRiskAssessment;

use crate::cli::OutputFormat;
use crate::data::NavTable;
use crate::output::{
    format_amount, format_percent, format_weight, print_csv, print_header, print_json, print_table,
};

/// Arguments for the market command.
#[derive(Args, Debug)]
pub struct MarketArgs {
    /// NAV table CSV (date column plus one column per instrument)
    #[arg(short, long)]
    pub navs: PathBuf,

    /// Restrict to one instrument column
    #[arg(short, long)]
    pub column: Option<String>,
}

/// Assessment of one instrument.
#[derive(Debug, Serialize)]
struct InstrumentAssessment {
    instrument: String,
    #[serde(flatten)]
    assessment: MarketRiskAssessment,
}

#[derive(Debug, Serialize, Tabled)]
struct MarketRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Obs")]
    observations: usize,
    #[tabled(rename = "Mean NAV")]
    mean_value: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Market RWA")]
    market_rwa: String,
}

impl From<&InstrumentAssessment> for MarketRow {
    fn from(item: &InstrumentAssessment) -> Self {
        let a = &item.assessment;
        Self {
            instrument: item.instrument.clone(),
            observations: a.observations,
            mean_value: format_amount(a.mean_value),
            volatility: format_percent(a.volatility_pct),
            factor: if a.floored {
                format!("{} (floor)", format_weight(a.factor))
            } else {
                format_weight(a.factor)
            },
            market_rwa: format_amount(a.market_rwa),
        }
    }
}

/// Execute the market command.
pub fn execute(args: MarketArgs, format: OutputFormat, policy: &RegulatoryPolicy) -> Result<()> {
    let table = NavTable::load(&args.navs)?;
    let engine = policy.market_engine();

    let instruments: Vec<String> = match args.column {
        Some(column) => vec![column],
        None => table.instruments().to_vec(),
    };

    let results = instruments
        .into_iter()
        .map(|instrument| {
            let series = table.series(&instrument)?;
            let assessment = engine
                .assess(&series)
                .map_err(|e| anyhow::anyhow!("{instrument}: {e}"))?;
            Ok(InstrumentAssessment {
                instrument,
                assessment,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<MarketRow> = results.iter().map(MarketRow::from).collect();
            print_header(&format!("Market Risk ({})", policy.name));
            print_table(&rows)?;
        }
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Csv => {
            let rows: Vec<MarketRow> = results.iter().map(MarketRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => match results.as_slice() {
            [single] => println!("{}", format_amount(single.assessment.market_rwa)),
            _ => {
                for item in &results {
                    println!("{}\t{}", item.instrument, format_amount(item.assessment.market_rwa));
                }
            }
        },
    }

    Ok(())
}
