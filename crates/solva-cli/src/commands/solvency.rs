//! Solvency command implementation.
//!
//! Combines credit, market and operational RWA with own funds into the
//! solvency coefficient. Each component is either given directly or computed
//! from its input file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use solva_config::RegulatoryPolicy;
use solva_core::types::{Date, RwaBreakdown, RwaShares, SolvencyReport, SolvencyResult};
use solva_risk::operational::average_gross_income;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::data::{load_exposures, NavTable};
use crate::output::{
    format_amount, format_percent, print_csv, print_header, print_json, print_success,
    print_table, print_warning, status_marker, KeyValue,
};

/// Arguments for the solvency command.
#[derive(Args, Debug)]
pub struct SolvencyArgs {
    /// Eligible own funds
    #[arg(short, long, allow_negative_numbers = true)]
    pub own_funds: Decimal,

    /// Credit RWA, if already known
    #[arg(long, conflicts_with = "exposures", allow_negative_numbers = true)]
    pub credit_rwa: Option<Decimal>,

    /// Exposure CSV to compute credit RWA from
    #[arg(short, long)]
    pub exposures: Option<PathBuf>,

    /// Market RWA, if already known
    #[arg(long, conflicts_with = "navs", allow_negative_numbers = true)]
    pub market_rwa: Option<Decimal>,

    /// NAV table CSV to compute market RWA from
    #[arg(short, long)]
    pub navs: Option<PathBuf>,

    /// Instrument column of the NAV table
    #[arg(short, long, requires = "navs")]
    pub column: Option<String>,

    /// Operational RWA, if already known
    #[arg(
        long,
        conflicts_with_all = ["income", "incomes"],
        allow_negative_numbers = true
    )]
    pub operational_rwa: Option<Decimal>,

    /// Average annual gross income
    #[arg(short, long, conflicts_with = "incomes", allow_negative_numbers = true)]
    pub income: Option<Decimal>,

    /// Annual gross incomes, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub incomes: Option<Vec<Decimal>>,

    /// Report date (YYYY-MM-DD). Defaults to the last NAV date, else today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Write the report row to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Basis")]
    basis: &'static str,
}

#[derive(Serialize)]
struct SolvencyOutput<'a> {
    policy: &'a str,
    report: &'a SolvencyReport,
    min_ratio: Decimal,
    headroom: Decimal,
    shares: RwaShares,
}

/// Execute the solvency command.
pub fn execute(args: SolvencyArgs, format: OutputFormat, policy: &RegulatoryPolicy) -> Result<()> {
    let navs = args.navs.as_deref().map(NavTable::load).transpose()?;

    let credit_rwa = match (args.credit_rwa, &args.exposures) {
        (Some(rwa), _) => rwa,
        (None, Some(path)) => credit_from_file(path, policy)?,
        (None, None) => missing_component("credit"),
    };

    let market_rwa = match (args.market_rwa, &navs) {
        (Some(rwa), _) => rwa,
        (None, Some(table)) => {
            let instrument = table.resolve_instrument(args.column.as_deref())?;
            let series = table.series(&instrument)?;
            policy.market_engine().compute_market_rwa(&series)?
        }
        (None, None) => missing_component("market"),
    };

    let operational_rwa = match (args.operational_rwa, args.income, &args.incomes) {
        (Some(rwa), _, _) => rwa,
        (None, Some(income), _) => policy.operational_engine().compute_operational_rwa(income)?,
        (None, None, Some(incomes)) => policy
            .operational_engine()
            .compute_operational_rwa(average_gross_income(incomes)?)?,
        (None, None, None) => missing_component("operational"),
    };

    let date = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => navs
            .as_ref()
            .and_then(NavTable::last_date)
            .unwrap_or_else(Date::today),
    };

    let breakdown = RwaBreakdown::new(credit_rwa, market_rwa, operational_rwa)?;
    let result = policy
        .solvency_evaluator()
        .evaluate_breakdown(&breakdown, args.own_funds)?;
    let report = SolvencyReport::new(date, &breakdown, &result);

    if let Some(path) = &args.export {
        export_report(path, &report)?;
    }

    match format {
        OutputFormat::Table => print_report(policy, &breakdown, &result, &report)?,
        OutputFormat::Json => print_json(&SolvencyOutput {
            policy: &policy.name,
            report: &report,
            min_ratio: result.min_ratio,
            headroom: result.headroom(),
            shares: breakdown.shares(),
        })?,
        OutputFormat::Csv => print_csv(std::slice::from_ref(&report))?,
        OutputFormat::Minimal => println!("{}", format_amount(result.ratio)),
    }

    if format == OutputFormat::Table {
        if let Some(path) = &args.export {
            print_success(&format!("Report written to {}", path.display()));
        }
    }

    Ok(())
}

fn credit_from_file(path: &Path, policy: &RegulatoryPolicy) -> Result<Decimal> {
    let exposures = load_exposures(path)?;
    Ok(policy.credit_engine().compute_credit_rwa(&exposures)?)
}

fn missing_component(name: &str) -> Decimal {
    print_warning(&format!("no {name} risk input given, {name} RWA taken as 0"));
    Decimal::ZERO
}

fn export_report(path: &Path, report: &SolvencyReport) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.serialize(report)?;
    wtr.flush()?;
    tracing::debug!(path = %path.display(), "solvency report exported");
    Ok(())
}

fn print_report(
    policy: &RegulatoryPolicy,
    breakdown: &RwaBreakdown,
    result: &SolvencyResult,
    report: &SolvencyReport,
) -> Result<()> {
    let shares = breakdown.shares();
    let components = [
        ComponentRow {
            component: "Credit RWA",
            amount: format_amount(breakdown.credit_rwa),
            share: format_percent(shares.credit_pct),
            basis: "Σ exposure × weight",
        },
        ComponentRow {
            component: "Market RWA",
            amount: format_amount(breakdown.market_rwa),
            share: format_percent(shares.market_pct),
            basis: "mean NAV × max(floor, σ/divisor) × 12.5",
        },
        ComponentRow {
            component: "Operational RWA",
            amount: format_amount(breakdown.operational_rwa),
            share: format_percent(shares.operational_pct),
            basis: "α × average gross income × 12.5",
        },
        ComponentRow {
            component: "Total RWA",
            amount: format_amount(breakdown.total_rwa),
            share: format_percent(Decimal::ONE_HUNDRED),
            basis: "credit + market + operational",
        },
    ];

    print_header(&format!("Solvency Coefficient ({}) on {}", policy.name, report.date));
    print_table(&components)?;
    print_table(&[
        KeyValue::amount("Own Funds", result.own_funds),
        KeyValue::percent("Solvency Ratio", result.ratio),
        KeyValue::percent("Minimum Ratio", result.min_ratio),
        KeyValue::new(
            "Status",
            format!("{} {}", status_marker(result.compliant), result.status()),
        ),
    ])?;
    Ok(())
}
