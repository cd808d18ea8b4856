//! Policy command implementation.
//!
//! Lists the registered regulatory policies and shows the parameters of one.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use solva_config::{PastDueRuleConfig, PolicyRegistry, RegulatoryPolicy};

use crate::cli::OutputFormat;
use crate::output::{
    format_percent, format_weight, print_header, print_json, print_output, KeyValue,
};

/// Arguments for the policy command.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

/// Policy subcommands.
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// List registered policies
    List,

    /// Show the parameters of a policy
    Show {
        /// Policy name (defaults to the active policy)
        name: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct PolicyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Min Ratio")]
    min_ratio: String,
    #[tabled(rename = "Read-only")]
    read_only: bool,
    #[tabled(rename = "Description")]
    description: String,
}

/// Execute the policy command.
///
/// `show` without a name displays `active`, the policy selected by the
/// global options.
pub fn execute(
    args: PolicyArgs,
    format: OutputFormat,
    registry: &PolicyRegistry,
    active: &RegulatoryPolicy,
) -> Result<()> {
    match args.command {
        PolicyCommand::List => execute_list(format, registry),
        PolicyCommand::Show { name } => {
            let policy = match name {
                Some(name) if name != active.name => registry.get(&name)?,
                _ => active.clone(),
            };
            execute_show(format, &policy)
        }
    }
}

fn execute_list(format: OutputFormat, registry: &PolicyRegistry) -> Result<()> {
    let policies = registry
        .names()?
        .iter()
        .map(|name| registry.get(name))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Json => print_json(&policies)?,
        OutputFormat::Minimal => {
            for policy in &policies {
                println!("{}", policy.name);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<PolicyRow> = policies
                .iter()
                .map(|p| PolicyRow {
                    name: p.name.clone(),
                    min_ratio: format_percent(p.min_solvency_ratio),
                    read_only: p.read_only,
                    description: p.description.clone().unwrap_or_default(),
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Regulatory Policies");
            }
            print_output(&rows, format)?;
        }
    }

    Ok(())
}

fn execute_show(format: OutputFormat, policy: &RegulatoryPolicy) -> Result<()> {
    match format {
        OutputFormat::Json => return print_json(policy),
        OutputFormat::Minimal => {
            println!("{}", policy.min_solvency_ratio);
            return Ok(());
        }
        OutputFormat::Table | OutputFormat::Csv => {}
    }

    let mut rows = vec![
        KeyValue::new("Name", policy.name.clone()),
        KeyValue::percent("Minimum Solvency Ratio", policy.min_solvency_ratio),
        KeyValue::percent("CET1 Minimum", policy.tier_minima.cet1),
        KeyValue::percent("Tier 1 Minimum", policy.tier_minima.tier1),
        KeyValue::percent("Total Capital Minimum", policy.tier_minima.total),
        KeyValue::new("Volatility Floor", format_weight(policy.market.volatility_floor)),
        KeyValue::new(
            "Volatility Divisor",
            policy.market.volatility_divisor.to_string(),
        ),
        KeyValue::new("Operational Alpha", format_weight(policy.operational.alpha)),
        KeyValue::new("Past-due Rule", past_due_summary(&policy.past_due)),
    ];
    rows.extend(policy.weights.iter().map(|(category, weight)| {
        KeyValue::new(format!("Weight {}", category.code()), format_weight(weight))
    }));

    if format == OutputFormat::Table {
        print_header(&format!("Policy {}", policy.name));
        if let Some(description) = &policy.description {
            println!("{description}");
        }
    }
    print_output(&rows, format)
}

fn past_due_summary(rule: &PastDueRuleConfig) -> String {
    match rule {
        PastDueRuleConfig::Linear(r) => format!(
            "linear: anchor {}, clamp [{}, {}]",
            r.anchor, r.floor, r.ceiling
        ),
        PastDueRuleConfig::Banded(r) => format!(
            "banded: 1.50 below {}, 1.00 below {}, else {}",
            r.lower_threshold, r.upper_threshold, r.reduced_weight
        ),
    }
}
