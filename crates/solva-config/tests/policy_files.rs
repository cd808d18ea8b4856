//! Loading policies from disk and running engines built from them.

use std::io::Write;

use rust_decimal_macros::dec;
use solva_config::prelude::*;
use solva_core::types::{CapitalTiers, Date, Exposure, ExposureCategory, PriceSeries};
use tempfile::NamedTempFile;

fn write_policy(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_policy_file_from_disk() {
    let file = write_policy(
        r#"
        name = "BANK.INTERNAL"
        base = "BAM.14G13"
        description = "Internal stress calibration"

        [weights]
        "Corporate unrated" = 1.5

        [operational]
        alpha = 0.18
        "#,
    );

    let policy = RegulatoryPolicy::from_file(file.path()).unwrap();
    assert_eq!(policy.name, "BANK.INTERNAL");
    assert_eq!(policy.description.as_deref(), Some("Internal stress calibration"));
    assert_eq!(policy.min_solvency_ratio, dec!(12.0));

    let corp = Exposure::on_balance(ExposureCategory::CorporateUnrated, dec!(100));
    assert_eq!(policy.credit_engine().compute_credit_rwa(&[corp]).unwrap(), dec!(150));
    assert_eq!(
        policy.operational_engine().compute_operational_rwa(dec!(1000)).unwrap(),
        dec!(2250)
    );
}

#[test]
fn missing_file_reports_path() {
    let err = RegulatoryPolicy::from_file("/nonexistent/policy.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/policy.toml"));
}

#[test]
fn registry_loads_file_and_serves_it() {
    let registry = PolicyRegistry::new();
    let file = write_policy("name = \"LOCAL.STRICT\"\nmin_solvency_ratio = 14\n");

    registry.load_file(file.path()).unwrap();
    let policy = registry.get("LOCAL.STRICT").unwrap();

    let result = policy
        .solvency_evaluator()
        .evaluate(dec!(1000), dec!(200), dec!(300), dec!(180))
        .unwrap();
    assert_eq!(result.ratio, dec!(12));
    assert!(!result.compliant);
}

#[test]
fn same_bank_differs_between_profiles() {
    let registry = PolicyRegistry::new();
    let old = registry.get("BAM.26G2006").unwrap();
    let new = registry.get("BAM.14G13").unwrap();

    let own_funds = dec!(165);
    let under_old = old
        .solvency_evaluator()
        .evaluate(dec!(1000), dec!(200), dec!(300), own_funds)
        .unwrap();
    let under_new = new
        .solvency_evaluator()
        .evaluate(dec!(1000), dec!(200), dec!(300), own_funds)
        .unwrap();

    assert!(under_old.compliant);
    assert!(!under_new.compliant);
    assert_eq!(under_old.ratio, under_new.ratio);
}

#[test]
fn policy_market_floor_feeds_engine() {
    let policy = RegulatoryPolicy::from_toml_str("[market]\nvolatility_floor = 0.12").unwrap();
    let series = PriceSeries::daily(Date::from_ymd(2021, 6, 1).unwrap(), &[dec!(100); 10]);
    assert_eq!(policy.market_engine().compute_market_rwa(&series).unwrap(), dec!(150));
}

#[test]
fn policy_tier_minima_feed_aggregator() {
    let policy = RegulatoryPolicy::from_toml_str(
        "[tier_minima]\ncet1 = 4.5\ntier1 = 6.0\ntotal = 8.0",
    )
    .unwrap();
    let adequacy = policy
        .capital_aggregator()
        .aggregate(&CapitalTiers::new(dec!(5), dec!(1), dec!(3)))
        .unwrap();
    assert!(adequacy.compliant);
}

#[test]
fn unordered_tier_minima_rejected() {
    let err = RegulatoryPolicy::from_toml_str("[tier_minima]\ncet1 = 10.0").unwrap_err();
    assert!(err.to_string().contains("tier_minima"));
}
