//! Integration tests for solva-risk.
//!
//! End-to-end scenarios composing the engines the way a caller does: each
//! engine runs independently and the evaluator combines their outputs.

use approx::assert_relative_eq;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solva_core::prelude::*;
use solva_risk::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// A small mixed banking book.
fn banking_book() -> Vec<Exposure> {
    vec![
        Exposure::on_balance(ExposureCategory::SovereignDomesticLocal, dec!(5_000)).with_id("BT-2030"),
        Exposure::on_balance(ExposureCategory::BankA, dec!(1_200)).with_id("INTERBANK-1"),
        Exposure::on_balance(ExposureCategory::CorporateUnrated, dec!(3_000))
            .with_id("CORP-LOAN-7")
            .with_mitigant(Mitigant::new(dec!(1_000), dec!(0.20))),
        Exposure::on_balance(ExposureCategory::CorporateA, dec!(800))
            .with_id("RCF-UNDRAWN")
            .with_ccf(dec!(0.50)),
        Exposure::on_balance(ExposureCategory::Sme, dec!(1_500)).with_id("SME-POOL"),
        Exposure::on_balance(ExposureCategory::ResidentialMortgage, dec!(2_000)).with_id("MORTGAGES"),
        Exposure::on_balance(ExposureCategory::PastDue, dec!(400))
            .with_id("NPL-3")
            .with_past_due(dec!(0.30)),
        Exposure::on_balance(ExposureCategory::Venture, dec!(100)).with_id("VC-FUND"),
    ]
}

/// Daily NAV observations with a moderate volatility.
fn nav_series() -> PriceSeries {
    let start = Date::from_ymd(2015, 3, 2).unwrap();
    PriceSeries::daily(
        start,
        &[
            dec!(100.0),
            dec!(101.5),
            dec!(99.8),
            dec!(102.3),
            dec!(103.0),
            dec!(100.9),
            dec!(104.2),
            dec!(105.0),
        ],
    )
}

// =============================================================================
// CREDIT
// =============================================================================

#[test]
fn zero_ead_contributes_nothing_for_every_category() {
    let engine = CreditRiskEngine::default();
    for category in ExposureCategory::all() {
        let exposure = Exposure::on_balance(*category, Decimal::ZERO)
            .with_mitigant(Mitigant::new(Decimal::ZERO, dec!(0.2)));
        assert_eq!(engine.exposure_rwa(&exposure).unwrap().rwa, Decimal::ZERO);
        let past_due = Exposure::on_balance(*category, Decimal::ZERO).with_past_due(dec!(0.1));
        assert_eq!(engine.exposure_rwa(&past_due).unwrap().rwa, Decimal::ZERO);
    }
}

#[test]
fn mitigated_exposure_matches_worked_example() {
    // (100 − 40) × 1.0 × 1.00 + 40 × 1.0 × 0.20 = 60 + 8 = 68
    let engine = CreditRiskEngine::default();
    let exposure = Exposure::on_balance(ExposureCategory::CorporateUnrated, dec!(100))
        .with_mitigant(Mitigant::new(dec!(40), dec!(0.20)));
    assert_eq!(engine.compute_credit_rwa(&[exposure]).unwrap(), dec!(68));
}

#[test]
fn past_due_half_provisioned_weighs_one_hundred_percent() {
    let engine = CreditRiskEngine::default();
    let exposure =
        Exposure::on_balance(ExposureCategory::PastDue, dec!(250)).with_past_due(dec!(0.50));
    assert_eq!(engine.effective_weight(&exposure), dec!(1.00));
    assert_eq!(engine.compute_credit_rwa(&[exposure]).unwrap(), dec!(250));
}

#[test]
fn banking_book_credit_rwa() {
    let engine = CreditRiskEngine::default();
    let book = banking_book();

    // 0 + 600 + (2000 + 200) + 200 + 1125 + 700 + 480 + 150
    assert_eq!(engine.compute_credit_rwa(&book).unwrap(), dec!(5455));

    let detail = engine.breakdown(&book).unwrap();
    assert_eq!(detail.len(), book.len());
    let npl = detail.iter().find(|d| d.id.as_deref() == Some("NPL-3")).unwrap();
    assert_eq!(npl.base_weight, dec!(1.50));
    assert_eq!(npl.applied_weight, dec!(1.20));
    let total: Decimal = detail.iter().map(|d| d.rwa).sum();
    assert_eq!(total, dec!(5455));
}

#[test]
fn credit_rwa_is_additive_over_split_books() {
    let engine = CreditRiskEngine::default();
    let book = banking_book();
    let (a, b) = book.split_at(3);
    assert_eq!(
        engine.compute_credit_rwa(&book).unwrap(),
        engine.compute_credit_rwa(a).unwrap() + engine.compute_credit_rwa(b).unwrap()
    );
}

#[test]
fn unknown_label_gets_default_weight() {
    let table = WeightTable::standard();
    for label in ["SOROS FUND (Equity - non noté)", "crypto", "", "BANK_Z"] {
        assert_eq!(table.weight_for_label(label), DEFAULT_RISK_WEIGHT);
    }
}

// =============================================================================
// MARKET
// =============================================================================

#[test]
fn constant_series_applies_the_floor() {
    let engine = MarketRiskEngine::default();
    let series = PriceSeries::daily(Date::from_ymd(2020, 1, 1).unwrap(), &[dec!(42.5); 30]);
    // mean × 0.08 × 12.5
    assert_eq!(
        engine.compute_market_rwa(&series).unwrap(),
        dec!(42.5) * dec!(0.08) * dec!(12.5)
    );
}

#[test]
fn market_rwa_scales_linearly_with_the_series() {
    let engine = MarketRiskEngine::default();
    let series = nav_series();
    let base = engine.compute_market_rwa(&series).unwrap().to_f64().unwrap();
    for k in [dec!(0.5), dec!(3), dec!(1000)] {
        let scaled = engine
            .compute_market_rwa(&series.scaled(k).unwrap())
            .unwrap()
            .to_f64()
            .unwrap();
        assert_relative_eq!(scaled, base * k.to_f64().unwrap(), max_relative = 1e-12);
    }
}

#[test]
fn market_errors_are_raised_at_the_boundary() {
    let engine = MarketRiskEngine::default();
    let single = PriceSeries::daily(Date::from_ymd(2020, 1, 1).unwrap(), &[dec!(10)]);
    assert!(matches!(
        engine.compute_market_rwa(&single),
        Err(SolvaError::InsufficientData { .. })
    ));

    let negative =
        PriceSeries::daily(Date::from_ymd(2020, 1, 1).unwrap(), &[dec!(10), dec!(-1)]);
    assert!(matches!(
        engine.compute_market_rwa(&negative),
        Err(SolvaError::InvalidSeries { .. })
    ));
}

// =============================================================================
// CAPITAL & SOLVENCY
// =============================================================================

#[test]
fn tiers_at_the_minima_pass() {
    let adequacy = CapitalAggregator::default()
        .aggregate(&CapitalTiers::new(dec!(8.0), dec!(1.0), dec!(3.0)))
        .unwrap();
    assert_eq!(adequacy.tier1, dec!(9.0));
    assert_eq!(adequacy.total, dec!(12.0));
    assert!(adequacy.checks.all_ok());
}

#[test]
fn weak_tiers_fail_every_check() {
    let adequacy = CapitalAggregator::default()
        .aggregate(&CapitalTiers::new(dec!(5.0), dec!(1.0), dec!(3.0)))
        .unwrap();
    assert!(!adequacy.checks.cet1_ok);
    assert!(!adequacy.checks.tier1_ok);
    assert!(!adequacy.checks.total_ok);
}

#[test]
fn solvency_worked_example() {
    let result = evaluate(dec!(1000), dec!(200), dec!(300), dec!(180), dec!(10)).unwrap();
    assert_eq!(result.total_rwa, dec!(1500));
    assert_eq!(result.ratio, dec!(12.0));
    assert!(result.compliant);
}

#[test]
fn zero_total_rwa_is_non_compliant_without_error() {
    let result = evaluate(dec!(0), dec!(0), dec!(0), dec!(100), dec!(10)).unwrap();
    assert_eq!(result.ratio, Decimal::ZERO);
    assert!(!result.compliant);
}

#[test]
fn full_pipeline_produces_report_row() {
    let credit = CreditRiskEngine::default()
        .compute_credit_rwa(&banking_book())
        .unwrap();
    let market = MarketRiskEngine::default()
        .compute_market_rwa(&nav_series())
        .unwrap();
    let operational = OperationalRiskEngine::default()
        .compute_operational_rwa(dec!(1200))
        .unwrap();

    let breakdown = RwaBreakdown::new(credit, market, operational).unwrap();
    assert!(breakdown.total_rwa >= breakdown.credit_rwa);
    assert!(breakdown.total_rwa >= breakdown.market_rwa);
    assert!(breakdown.total_rwa >= breakdown.operational_rwa);

    let result = SolvencyEvaluator::new(dec!(10))
        .evaluate_breakdown(&breakdown, dec!(2500))
        .unwrap();
    let report = SolvencyReport::new(Date::from_ymd(2019, 5, 1).unwrap(), &breakdown, &result);

    assert_eq!(report.total_rwa, credit + market + operational);
    assert_eq!(report.compliance, result.status());
    assert_eq!(report.compliance, ComplianceStatus::from_flag(result.ratio >= dec!(10)));

    let shares = breakdown.shares();
    let sum = (shares.credit_pct + shares.market_pct + shares.operational_pct)
        .to_f64()
        .unwrap();
    assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
}

#[test]
fn engines_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CreditRiskEngine>();
    assert_send_sync::<MarketRiskEngine>();
    assert_send_sync::<OperationalRiskEngine>();
    assert_send_sync::<CapitalAggregator>();
    assert_send_sync::<SolvencyEvaluator>();

    let engine = std::sync::Arc::new(CreditRiskEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.compute_credit_rwa(&banking_book()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), dec!(5455));
    }
}
