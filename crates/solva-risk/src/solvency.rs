//! Solvency coefficient: own funds over total RWA.
//!
//! `ratio = own_funds / total_rwa × 100`. A zero total RWA yields a ratio of
//! zero and a non-compliant result rather than an error. Negative own funds
//! are a depleted capital base and give a negative, non-compliant ratio.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solva_core::error::{SolvaError, SolvaResult};
use solva_core::types::{RwaBreakdown, SolvencyResult};

/// Evaluates own funds against total RWA and a configured minimum ratio.
///
/// The minimum differs between regulatory profiles (10% under 26/G/2006,
/// 12% under 14/G/13) and is therefore a parameter, never a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvencyEvaluator {
    min_ratio: Decimal,
}

impl Default for SolvencyEvaluator {
    fn default() -> Self {
        Self::new(dec!(10.0))
    }
}

impl SolvencyEvaluator {
    /// Creates an evaluator with the given minimum ratio (percent).
    #[must_use]
    pub fn new(min_ratio: Decimal) -> Self {
        Self { min_ratio }
    }

    /// Returns the minimum ratio (percent).
    #[must_use]
    pub fn min_ratio(&self) -> Decimal {
        self.min_ratio
    }

    /// Evaluates solvency from the three RWA components.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` if a component is negative or the
    /// ratio leaves the `Decimal` range.
    pub fn evaluate(
        &self,
        credit_rwa: Decimal,
        market_rwa: Decimal,
        operational_rwa: Decimal,
        own_funds: Decimal,
    ) -> SolvaResult<SolvencyResult> {
        let breakdown = RwaBreakdown::new(credit_rwa, market_rwa, operational_rwa)?;
        self.evaluate_breakdown(&breakdown, own_funds)
    }

    /// Evaluates solvency for an existing breakdown.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` if the ratio leaves the `Decimal`
    /// range.
    pub fn evaluate_breakdown(
        &self,
        breakdown: &RwaBreakdown,
        own_funds: Decimal,
    ) -> SolvaResult<SolvencyResult> {
        let total_rwa = breakdown.total_rwa;
        let (ratio, compliant) = if total_rwa > Decimal::ZERO {
            let ratio = own_funds
                .checked_div(total_rwa)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| {
                    SolvaError::invalid_input(
                        "own_funds",
                        format!("{own_funds} / {total_rwa} exceeds the representable range"),
                    )
                })?;
            (ratio, ratio >= self.min_ratio)
        } else {
            tracing::warn!(%own_funds, "total RWA is zero, solvency ratio reported as 0");
            (Decimal::ZERO, false)
        };

        tracing::debug!(
            %total_rwa,
            %own_funds,
            %ratio,
            min_ratio = %self.min_ratio,
            compliant,
            "solvency evaluated"
        );

        Ok(SolvencyResult {
            total_rwa,
            own_funds,
            ratio,
            min_ratio: self.min_ratio,
            compliant,
        })
    }
}

/// Evaluates solvency with an explicit minimum ratio.
///
/// # Errors
///
/// See [`SolvencyEvaluator::evaluate`].
pub fn evaluate(
    credit_rwa: Decimal,
    market_rwa: Decimal,
    operational_rwa: Decimal,
    own_funds: Decimal,
    min_ratio: Decimal,
) -> SolvaResult<SolvencyResult> {
    SolvencyEvaluator::new(min_ratio).evaluate(credit_rwa, market_rwa, operational_rwa, own_funds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliant_bank() {
        let result = evaluate(dec!(1000), dec!(200), dec!(300), dec!(180), dec!(10)).unwrap();
        assert_eq!(result.total_rwa, dec!(1500));
        assert_eq!(result.ratio, dec!(12));
        assert!(result.compliant);
    }

    #[test]
    fn test_same_bank_under_stricter_profile() {
        let result = evaluate(dec!(1000), dec!(200), dec!(300), dec!(170), dec!(12)).unwrap();
        assert!(result.ratio < dec!(12));
        assert!(!result.compliant);
    }

    #[test]
    fn test_ratio_exactly_at_minimum_is_compliant() {
        let result = SolvencyEvaluator::new(dec!(12))
            .evaluate(dec!(1000), dec!(200), dec!(300), dec!(180))
            .unwrap();
        assert!(result.compliant);
    }

    #[test]
    fn test_zero_rwa_is_not_an_error() {
        let result = evaluate(dec!(0), dec!(0), dec!(0), dec!(100), dec!(10)).unwrap();
        assert_eq!(result.ratio, Decimal::ZERO);
        assert!(!result.compliant);
    }

    #[test]
    fn test_negative_component_rejected() {
        assert!(matches!(
            evaluate(dec!(1000), dec!(-200), dec!(300), dec!(180), dec!(10)),
            Err(SolvaError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_own_funds_give_negative_ratio() {
        let result = evaluate(dec!(1000), dec!(0), dec!(0), dec!(-50), dec!(10)).unwrap();
        assert_eq!(result.own_funds, dec!(-50));
        assert_eq!(result.ratio, dec!(-5));
        assert!(!result.compliant);
        assert!(result.headroom() < Decimal::ZERO);
    }

    #[test]
    fn test_ratio_overflow_is_an_error() {
        let tiny_rwa = dec!(0.0000001);
        let huge_funds = dec!(10000000000000000000000);
        assert!(matches!(
            evaluate(tiny_rwa, dec!(0), dec!(0), huge_funds, dec!(10)),
            Err(SolvaError::InvalidInput { .. })
        ));
    }
}
