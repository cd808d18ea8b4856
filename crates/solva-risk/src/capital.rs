//! Capital tier aggregation and tiered minima checks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use solva_core::error::{SolvaError, SolvaResult};
use solva_core::types::CapitalTiers;

/// Minimum ratios per tier, in percent of RWA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMinima {
    /// Minimum CET1 ratio.
    pub cet1: Decimal,
    /// Minimum Tier 1 ratio.
    pub tier1: Decimal,
    /// Minimum total capital ratio.
    pub total: Decimal,
}

impl Default for TierMinima {
    fn default() -> Self {
        Self {
            cet1: dec!(8.0),
            tier1: dec!(9.0),
            total: dec!(12.0),
        }
    }
}

/// Outcome of each tier check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChecks {
    /// CET1 meets its minimum.
    pub cet1_ok: bool,
    /// Tier 1 meets its minimum.
    pub tier1_ok: bool,
    /// Total capital meets its minimum.
    pub total_ok: bool,
}

impl TierChecks {
    /// True when every check passes.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.cet1_ok && self.tier1_ok && self.total_ok
    }
}

/// Aggregated capital position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalAdequacy {
    /// Input tiers.
    pub tiers: CapitalTiers,
    /// CET1 + AT1.
    pub tier1: Decimal,
    /// Tier 1 + Tier 2.
    pub total: Decimal,
    /// Per-tier checks.
    pub checks: TierChecks,
    /// True iff all checks pass.
    pub compliant: bool,
}

/// Combines capital tiers and checks them against [`TierMinima`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapitalAggregator {
    minima: TierMinima,
}

impl CapitalAggregator {
    /// Creates an aggregator with the given minima.
    #[must_use]
    pub fn new(minima: TierMinima) -> Self {
        Self { minima }
    }

    /// Returns the minima.
    #[must_use]
    pub fn minima(&self) -> &TierMinima {
        &self.minima
    }

    /// Aggregates the tiers.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` if any tier is negative or a sum
    /// of tiers leaves the `Decimal` range.
    pub fn aggregate(&self, tiers: &CapitalTiers) -> SolvaResult<CapitalAdequacy> {
        tiers.validate()?;

        let tier1 = tiers
            .cet1_ratio
            .checked_add(tiers.at1_ratio)
            .ok_or_else(|| tier_overflow("tier1"))?;
        let total = tier1
            .checked_add(tiers.tier2_ratio)
            .ok_or_else(|| tier_overflow("total"))?;
        let checks = TierChecks {
            cet1_ok: tiers.cet1_ratio >= self.minima.cet1,
            tier1_ok: tier1 >= self.minima.tier1,
            total_ok: total >= self.minima.total,
        };

        tracing::debug!(%tier1, %total, compliant = checks.all_ok(), "capital tiers aggregated");

        Ok(CapitalAdequacy {
            tiers: *tiers,
            tier1,
            total,
            checks,
            compliant: checks.all_ok(),
        })
    }
}

fn tier_overflow(field: &str) -> SolvaError {
    SolvaError::invalid_input(field, "sum of tiers exceeds the representable range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_at_minima() {
        let adequacy = CapitalAggregator::default()
            .aggregate(&CapitalTiers::new(dec!(8.0), dec!(1.0), dec!(3.0)))
            .unwrap();
        assert_eq!(adequacy.tier1, dec!(9.0));
        assert_eq!(adequacy.total, dec!(12.0));
        assert!(adequacy.checks.cet1_ok && adequacy.checks.tier1_ok && adequacy.checks.total_ok);
        assert!(adequacy.compliant);
    }

    #[test]
    fn test_all_checks_fail() {
        let adequacy = CapitalAggregator::default()
            .aggregate(&CapitalTiers::new(dec!(5.0), dec!(1.0), dec!(3.0)))
            .unwrap();
        assert_eq!(adequacy.tier1, dec!(6.0));
        assert_eq!(adequacy.total, dec!(9.0));
        assert!(!adequacy.checks.cet1_ok);
        assert!(!adequacy.checks.tier1_ok);
        assert!(!adequacy.checks.total_ok);
        assert!(!adequacy.compliant);
    }

    #[test]
    fn test_single_failing_check() {
        // CET1 strong, but no Tier 2
        let adequacy = CapitalAggregator::default()
            .aggregate(&CapitalTiers::new(dec!(10.0), dec!(0.5), dec!(0)))
            .unwrap();
        assert!(adequacy.checks.cet1_ok);
        assert!(adequacy.checks.tier1_ok);
        assert!(!adequacy.checks.total_ok);
        assert!(!adequacy.compliant);
    }

    #[test]
    fn test_negative_tier_rejected() {
        let result =
            CapitalAggregator::default().aggregate(&CapitalTiers::new(dec!(-1), dec!(1), dec!(3)));
        assert!(matches!(result, Err(SolvaError::InvalidInput { .. })));
    }

    #[test]
    fn test_tier_sum_overflow_rejected() {
        let result = CapitalAggregator::default()
            .aggregate(&CapitalTiers::new(Decimal::MAX, Decimal::MAX, dec!(0)));
        assert!(matches!(result, Err(SolvaError::InvalidInput { .. })));
    }

    #[test]
    fn test_custom_minima() {
        let aggregator = CapitalAggregator::new(TierMinima {
            cet1: dec!(4.5),
            tier1: dec!(6.0),
            total: dec!(8.0),
        });
        let adequacy = aggregator
            .aggregate(&CapitalTiers::new(dec!(5.0), dec!(1.0), dec!(3.0)))
            .unwrap();
        assert!(adequacy.compliant);
    }
}
