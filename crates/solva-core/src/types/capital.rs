//! Regulatory capital tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SolvaError, SolvaResult};

/// Capital tiers expressed as percentages of risk-weighted exposure.
///
/// # Example
///
/// ```rust
/// use solva_core::types::CapitalTiers;
/// use rust_decimal_macros::dec;
///
/// let tiers = CapitalTiers::new(dec!(8.0), dec!(1.0), dec!(3.0));
/// assert_eq!(tiers.tier1_ratio(), dec!(9.0));
/// assert_eq!(tiers.total_ratio(), dec!(12.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalTiers {
    /// Common Equity Tier 1 ratio (%).
    pub cet1_ratio: Decimal,
    /// Additional Tier 1 ratio (%).
    pub at1_ratio: Decimal,
    /// Tier 2 ratio (%).
    pub tier2_ratio: Decimal,
}

impl CapitalTiers {
    /// Creates a new set of capital tiers.
    #[must_use]
    pub fn new(cet1_ratio: Decimal, at1_ratio: Decimal, tier2_ratio: Decimal) -> Self {
        Self {
            cet1_ratio,
            at1_ratio,
            tier2_ratio,
        }
    }

    /// Tier 1 ratio: CET1 + AT1.
    #[must_use]
    pub fn tier1_ratio(&self) -> Decimal {
        self.cet1_ratio + self.at1_ratio
    }

    /// Total capital ratio: Tier 1 + Tier 2.
    #[must_use]
    pub fn total_ratio(&self) -> Decimal {
        self.tier1_ratio() + self.tier2_ratio
    }

    /// Rejects negative percentages.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` naming the first negative tier.
    pub fn validate(&self) -> SolvaResult<()> {
        for (field, value) in [
            ("cet1_ratio", self.cet1_ratio),
            ("at1_ratio", self.at1_ratio),
            ("tier2_ratio", self.tier2_ratio),
        ] {
            if value < Decimal::ZERO {
                return Err(SolvaError::invalid_input(
                    field,
                    format!("{value} must be non-negative"),
                ));
            }
        }
        Ok(())
    }
}
