//! Operational risk under the Basic Indicator Approach (articles 56-62).
//!
//! `RWA = average gross income × alpha × multiplier`, with alpha 15% and the
//! 12.5 capital-to-RWA multiplier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use solva_core::error::{SolvaError, SolvaResult};

/// Parameters of the basic indicator charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalRiskParams {
    /// Fixed share of gross income held as capital (0.15 = 15%).
    pub alpha: Decimal,
    /// Capital charge → RWA multiplier.
    pub rwa_multiplier: Decimal,
}

impl Default for OperationalRiskParams {
    fn default() -> Self {
        Self {
            alpha: dec!(0.15),
            rwa_multiplier: dec!(12.5),
        }
    }
}

/// Operational risk engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationalRiskEngine {
    params: OperationalRiskParams,
}

impl OperationalRiskEngine {
    /// Creates an engine with the given parameters.
    #[must_use]
    pub fn new(params: OperationalRiskParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &OperationalRiskParams {
        &self.params
    }

    /// Computes operational RWA from average annual gross income.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` if the income is negative or the
    /// RWA leaves the `Decimal` range.
    pub fn compute_operational_rwa(&self, avg_gross_income: Decimal) -> SolvaResult<Decimal> {
        if avg_gross_income < Decimal::ZERO {
            return Err(SolvaError::invalid_input(
                "avg_gross_income",
                format!("{avg_gross_income} must be non-negative"),
            ));
        }

        let rwa = avg_gross_income
            .checked_mul(self.params.alpha)
            .and_then(|v| v.checked_mul(self.params.rwa_multiplier))
            .ok_or_else(|| {
                SolvaError::invalid_input(
                    "avg_gross_income",
                    format!("RWA of {avg_gross_income} exceeds the representable range"),
                )
            })?;
        tracing::debug!(%avg_gross_income, operational_rwa = %rwa, "operational RWA computed");
        Ok(rwa)
    }

    /// Capital charge (before the RWA multiplier).
    ///
    /// # Errors
    ///
    /// See [`compute_operational_rwa`](Self::compute_operational_rwa); a
    /// zero multiplier is also an `InvalidInput`.
    pub fn capital_charge(&self, avg_gross_income: Decimal) -> SolvaResult<Decimal> {
        let rwa = self.compute_operational_rwa(avg_gross_income)?;
        rwa.checked_div(self.params.rwa_multiplier).ok_or_else(|| {
            SolvaError::invalid_input(
                "rwa_multiplier",
                format!("cannot divide {rwa} by {}", self.params.rwa_multiplier),
            )
        })
    }
}

/// Averages annual gross income over the observation years.
///
/// Years with zero or negative gross income are excluded from both numerator
/// and denominator.
///
/// # Errors
///
/// Returns `SolvaError::InsufficientData` if no year has positive income,
/// `SolvaError::InvalidInput` if the incomes sum past the `Decimal` range.
pub fn average_gross_income(annual_incomes: &[Decimal]) -> SolvaResult<Decimal> {
    let positive: Vec<Decimal> = annual_incomes
        .iter()
        .copied()
        .filter(|income| *income > Decimal::ZERO)
        .collect();

    if positive.is_empty() {
        return Err(SolvaError::insufficient_data(1, 0));
    }

    let excluded = annual_incomes.len() - positive.len();
    if excluded > 0 {
        tracing::debug!(excluded, "non-positive income years excluded from average");
    }

    let total = positive
        .iter()
        .try_fold(Decimal::ZERO, |acc, income| acc.checked_add(*income))
        .ok_or_else(|| {
            SolvaError::invalid_input("annual_incomes", "sum exceeds the representable range")
        })?;
    Ok(total / Decimal::from(positive.len()))
}
