//! Calculation outputs: RWA breakdown, solvency result and report record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{SolvaError, SolvaResult};

/// Risk-weighted assets by risk type.
///
/// Components are non-negative and `total_rwa` is their sum, so the total is
/// never below any individual component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RwaBreakdown {
    /// Credit risk RWA.
    pub credit_rwa: Decimal,
    /// Market risk RWA.
    pub market_rwa: Decimal,
    /// Operational risk RWA.
    pub operational_rwa: Decimal,
    /// Sum of the three components.
    pub total_rwa: Decimal,
}

/// Percentage share of each component in the total RWA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RwaShares {
    /// Credit share (%).
    pub credit_pct: Decimal,
    /// Market share (%).
    pub market_pct: Decimal,
    /// Operational share (%).
    pub operational_pct: Decimal,
}

impl RwaBreakdown {
    /// Builds a breakdown from its three components.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidInput` if any component is negative or
    /// their sum leaves the `Decimal` range.
    pub fn new(
        credit_rwa: Decimal,
        market_rwa: Decimal,
        operational_rwa: Decimal,
    ) -> SolvaResult<Self> {
        for (field, value) in [
            ("credit_rwa", credit_rwa),
            ("market_rwa", market_rwa),
            ("operational_rwa", operational_rwa),
        ] {
            if value < Decimal::ZERO {
                return Err(SolvaError::invalid_input(
                    field,
                    format!("{value} must be non-negative"),
                ));
            }
        }

        let total_rwa = credit_rwa
            .checked_add(market_rwa)
            .and_then(|v| v.checked_add(operational_rwa))
            .ok_or_else(|| {
                SolvaError::invalid_input("total_rwa", "sum exceeds the representable range")
            })?;

        Ok(Self {
            credit_rwa,
            market_rwa,
            operational_rwa,
            total_rwa,
        })
    }

    /// Returns each component's share of the total, in percent.
    ///
    /// All shares are zero when the total is zero.
    #[must_use]
    pub fn shares(&self) -> RwaShares {
        if self.total_rwa.is_zero() {
            return RwaShares {
                credit_pct: Decimal::ZERO,
                market_pct: Decimal::ZERO,
                operational_pct: Decimal::ZERO,
            };
        }
        let pct = |v: Decimal| v / self.total_rwa * Decimal::ONE_HUNDRED;
        RwaShares {
            credit_pct: pct(self.credit_rwa),
            market_pct: pct(self.market_rwa),
            operational_pct: pct(self.operational_rwa),
        }
    }
}

/// Compliance classification against the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Ratio at or above the minimum.
    #[serde(rename = "Compliant")]
    Compliant,
    /// Ratio below the minimum, or undefined.
    #[serde(rename = "Non-compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Maps a boolean compliance flag to a status.
    #[must_use]
    pub fn from_flag(compliant: bool) -> Self {
        if compliant {
            Self::Compliant
        } else {
            Self::NonCompliant
        }
    }

    /// Returns the export label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-compliant",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Solvency coefficient and its compliance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvencyResult {
    /// Total risk-weighted assets.
    pub total_rwa: Decimal,
    /// Eligible own funds.
    pub own_funds: Decimal,
    /// Own funds / total RWA × 100, or zero when total RWA is zero.
    pub ratio: Decimal,
    /// Minimum ratio the result was checked against (%).
    pub min_ratio: Decimal,
    /// True when the ratio meets the minimum.
    pub compliant: bool,
}

impl SolvencyResult {
    /// Returns the compliance status.
    #[must_use]
    pub fn status(&self) -> ComplianceStatus {
        ComplianceStatus::from_flag(self.compliant)
    }

    /// Returns the distance to the minimum in percentage points.
    ///
    /// Negative when the ratio is below the minimum.
    #[must_use]
    pub fn headroom(&self) -> Decimal {
        self.ratio - self.min_ratio
    }
}

/// Flat report record, one row per evaluation.
///
/// Field order matches the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvencyReport {
    /// Evaluation date.
    pub date: Date,
    /// Credit risk RWA.
    pub credit_rwa: Decimal,
    /// Market risk RWA.
    pub market_rwa: Decimal,
    /// Operational risk RWA.
    pub operational_rwa: Decimal,
    /// Total RWA.
    pub total_rwa: Decimal,
    /// Eligible own funds.
    pub own_funds: Decimal,
    /// Solvency coefficient (%).
    pub ratio_percent: Decimal,
    /// Compliance label.
    pub compliance: ComplianceStatus,
}

impl SolvencyReport {
    /// Assembles a report row from a breakdown and its solvency result.
    #[must_use]
    pub fn new(date: Date, breakdown: &RwaBreakdown, result: &SolvencyResult) -> Self {
        Self {
            date,
            credit_rwa: breakdown.credit_rwa,
            market_rwa: breakdown.market_rwa,
            operational_rwa: breakdown.operational_rwa,
            total_rwa: breakdown.total_rwa,
            own_funds: result.own_funds,
            ratio_percent: result.ratio,
            compliance: result.status(),
        }
    }
}
