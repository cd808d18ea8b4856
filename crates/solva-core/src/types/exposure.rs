//! Credit exposures and their mitigation / impairment attributes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ExposureCategory;
use crate::error::{SolvaError, SolvaResult};

/// Credit risk mitigation (guarantee or collateral) covering part of an exposure.
///
/// The covered portion is weighted at `mitigant_weight`, typically the weight
/// of the guarantor or the collateral issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mitigant {
    /// Amount of the exposure covered by the mitigant.
    pub covered_amount: Decimal,
    /// Risk weight applied to the covered amount (fraction, 0.20 = 20%).
    pub mitigant_weight: Decimal,
}

impl Mitigant {
    /// Creates a new mitigant.
    #[must_use]
    pub fn new(covered_amount: Decimal, mitigant_weight: Decimal) -> Self {
        Self {
            covered_amount,
            mitigant_weight,
        }
    }
}

/// Provisioning status of a past-due exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastDueAdjustment {
    /// Specific provisions as a fraction of the outstanding amount, in [0, 1].
    pub provisioning_rate: Decimal,
}

impl PastDueAdjustment {
    /// Creates a new past-due adjustment.
    #[must_use]
    pub fn new(provisioning_rate: Decimal) -> Self {
        Self { provisioning_rate }
    }
}

/// A single credit exposure.
///
/// # Example
///
/// ```rust
/// use solva_core::types::{Exposure, ExposureCategory, Mitigant};
/// use rust_decimal_macros::dec;
///
/// let undrawn = Exposure::on_balance(ExposureCategory::CorporateA, dec!(500))
///     .with_id("RCF-01")
///     .with_ccf(dec!(0.5));
/// assert_eq!(undrawn.credit_equivalent(), dec!(250.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exposure {
    /// Optional identifier used in reports.
    #[serde(default)]
    pub id: Option<String>,
    /// Regulatory category.
    pub category: ExposureCategory,
    /// Exposure at default, non-negative.
    pub exposure_at_default: Decimal,
    /// Credit conversion factor in [0, 1]; 1.0 for on-balance-sheet items.
    pub credit_conversion_factor: Decimal,
    /// Optional guarantee / collateral.
    #[serde(default)]
    pub mitigant: Option<Mitigant>,
    /// Set when the exposure is past due.
    #[serde(default)]
    pub past_due: Option<PastDueAdjustment>,
}

impl Exposure {
    /// Creates an on-balance-sheet exposure (CCF = 1.0).
    #[must_use]
    pub fn on_balance(category: ExposureCategory, exposure_at_default: Decimal) -> Self {
        Self {
            id: None,
            category,
            exposure_at_default,
            credit_conversion_factor: Decimal::ONE,
            mitigant: None,
            past_due: None,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the credit conversion factor (off-balance-sheet items).
    pub fn with_ccf(mut self, ccf: Decimal) -> Self {
        self.credit_conversion_factor = ccf;
        self
    }

    /// Attaches a credit risk mitigant.
    pub fn with_mitigant(mut self, mitigant: Mitigant) -> Self {
        self.mitigant = Some(mitigant);
        self
    }

    /// Flags the exposure as past due with the given provisioning rate.
    pub fn with_past_due(mut self, provisioning_rate: Decimal) -> Self {
        self.past_due = Some(PastDueAdjustment::new(provisioning_rate));
        self
    }

    /// Returns the credit-equivalent amount (EAD × CCF).
    #[must_use]
    pub fn credit_equivalent(&self) -> Decimal {
        self.exposure_at_default * self.credit_conversion_factor
    }

    /// Returns the identifier or an empty string.
    #[must_use]
    pub fn id_or_default(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Validates the exposure fields.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidExposure` when the EAD is negative, the CCF
    /// lies outside [0, 1], the mitigant covers more than the EAD or carries a
    /// negative amount or weight, or the provisioning rate lies outside [0, 1].
    pub fn validate(&self) -> SolvaResult<()> {
        let id = self.id_or_default();

        if self.exposure_at_default < Decimal::ZERO {
            return Err(SolvaError::invalid_exposure(format!(
                "exposure '{id}': EAD {} must be non-negative",
                self.exposure_at_default
            )));
        }

        if self.credit_conversion_factor < Decimal::ZERO
            || self.credit_conversion_factor > Decimal::ONE
        {
            return Err(SolvaError::invalid_exposure(format!(
                "exposure '{id}': CCF {} must be within [0, 1]",
                self.credit_conversion_factor
            )));
        }

        if let Some(mitigant) = &self.mitigant {
            if mitigant.covered_amount < Decimal::ZERO {
                return Err(SolvaError::invalid_exposure(format!(
                    "exposure '{id}': covered amount {} must be non-negative",
                    mitigant.covered_amount
                )));
            }
            if mitigant.covered_amount > self.exposure_at_default {
                return Err(SolvaError::invalid_exposure(format!(
                    "exposure '{id}': covered amount {} exceeds EAD {}",
                    mitigant.covered_amount, self.exposure_at_default
                )));
            }
            if mitigant.mitigant_weight < Decimal::ZERO {
                return Err(SolvaError::invalid_exposure(format!(
                    "exposure '{id}': mitigant weight {} must be non-negative",
                    mitigant.mitigant_weight
                )));
            }
        }

        if let Some(past_due) = &self.past_due {
            let rate = past_due.provisioning_rate;
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(SolvaError::invalid_exposure(format!(
                    "exposure '{id}': provisioning rate {rate} must be within [0, 1]"
                )));
            }
        }

        Ok(())
    }
}
