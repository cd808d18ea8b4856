//! Credit risk RWA under the standardized approach.
//!
//! Per exposure:
//!
//! - unmitigated: `EAD × CCF × w`
//! - mitigated: `(EAD − covered) × CCF × w + covered × CCF × w_mitigant`
//!
//! where `w` is the table weight of the category, replaced by the past-due
//! strategy's weight when the exposure is flagged past due. Portfolio RWA is
//! the sum over exposures and is additive over disjoint portfolios.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solva_core::error::{SolvaError, SolvaResult};
use solva_core::types::{Exposure, ExposureCategory};

use crate::past_due::{LinearProvisioningRule, PastDueWeighting};
use crate::weights::WeightTable;

/// Portfolio size above which the `parallel` feature fans out across threads.
pub const PARALLEL_THRESHOLD: usize = 1_000;

/// RWA detail for a single exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRwa {
    /// Exposure identifier, if any.
    pub id: Option<String>,
    /// Regulatory category.
    pub category: ExposureCategory,
    /// EAD × CCF.
    pub credit_equivalent: Decimal,
    /// Table weight of the category.
    pub base_weight: Decimal,
    /// Weight applied to the uncovered portion.
    pub applied_weight: Decimal,
    /// Covered amount, zero when unmitigated.
    pub covered_amount: Decimal,
    /// Weight of the covered portion, if mitigated.
    pub mitigant_weight: Option<Decimal>,
    /// Risk-weighted amount.
    pub rwa: Decimal,
}

impl ExposureRwa {
    /// Average weight over the whole credit-equivalent amount.
    ///
    /// Zero for a zero exposure.
    #[must_use]
    pub fn blended_weight(&self) -> Decimal {
        if self.credit_equivalent.is_zero() {
            Decimal::ZERO
        } else {
            self.rwa / self.credit_equivalent
        }
    }
}

/// Credit risk engine.
///
/// Holds a weight table and a past-due strategy; both are read-only after
/// construction.
#[derive(Debug, Clone)]
pub struct CreditRiskEngine {
    weights: WeightTable,
    past_due_rule: Arc<dyn PastDueWeighting>,
}

impl Default for CreditRiskEngine {
    fn default() -> Self {
        Self::new(WeightTable::standard())
    }
}

impl CreditRiskEngine {
    /// Creates an engine using `weights` and the linear past-due rule.
    #[must_use]
    pub fn new(weights: WeightTable) -> Self {
        Self {
            weights,
            past_due_rule: Arc::new(LinearProvisioningRule::default()),
        }
    }

    /// Replaces the past-due strategy.
    #[must_use]
    pub fn with_past_due_rule(mut self, rule: Arc<dyn PastDueWeighting>) -> Self {
        self.past_due_rule = rule;
        self
    }

    /// Returns the weight table.
    #[must_use]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Returns the weight applied to the uncovered part of `exposure`.
    #[must_use]
    pub fn effective_weight(&self, exposure: &Exposure) -> Decimal {
        let base = self.weights.weight_for(exposure.category);
        match &exposure.past_due {
            Some(adjustment) => self.past_due_rule.effective_weight(base, adjustment),
            None => base,
        }
    }

    /// Computes the RWA of a single exposure.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidExposure` if the exposure fails validation.
    pub fn exposure_rwa(&self, exposure: &Exposure) -> SolvaResult<ExposureRwa> {
        exposure.validate()?;

        let ccf = exposure.credit_conversion_factor;
        let base_weight = self.weights.weight_for(exposure.category);
        let applied_weight = self.effective_weight(exposure);

        let overflow = || {
            SolvaError::invalid_exposure(format!(
                "exposure '{}': RWA exceeds the representable range",
                exposure.id_or_default()
            ))
        };
        let weighted = |amount: Decimal, weight: Decimal| {
            amount
                .checked_mul(ccf)
                .and_then(|v| v.checked_mul(weight))
                .ok_or_else(overflow)
        };

        let (covered_amount, mitigant_weight, rwa) = match &exposure.mitigant {
            Some(mitigant) => {
                let uncovered = exposure.exposure_at_default - mitigant.covered_amount;
                let rwa = weighted(uncovered, applied_weight)?
                    .checked_add(weighted(mitigant.covered_amount, mitigant.mitigant_weight)?)
                    .ok_or_else(overflow)?;
                (mitigant.covered_amount, Some(mitigant.mitigant_weight), rwa)
            }
            None => (
                Decimal::ZERO,
                None,
                weighted(exposure.exposure_at_default, applied_weight)?,
            ),
        };

        if exposure.past_due.is_some() {
            tracing::trace!(
                id = exposure.id_or_default(),
                rule = self.past_due_rule.name(),
                %applied_weight,
                "past-due weight applied"
            );
        }

        Ok(ExposureRwa {
            id: exposure.id.clone(),
            category: exposure.category,
            credit_equivalent: exposure.credit_equivalent(),
            base_weight,
            applied_weight,
            covered_amount,
            mitigant_weight,
            rwa,
        })
    }

    /// Computes per-exposure RWA detail, in input order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid exposure; no partial result is returned.
    pub fn breakdown(&self, exposures: &[Exposure]) -> SolvaResult<Vec<ExposureRwa>> {
        maybe_parallel_map(exposures, |e| self.exposure_rwa(e))
            .into_iter()
            .collect()
    }

    /// Computes total credit RWA.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidExposure` for the first malformed exposure
    /// and `SolvaError::InvalidInput` if the total leaves the `Decimal` range.
    pub fn compute_credit_rwa(&self, exposures: &[Exposure]) -> SolvaResult<Decimal> {
        let mut total = Decimal::ZERO;
        for item in maybe_parallel_map(exposures, |e| self.exposure_rwa(e).map(|r| r.rwa)) {
            total = add_rwa(total, item?)?;
        }

        tracing::debug!(exposures = exposures.len(), credit_rwa = %total, "credit RWA computed");
        Ok(total)
    }
}

/// Sums the RWA of per-exposure details.
///
/// # Errors
///
/// Returns `SolvaError::InvalidInput` if the sum leaves the `Decimal` range.
pub fn total_rwa(details: &[ExposureRwa]) -> SolvaResult<Decimal> {
    details
        .iter()
        .try_fold(Decimal::ZERO, |total, detail| add_rwa(total, detail.rwa))
}

fn add_rwa(total: Decimal, rwa: Decimal) -> SolvaResult<Decimal> {
    total
        .checked_add(rwa)
        .ok_or_else(|| SolvaError::invalid_input("credit_rwa", "sum exceeds the representable range"))
}

/// Maps over exposures, using rayon for large portfolios when the
/// `parallel` feature is enabled. Output order matches input order.
fn maybe_parallel_map<U, F>(items: &[Exposure], f: F) -> Vec<U>
where
    U: Send,
    F: Fn(&Exposure) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if items.len() > PARALLEL_THRESHOLD {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
