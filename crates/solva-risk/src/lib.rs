//! # solva-risk
//!
//! Risk-weighted asset engines and solvency evaluation under the
//! standardized approach of Bank Al-Maghrib circulars 26/G/2006 and 14/G/13.
//!
//! - **Weights**: [`WeightTable`] mapping exposure categories to risk weights
//! - **Credit**: [`CreditRiskEngine`] with CCF, mitigation and past-due weighting
//! - **Market**: [`MarketRiskEngine`] volatility-based capital charge
//! - **Operational**: [`OperationalRiskEngine`] basic indicator approach
//! - **Capital**: [`CapitalAggregator`] CET1 / Tier 1 / Total checks
//! - **Solvency**: [`SolvencyEvaluator`] own funds against total RWA
//!
//! Every engine holds only immutable parameters. Calls are pure and
//! deterministic, so engines can be shared across threads and results can
//! be memoized on their inputs.
//!
//! ## Example
//!
//! ```rust
//! use solva_risk::prelude::*;
//! use solva_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let credit = CreditRiskEngine::default();
//! let exposures = vec![
//!     Exposure::on_balance(ExposureCategory::CorporateUnrated, dec!(1000)),
//!     Exposure::on_balance(ExposureCategory::ResidentialMortgage, dec!(400)),
//! ];
//! let credit_rwa = credit.compute_credit_rwa(&exposures).unwrap();
//! assert_eq!(credit_rwa, dec!(1140));
//!
//! let operational_rwa = OperationalRiskEngine::default()
//!     .compute_operational_rwa(dec!(80))
//!     .unwrap();
//!
//! let result = SolvencyEvaluator::new(dec!(10))
//!     .evaluate(credit_rwa, dec!(0), operational_rwa, dec!(150))
//!     .unwrap();
//! assert!(result.compliant);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capital;
pub mod credit;
pub mod market;
pub mod operational;
pub mod past_due;
pub mod solvency;
pub mod weights;

pub use capital::{CapitalAdequacy, CapitalAggregator, TierChecks, TierMinima};
pub use credit::{total_rwa, CreditRiskEngine, ExposureRwa};
pub use market::{MarketRiskAssessment, MarketRiskEngine, MarketRiskParams};
pub use operational::{OperationalRiskEngine, OperationalRiskParams};
pub use past_due::{LinearProvisioningRule, PastDueWeighting, ProvisionBandRule};
pub use solvency::{evaluate, SolvencyEvaluator};
pub use weights::{WeightTable, DEFAULT_RISK_WEIGHT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::capital::*;
    pub use crate::credit::*;
    pub use crate::market::*;
    pub use crate::operational::*;
    pub use crate::past_due::*;
    pub use crate::solvency::*;
    pub use crate::weights::*;
}
