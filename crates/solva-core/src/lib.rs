//! # Solva Core
//!
//! Core value types and errors for the Solva regulatory solvency engine.
//!
//! This crate provides the data model shared by the calculation engines:
//!
//! - **Exposures**: [`ExposureCategory`], [`Exposure`], [`Mitigant`], [`PastDueAdjustment`]
//! - **Market data**: [`PriceSeries`] of dated NAV or price observations
//! - **Capital**: [`CapitalTiers`] expressed as percentages of risk-weighted exposure
//! - **Results**: [`RwaBreakdown`], [`SolvencyResult`], [`SolvencyReport`]
//!
//! Every type is an immutable value object. A new calculation produces new
//! values from new inputs; nothing here is mutated after construction.
//!
//! ## Example
//!
//! ```rust
//! use solva_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let loan = Exposure::on_balance(ExposureCategory::Sme, dec!(1_000_000))
//!     .with_mitigant(Mitigant::new(dec!(400_000), dec!(0.20)));
//! assert!(loan.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SolvaError, SolvaResult};
    pub use crate::types::{
        CapitalTiers, ComplianceStatus, Date, Exposure, ExposureCategory, Mitigant,
        PastDueAdjustment, PricePoint, PriceSeries, RwaBreakdown, RwaShares, SolvencyReport,
        SolvencyResult,
    };
}

// Re-export commonly used types at crate root
pub use error::{SolvaError, SolvaResult};
pub use types::{Date, Exposure, ExposureCategory, PriceSeries};
