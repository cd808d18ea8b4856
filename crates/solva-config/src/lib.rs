//! Solva Configuration Layer
//!
//! Regulatory policy profiles for the Solva engines. A policy carries every
//! parameter that differs between circulars or deployments, and builds the
//! engines configured with it.
//!
//! # Features
//!
//! - **Built-in profiles**: `BAM.26G2006` (10% minimum) and `BAM.14G13` (12%)
//! - **Policy files**: TOML documents layered over a base profile
//! - **Validation**: all rule violations reported together
//! - **Registry**: thread-safe named policies with read-only built-ins
//!
//! # Example
//!
//! ```rust
//! use solva_config::{PolicyRegistry, RegulatoryPolicy};
//! use solva_core::types::{Exposure, ExposureCategory};
//! use rust_decimal_macros::dec;
//!
//! let registry = PolicyRegistry::new();
//! let policy = registry.get("BAM.26G2006").unwrap();
//!
//! let exposures = vec![Exposure::on_balance(ExposureCategory::Retail, dec!(1000))];
//! let credit_rwa = policy.credit_engine().compute_credit_rwa(&exposures).unwrap();
//! assert_eq!(credit_rwa, dec!(750));
//!
//! let custom = RegulatoryPolicy::from_toml_str(
//!     r#"
//!     name = "BANK.STRESS"
//!     base = "BAM.14G13"
//!
//!     [weights]
//!     RETAIL = 1.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(custom.credit_engine().compute_credit_rwa(&exposures).unwrap(), dec!(1000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod policy;
mod registry;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use policy::{
    MarketOverrides, OperationalOverrides, PastDueRuleConfig, PolicyFile, RegulatoryPolicy,
    TierMinimaOverrides, BAM_14G_13, BAM_26G_2006,
};
pub use registry::PolicyRegistry;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::policy::{PastDueRuleConfig, RegulatoryPolicy};
    pub use crate::registry::PolicyRegistry;
}
