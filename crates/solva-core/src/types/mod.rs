//! Domain types for solvency calculations.
//!
//! - [`Date`]: Calendar date for observations and reports
//! - [`ExposureCategory`]: Regulatory counterparty / exposure class
//! - [`Exposure`]: Credit exposure with CCF, mitigant and past-due status
//! - [`PriceSeries`]: Ordered NAV or price observations
//! - [`CapitalTiers`]: CET1 / AT1 / Tier 2 ratios
//! - [`RwaBreakdown`], [`SolvencyResult`], [`SolvencyReport`]: calculation outputs

mod capital;
mod category;
mod date;
mod exposure;
mod results;
mod series;

pub use capital::CapitalTiers;
pub use category::ExposureCategory;
pub use date::Date;
pub use exposure::{Exposure, Mitigant, PastDueAdjustment};
pub use results::{ComplianceStatus, RwaBreakdown, RwaShares, SolvencyReport, SolvencyResult};
pub use series::{PricePoint, PriceSeries};
