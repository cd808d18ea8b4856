//! CLI command implementations.

pub mod capital;
pub mod credit;
pub mod market;
pub mod operational;
pub mod policy;
pub mod solvency;

pub use capital::CapitalArgs;
pub use credit::CreditArgs;
pub use market::MarketArgs;
pub use operational::OperationalArgs;
pub use policy::PolicyArgs;
pub use solvency::SolvencyArgs;

use solva_core::types::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2019-05-01").unwrap(), Date::from_ymd(2019, 5, 1).unwrap());
        assert!(matches!(parse_date("01/05/2019"), Err(CliError::InvalidDate(_))));
    }
}
