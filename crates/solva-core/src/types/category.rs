//! Regulatory exposure categories.
//!
//! The enumeration is exhaustive over the standardized schedule. Labels that
//! do not parse into a category are not an error anywhere in the engine: the
//! weight lookup falls back to the default 100% weight.

use serde::{Deserialize, Serialize};

/// Counterparty / exposure class under the standardized approach.
///
/// Rated buckets follow the external rating of the counterparty
/// (e.g. `BankA` covers A+ to A-).
///
/// # Examples
///
/// ```
/// use solva_core::types::ExposureCategory;
///
/// let category = ExposureCategory::parse("corporate-unrated").unwrap();
/// assert_eq!(category, ExposureCategory::CorporateUnrated);
/// assert_eq!(category.code(), "CORPORATE_UNRATED");
/// assert!(ExposureCategory::parse("crypto").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExposureCategory {
    /// Domestic sovereign and central bank in local currency.
    SovereignDomesticLocal,
    /// Sovereign rated AAA to AA-.
    SovereignAaaAa,
    /// Sovereign rated A+ to A-.
    SovereignA,
    /// Sovereign rated BBB+ to BBB-.
    SovereignBbb,
    /// Sovereign rated BB+ or lower.
    SovereignBbOrLower,
    /// Bank rated AAA to AA-.
    BankAaaAa,
    /// Bank rated A+ to A-.
    BankA,
    /// Bank rated BBB+ to BBB-.
    BankBbb,
    /// Bank rated BB+ or lower.
    BankBbOrLower,
    /// Corporate rated AAA to AA-.
    CorporateAaaAa,
    /// Corporate rated A+ to A-.
    CorporateA,
    /// Corporate rated BBB+ to BB-.
    CorporateBbbBb,
    /// Corporate rated B+ or lower.
    CorporateBOrLower,
    /// Corporate without external rating.
    CorporateUnrated,
    /// Small and medium enterprises.
    Sme,
    /// Regulatory retail portfolio.
    Retail,
    /// Claims secured by residential property.
    ResidentialMortgage,
    /// Claims secured by commercial real estate.
    CommercialMortgage,
    /// Past-due / impaired claims.
    PastDue,
    /// Unrated equity holdings and fund units.
    EquityFundUnrated,
    /// Venture capital / private equity.
    Venture,
    /// Other assets.
    Other,
    /// Label that matched no category of the schedule.
    ///
    /// Always weighted at the default 100%, whatever the weight table says
    /// about [`Other`](Self::Other). Not part of [`all`](Self::all) and never
    /// produced by [`parse`](Self::parse).
    Unclassified,
}

impl ExposureCategory {
    /// Returns the stable code used in CSV inputs and policy files.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SovereignDomesticLocal => "SOVEREIGN_DOMESTIC_LOCAL",
            Self::SovereignAaaAa => "SOVEREIGN_AAA_AA",
            Self::SovereignA => "SOVEREIGN_A",
            Self::SovereignBbb => "SOVEREIGN_BBB",
            Self::SovereignBbOrLower => "SOVEREIGN_BB_OR_LOWER",
            Self::BankAaaAa => "BANK_AAA_AA",
            Self::BankA => "BANK_A",
            Self::BankBbb => "BANK_BBB",
            Self::BankBbOrLower => "BANK_BB_OR_LOWER",
            Self::CorporateAaaAa => "CORPORATE_AAA_AA",
            Self::CorporateA => "CORPORATE_A",
            Self::CorporateBbbBb => "CORPORATE_BBB_BB",
            Self::CorporateBOrLower => "CORPORATE_B_OR_LOWER",
            Self::CorporateUnrated => "CORPORATE_UNRATED",
            Self::Sme => "SME",
            Self::Retail => "RETAIL",
            Self::ResidentialMortgage => "RESIDENTIAL_MORTGAGE",
            Self::CommercialMortgage => "COMMERCIAL_MORTGAGE",
            Self::PastDue => "PAST_DUE",
            Self::EquityFundUnrated => "EQUITY_FUND_UNRATED",
            Self::Venture => "VENTURE",
            Self::Other => "OTHER",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SovereignDomesticLocal => "Sovereign (domestic, local currency)",
            Self::SovereignAaaAa => "Sovereign AAA/AA-",
            Self::SovereignA => "Sovereign A",
            Self::SovereignBbb => "Sovereign BBB",
            Self::SovereignBbOrLower => "Sovereign BB or lower",
            Self::BankAaaAa => "Bank AAA/AA-",
            Self::BankA => "Bank A",
            Self::BankBbb => "Bank BBB",
            Self::BankBbOrLower => "Bank BB or lower",
            Self::CorporateAaaAa => "Corporate AAA/AA-",
            Self::CorporateA => "Corporate A",
            Self::CorporateBbbBb => "Corporate BBB/BB",
            Self::CorporateBOrLower => "Corporate B or lower",
            Self::CorporateUnrated => "Corporate (unrated)",
            Self::Sme => "SME",
            Self::Retail => "Retail",
            Self::ResidentialMortgage => "Residential mortgage",
            Self::CommercialMortgage => "Commercial mortgage",
            Self::PastDue => "Past due",
            Self::EquityFundUnrated => "Equity / fund (unrated)",
            Self::Venture => "Venture capital",
            Self::Other => "Other assets",
            Self::Unclassified => "Unclassified",
        }
    }

    /// Parses a category from its code or a common alias.
    ///
    /// Matching is case-insensitive and treats `-`, `/`, `.` and spaces as `_`.
    /// Returns `None` for unrecognized labels.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '/' | '.' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        if let Some(category) = Self::all().iter().find(|c| c.code() == normalized) {
            return Some(*category);
        }

        match normalized.as_str() {
            "SOVEREIGN_DOMESTIC" | "CENTRAL_BANK" => Some(Self::SovereignDomesticLocal),
            "CORPORATE" | "CORPORATE_NR" => Some(Self::CorporateUnrated),
            "PME" | "SMALL_BUSINESS" => Some(Self::Sme),
            "RESIDENTIAL" | "MORTGAGE" => Some(Self::ResidentialMortgage),
            "COMMERCIAL_REAL_ESTATE" => Some(Self::CommercialMortgage),
            "DEFAULTED" | "IMPAIRED" => Some(Self::PastDue),
            "EQUITY" | "FUND" | "EQUITY_FUND" => Some(Self::EquityFundUnrated),
            "VENTURE_CAPITAL" | "PRIVATE_EQUITY" | "CAPITAL_RISK" => Some(Self::Venture),
            _ => None,
        }
    }

    /// Parses a label, mapping anything unrecognized to
    /// [`Unclassified`](Self::Unclassified).
    #[must_use]
    pub fn parse_or_unclassified(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Unclassified)
    }

    /// Returns all scheduled categories in schedule order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::SovereignDomesticLocal,
            Self::SovereignAaaAa,
            Self::SovereignA,
            Self::SovereignBbb,
            Self::SovereignBbOrLower,
            Self::BankAaaAa,
            Self::BankA,
            Self::BankBbb,
            Self::BankBbOrLower,
            Self::CorporateAaaAa,
            Self::CorporateA,
            Self::CorporateBbbBb,
            Self::CorporateBOrLower,
            Self::CorporateUnrated,
            Self::Sme,
            Self::Retail,
            Self::ResidentialMortgage,
            Self::CommercialMortgage,
            Self::PastDue,
            Self::EquityFundUnrated,
            Self::Venture,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_roundtrip() {
        for category in ExposureCategory::all() {
            assert_eq!(ExposureCategory::parse(category.code()), Some(*category));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(
            ExposureCategory::parse("bank-aaa/aa"),
            Some(ExposureCategory::BankAaaAa)
        );
        assert_eq!(
            ExposureCategory::parse(" residential mortgage "),
            Some(ExposureCategory::ResidentialMortgage)
        );
        assert_eq!(
            ExposureCategory::parse("venture capital"),
            Some(ExposureCategory::Venture)
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ExposureCategory::parse("crypto-assets"), None);
        assert_eq!(ExposureCategory::parse(""), None);
        assert_eq!(ExposureCategory::parse("UNCLASSIFIED"), None);
        assert_eq!(
            ExposureCategory::parse_or_unclassified("crypto-assets"),
            ExposureCategory::Unclassified
        );
        assert_eq!(
            ExposureCategory::parse_or_unclassified("sme"),
            ExposureCategory::Sme
        );
    }

    #[test]
    fn test_serde_matches_code() {
        for category in ExposureCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.code()));
            let back: ExposureCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *category);
        }
    }

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(ExposureCategory::all().len(), 22);
    }
}
