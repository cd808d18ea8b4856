//! Regulatory risk weight table.
//!
//! Maps each [`ExposureCategory`] to its standardized risk weight. A category
//! absent from the table, or a label that does not parse into a category,
//! receives [`DEFAULT_RISK_WEIGHT`]; the fallback is never an error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use solva_core::types::ExposureCategory;

/// Weight applied to any category without an explicit entry (100%).
pub const DEFAULT_RISK_WEIGHT: Decimal = Decimal::ONE;

/// Category → risk weight mapping (fractions, 0.35 = 35%).
///
/// # Example
///
/// ```rust
/// use solva_risk::weights::{WeightTable, DEFAULT_RISK_WEIGHT};
/// use solva_core::types::ExposureCategory;
/// use rust_decimal_macros::dec;
///
/// let table = WeightTable::standard();
/// assert_eq!(table.weight_for(ExposureCategory::Sme), dec!(0.75));
/// assert_eq!(table.weight_for_label("unlisted-crypto"), DEFAULT_RISK_WEIGHT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<ExposureCategory, Decimal>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightTable {
    /// Creates an empty table; every lookup returns the default weight.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Standardized schedule of circular 26/G/2006.
    #[must_use]
    pub fn standard() -> Self {
        use ExposureCategory as C;

        let weights = [
            (C::SovereignDomesticLocal, dec!(0.00)),
            (C::SovereignAaaAa, dec!(0.00)),
            (C::SovereignA, dec!(0.20)),
            (C::SovereignBbb, dec!(0.50)),
            (C::SovereignBbOrLower, dec!(1.00)),
            (C::BankAaaAa, dec!(0.20)),
            (C::BankA, dec!(0.50)),
            (C::BankBbb, dec!(0.50)),
            (C::BankBbOrLower, dec!(1.00)),
            (C::CorporateAaaAa, dec!(0.20)),
            (C::CorporateA, dec!(0.50)),
            (C::CorporateBbbBb, dec!(1.00)),
            (C::CorporateBOrLower, dec!(1.50)),
            (C::CorporateUnrated, dec!(1.00)),
            (C::Sme, dec!(0.75)),
            (C::Retail, dec!(0.75)),
            (C::ResidentialMortgage, dec!(0.35)),
            (C::CommercialMortgage, dec!(1.00)),
            (C::PastDue, dec!(1.50)),
            (C::EquityFundUnrated, dec!(1.00)),
            (C::Venture, dec!(1.50)),
            (C::Other, dec!(1.00)),
        ]
        .into_iter()
        .collect();

        Self { weights }
    }

    /// Returns the weight for a category, or [`DEFAULT_RISK_WEIGHT`] if the
    /// table has no entry for it.
    ///
    /// [`ExposureCategory::Unclassified`] always gets the default weight.
    #[must_use]
    pub fn weight_for(&self, category: ExposureCategory) -> Decimal {
        if category == ExposureCategory::Unclassified {
            return DEFAULT_RISK_WEIGHT;
        }
        self.weights
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_RISK_WEIGHT)
    }

    /// Returns the weight for a free-form category label.
    ///
    /// Unrecognized labels resolve to [`DEFAULT_RISK_WEIGHT`].
    #[must_use]
    pub fn weight_for_label(&self, label: &str) -> Decimal {
        match ExposureCategory::parse(label) {
            Some(category) => self.weight_for(category),
            None => {
                tracing::warn!(label, "unrecognized exposure category, applying default weight");
                DEFAULT_RISK_WEIGHT
            }
        }
    }

    /// Returns a copy of the table with `category` set to `weight`.
    #[must_use]
    pub fn with_weight(mut self, category: ExposureCategory, weight: Decimal) -> Self {
        self.weights.insert(category, weight);
        self
    }

    /// Returns a copy of the table with every entry of `overrides` applied.
    #[must_use]
    pub fn merged(mut self, overrides: &BTreeMap<ExposureCategory, Decimal>) -> Self {
        self.weights
            .extend(overrides.iter().map(|(category, weight)| (*category, *weight)));
        self
    }

    /// Returns true if the table carries an explicit entry for `category`.
    #[must_use]
    pub fn contains(&self, category: ExposureCategory) -> bool {
        self.weights.contains_key(&category)
    }

    /// Iterates over explicit entries in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ExposureCategory, Decimal)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, *w))
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the table has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule() {
        let table = WeightTable::standard();
        assert_eq!(table.weight_for(ExposureCategory::SovereignDomesticLocal), dec!(0));
        assert_eq!(table.weight_for(ExposureCategory::SovereignA), dec!(0.20));
        assert_eq!(table.weight_for(ExposureCategory::BankBbb), dec!(0.50));
        assert_eq!(table.weight_for(ExposureCategory::CorporateBOrLower), dec!(1.50));
        assert_eq!(table.weight_for(ExposureCategory::ResidentialMortgage), dec!(0.35));
        assert_eq!(table.weight_for(ExposureCategory::Venture), dec!(1.50));
        assert_eq!(table.len(), ExposureCategory::all().len());
    }

    #[test]
    fn test_missing_entry_falls_back() {
        let table = WeightTable::empty();
        for category in ExposureCategory::all() {
            assert_eq!(table.weight_for(*category), DEFAULT_RISK_WEIGHT);
        }
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let table = WeightTable::standard().with_weight(ExposureCategory::Other, dec!(0.9));
        assert_eq!(table.weight_for_label("TIGER GLOBAL (Venture)"), DEFAULT_RISK_WEIGHT);
        assert_eq!(table.weight_for_label("other"), dec!(0.9));
        assert_eq!(table.weight_for_label("venture"), dec!(1.50));
    }

    #[test]
    fn test_unclassified_ignores_table() {
        let table = WeightTable::standard()
            .with_weight(ExposureCategory::Other, dec!(0.5))
            .with_weight(ExposureCategory::Unclassified, dec!(0.1));
        assert_eq!(table.weight_for(ExposureCategory::Other), dec!(0.5));
        assert_eq!(
            table.weight_for(ExposureCategory::Unclassified),
            DEFAULT_RISK_WEIGHT
        );
    }

    #[test]
    fn test_merged_overrides() {
        let overrides = [(ExposureCategory::Sme, dec!(0.85))].into_iter().collect();
        let table = WeightTable::standard().merged(&overrides);
        assert_eq!(table.weight_for(ExposureCategory::Sme), dec!(0.85));
        assert_eq!(table.weight_for(ExposureCategory::Retail), dec!(0.75));
    }

    #[test]
    fn test_serde_as_code_map() {
        let table = WeightTable::empty().with_weight(ExposureCategory::BankA, dec!(0.5));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"BANK_A":0.5}"#);
        let back: WeightTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
