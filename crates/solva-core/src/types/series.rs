//! Dated price / NAV observations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{SolvaError, SolvaResult};

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Observed price or NAV.
    pub value: Decimal,
}

impl PricePoint {
    /// Creates a new observation.
    #[must_use]
    pub fn new(date: Date, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// Ordered sequence of observations with strictly increasing dates.
///
/// Values are not checked here; the market risk engine rejects non-positive
/// values when it derives returns. Serialized as a plain list of points, and
/// deserialization goes through [`PriceSeries::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, checking that dates are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidSeries` if two consecutive points are not
    /// in strictly increasing date order.
    pub fn new(points: Vec<PricePoint>) -> SolvaResult<Self> {
        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(SolvaError::invalid_series(format!(
                "dates must be strictly increasing ({} followed by {})",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { points })
    }

    /// Creates a series of consecutive daily observations starting at `start`.
    #[must_use]
    pub fn daily(start: Date, values: &[Decimal]) -> Self {
        let points = values
            .iter()
            .zip(0i64..)
            .map(|(value, offset)| PricePoint::new(start.add_days(offset), *value))
            .collect();
        Self { points }
    }

    /// Returns the observations.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the observed values in date order.
    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the last observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Returns a copy with every value multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidSeries` if a scaled value leaves the
    /// `Decimal` range.
    pub fn scaled(&self, factor: Decimal) -> SolvaResult<Self> {
        let points = self
            .points
            .iter()
            .map(|p| {
                p.value
                    .checked_mul(factor)
                    .map(|value| PricePoint::new(p.date, value))
                    .ok_or_else(|| {
                        SolvaError::invalid_series(format!(
                            "{} × {factor} on {} exceeds the representable range",
                            p.value, p.date
                        ))
                    })
            })
            .collect::<SolvaResult<_>>()?;
        Ok(Self { points })
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = SolvaError;

    fn try_from(points: Vec<PricePoint>) -> SolvaResult<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    #[test]
    fn test_ordered_series() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2), dec!(100)),
            PricePoint::new(d(3), dec!(101)),
            PricePoint::new(d(5), dec!(99)),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap().value, dec!(99));
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let result = PriceSeries::new(vec![
            PricePoint::new(d(2), dec!(100)),
            PricePoint::new(d(2), dec!(101)),
        ]);
        assert!(matches!(result, Err(SolvaError::InvalidSeries { .. })));
    }

    #[test]
    fn test_daily_constructor() {
        let series = PriceSeries::daily(d(30), &[dec!(1), dec!(2), dec!(3)]);
        let dates: Vec<String> = series.points().iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-30", "2024-01-31", "2024-02-01"]);
    }

    #[test]
    fn test_scaled() {
        let series = PriceSeries::daily(d(1), &[dec!(10), dec!(20)]);
        let values: Vec<Decimal> = series.scaled(dec!(3)).unwrap().values().collect();
        assert_eq!(values, vec![dec!(30), dec!(60)]);

        assert!(matches!(
            series.scaled(Decimal::MAX),
            Err(SolvaError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn test_deserialize_checks_order() {
        let series = PriceSeries::daily(d(1), &[dec!(10), dec!(20)]);
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.starts_with('['));
        let back: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);

        let unordered = r#"[
            {"date": "2024-01-03", "value": 101},
            {"date": "2024-01-02", "value": 100}
        ]"#;
        let err = serde_json::from_str::<PriceSeries>(unordered).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }
}
