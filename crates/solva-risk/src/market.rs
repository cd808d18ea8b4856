//! Market risk charge from realized volatility.
//!
//! The charge follows the prudential factor of articles 48-55:
//!
//! ```text
//! r_t    = (v_t − v_{t−1}) / v_{t−1}
//! σ%     = sample std-dev of r (n − 1) × 100
//! factor = max(floor, σ% / divisor)
//! RWA    = mean(v) × factor × multiplier
//! ```
//!
//! With the defaults (floor 8%, divisor 25, multiplier 12.5) a flat series
//! yields `RWA = mean(v)`. Returns and volatility are scale-invariant, so
//! rescaling the series by `k` rescales the RWA by `k`.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use solva_core::error::{SolvaError, SolvaResult};
use solva_core::types::PriceSeries;

/// Minimum number of observations needed to form one return.
pub const MIN_OBSERVATIONS: usize = 2;

/// Parameters of the volatility-based charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRiskParams {
    /// Prudential floor on the volatility factor (0.08 = 8%).
    pub volatility_floor: Decimal,
    /// Divisor converting volatility percent into a factor.
    pub volatility_divisor: Decimal,
    /// Capital charge → RWA multiplier (reciprocal of 8%).
    pub rwa_multiplier: Decimal,
}

impl Default for MarketRiskParams {
    fn default() -> Self {
        Self {
            volatility_floor: dec!(0.08),
            volatility_divisor: dec!(25),
            rwa_multiplier: dec!(12.5),
        }
    }
}

/// Intermediate figures of a market risk calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRiskAssessment {
    /// Number of price observations.
    pub observations: usize,
    /// Mean of the observed values.
    pub mean_value: Decimal,
    /// Sample standard deviation of simple returns, in percent.
    pub volatility_pct: Decimal,
    /// Applied factor after the floor.
    pub factor: Decimal,
    /// True when the floor was binding.
    pub floored: bool,
    /// Resulting market RWA.
    pub market_rwa: Decimal,
}

/// Market risk engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketRiskEngine {
    params: MarketRiskParams,
}

impl MarketRiskEngine {
    /// Creates an engine with the given parameters.
    #[must_use]
    pub fn new(params: MarketRiskParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &MarketRiskParams {
        &self.params
    }

    /// Computes period-over-period simple returns.
    ///
    /// # Errors
    ///
    /// - `SolvaError::InsufficientData` if the series has fewer than 2 points
    /// - `SolvaError::InvalidSeries` if any value is zero or negative
    pub fn simple_returns(&self, series: &PriceSeries) -> SolvaResult<Vec<Decimal>> {
        if series.len() < MIN_OBSERVATIONS {
            return Err(SolvaError::insufficient_data(MIN_OBSERVATIONS, series.len()));
        }

        if let Some(point) = series.points().iter().find(|p| p.value <= Decimal::ZERO) {
            return Err(SolvaError::invalid_series(format!(
                "value {} on {} must be positive",
                point.value, point.date
            )));
        }

        series
            .points()
            .windows(2)
            .map(|w| {
                (w[1].value - w[0].value)
                    .checked_div(w[0].value)
                    .ok_or_else(|| out_of_range("return"))
            })
            .collect()
    }

    /// Runs the full calculation and returns the intermediate figures.
    ///
    /// # Errors
    ///
    /// See [`simple_returns`](Self::simple_returns). Also returns
    /// `SolvaError::InvalidSeries` when an intermediate figure leaves the
    /// `Decimal` range.
    pub fn assess(&self, series: &PriceSeries) -> SolvaResult<MarketRiskAssessment> {
        let returns = self.simple_returns(series)?;

        let volatility_pct = sample_std_dev(&returns)
            .and_then(|sd| sd.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| out_of_range("volatility"))?;
        let raw_factor = volatility_pct
            .checked_div(self.params.volatility_divisor)
            .ok_or_else(|| {
                SolvaError::invalid_input(
                    "volatility_divisor",
                    format!("cannot divide {volatility_pct} by {}", self.params.volatility_divisor),
                )
            })?;
        let floored = raw_factor < self.params.volatility_floor;
        let factor = raw_factor.max(self.params.volatility_floor);

        let mean_value = checked_mean(series.values()).ok_or_else(|| out_of_range("mean value"))?;
        let market_rwa = mean_value
            .checked_mul(factor)
            .and_then(|v| v.checked_mul(self.params.rwa_multiplier))
            .ok_or_else(|| out_of_range("market RWA"))?;

        tracing::debug!(
            observations = series.len(),
            %volatility_pct,
            %factor,
            floored,
            market_rwa = %market_rwa,
            "market RWA computed"
        );

        Ok(MarketRiskAssessment {
            observations: series.len(),
            mean_value,
            volatility_pct,
            factor,
            floored,
            market_rwa,
        })
    }

    /// Computes market RWA.
    ///
    /// # Errors
    ///
    /// See [`simple_returns`](Self::simple_returns).
    pub fn compute_market_rwa(&self, series: &PriceSeries) -> SolvaResult<Decimal> {
        self.assess(series).map(|a| a.market_rwa)
    }
}

/// Sample standard deviation (n − 1 denominator).
///
/// Undefined for fewer than two values; treated as zero so the floor applies.
/// `None` on overflow.
fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return Some(Decimal::ZERO);
    }

    let n = Decimal::from(values.len());
    let mean = checked_mean(values.iter().copied())?;
    let sum_sq = values.iter().try_fold(Decimal::ZERO, |acc, r| {
        let deviation = r.checked_sub(mean)?;
        acc.checked_add(deviation.checked_mul(deviation)?)
    })?;
    let variance = sum_sq.checked_div(n - Decimal::ONE)?;

    Some(variance.sqrt().unwrap_or(Decimal::ZERO))
}

fn checked_mean(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values
        .into_iter()
        .try_fold((Decimal::ZERO, 0usize), |(sum, count), v| {
            Some((sum.checked_add(v)?, count + 1))
        })?;
    sum.checked_div(Decimal::from(count))
}

fn out_of_range(what: &str) -> SolvaError {
    SolvaError::invalid_series(format!("{what} exceeds the representable range"))
}
