//! Regulatory policy profiles.
//!
//! A [`RegulatoryPolicy`] bundles every parameter the engines need: the
//! minimum solvency ratio, the weight table, tier minima, market and
//! operational parameters and the past-due rule. Engines are built from a
//! policy and never read configuration themselves.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use solva_core::types::ExposureCategory;
use solva_risk::{
    CapitalAggregator, CreditRiskEngine, LinearProvisioningRule, MarketRiskEngine,
    MarketRiskParams, OperationalRiskEngine, OperationalRiskParams, PastDueWeighting,
    ProvisionBandRule, SolvencyEvaluator, TierMinima, WeightTable,
};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Name of the 2006 standardized-approach profile (10% minimum).
pub const BAM_26G_2006: &str = "BAM.26G2006";

/// Name of the 2013 Basel III profile (12% minimum).
pub const BAM_14G_13: &str = "BAM.14G13";

/// Highest admissible risk weight (1250%).
const MAX_RISK_WEIGHT: Decimal = dec!(12.5);

// =============================================================================
// PAST-DUE RULE
// =============================================================================

/// Past-due weighting rule selected by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PastDueRuleConfig {
    /// Linear provisioning rule.
    Linear(LinearProvisioningRule),
    /// Provision band rule.
    Banded(ProvisionBandRule),
}

impl Default for PastDueRuleConfig {
    fn default() -> Self {
        Self::Linear(LinearProvisioningRule::default())
    }
}

impl PastDueRuleConfig {
    /// Builds the weighting strategy.
    #[must_use]
    pub fn weighting(&self) -> Arc<dyn PastDueWeighting> {
        match self {
            Self::Linear(rule) => Arc::new(*rule),
            Self::Banded(rule) => Arc::new(*rule),
        }
    }

    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        match self {
            Self::Linear(rule) => {
                if rule.floor < Decimal::ZERO {
                    errors.push(ValidationError::new(
                        "past_due.floor",
                        format!("Floor {} must be non-negative", rule.floor),
                    ));
                }
                if rule.floor > rule.ceiling {
                    errors.push(ValidationError::with_rule(
                        "past_due.floor",
                        format!("Floor {} exceeds ceiling {}", rule.floor, rule.ceiling),
                        "floor_le_ceiling",
                    ));
                }
            }
            Self::Banded(rule) => {
                let in_unit = |v: Decimal| v >= Decimal::ZERO && v <= Decimal::ONE;
                if !in_unit(rule.lower_threshold) || !in_unit(rule.upper_threshold) {
                    errors.push(ValidationError::new(
                        "past_due.thresholds",
                        "Thresholds must be between 0 and 1",
                    ));
                }
                if rule.lower_threshold > rule.upper_threshold {
                    errors.push(ValidationError::with_rule(
                        "past_due.lower_threshold",
                        format!(
                            "Lower threshold {} exceeds upper threshold {}",
                            rule.lower_threshold, rule.upper_threshold
                        ),
                        "ordered_thresholds",
                    ));
                }
                if rule.reduced_weight < Decimal::ZERO {
                    errors.push(ValidationError::new(
                        "past_due.reduced_weight",
                        "Reduced weight must be non-negative",
                    ));
                }
            }
        }
    }
}

// =============================================================================
// REGULATORY POLICY
// =============================================================================

/// Complete set of regulatory parameters.
///
/// # Example
///
/// ```rust
/// use solva_config::RegulatoryPolicy;
/// use rust_decimal_macros::dec;
///
/// let policy = RegulatoryPolicy::bam_14g_13();
/// assert_eq!(policy.min_solvency_ratio, dec!(12.0));
///
/// let result = policy
///     .solvency_evaluator()
///     .evaluate(dec!(1000), dec!(200), dec!(300), dec!(180))
///     .unwrap();
/// assert!(result.compliant);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatoryPolicy {
    /// Policy name/identifier.
    pub name: String,

    /// Description of this policy.
    #[serde(default)]
    pub description: Option<String>,

    /// Minimum solvency ratio, in percent.
    pub min_solvency_ratio: Decimal,

    /// Whether this policy is read-only.
    #[serde(default)]
    pub read_only: bool,

    /// Category → risk weight table.
    #[serde(default)]
    pub weights: WeightTable,

    /// Minimum ratios per capital tier.
    #[serde(default)]
    pub tier_minima: TierMinima,

    /// Market risk parameters.
    #[serde(default)]
    pub market: MarketRiskParams,

    /// Operational risk parameters.
    #[serde(default)]
    pub operational: OperationalRiskParams,

    /// Past-due weighting rule.
    #[serde(default)]
    pub past_due: PastDueRuleConfig,
}

impl Default for RegulatoryPolicy {
    fn default() -> Self {
        Self::bam_26g_2006()
    }
}

impl RegulatoryPolicy {
    /// Creates a policy with standard parameters and the given name.
    pub fn new(name: impl Into<String>, min_solvency_ratio: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            min_solvency_ratio,
            weights: WeightTable::standard(),
            tier_minima: TierMinima::default(),
            market: MarketRiskParams::default(),
            operational: OperationalRiskParams::default(),
            past_due: PastDueRuleConfig::default(),
            read_only: false,
        }
    }

    /// Circular 26/G/2006 standardized approach, 10% minimum.
    #[must_use]
    pub fn bam_26g_2006() -> Self {
        Self {
            description: Some("Bank Al-Maghrib circular 26/G/2006, standardized approach".to_string()),
            read_only: true,
            ..Self::new(BAM_26G_2006, dec!(10.0))
        }
    }

    /// Circular 14/G/13 Basel III transposition, 12% minimum.
    #[must_use]
    pub fn bam_14g_13() -> Self {
        Self {
            description: Some("Bank Al-Maghrib circular 14/G/13, Basel III capital".to_string()),
            read_only: true,
            ..Self::new(BAM_14G_13, dec!(12.0))
        }
    }

    /// Returns the built-in policy with the given name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            BAM_26G_2006 => Some(Self::bam_26g_2006()),
            BAM_14G_13 => Some(Self::bam_14g_13()),
            _ => None,
        }
    }

    /// Returns every built-in policy.
    #[must_use]
    pub fn builtins() -> Vec<Self> {
        vec![Self::bam_26g_2006(), Self::bam_14g_13()]
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the minimum solvency ratio.
    #[must_use]
    pub fn with_min_solvency_ratio(mut self, min_ratio: Decimal) -> Self {
        self.min_solvency_ratio = min_ratio;
        self
    }

    /// Overrides the weight of one category.
    #[must_use]
    pub fn with_weight(mut self, category: ExposureCategory, weight: Decimal) -> Self {
        self.weights = self.weights.with_weight(category, weight);
        self
    }

    /// Sets the past-due rule.
    #[must_use]
    pub fn with_past_due(mut self, rule: PastDueRuleConfig) -> Self {
        self.past_due = rule;
        self
    }

    // =========================================================================
    // LOADING
    // =========================================================================

    /// Parses a policy document, resolving `base` against the built-ins.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, `ConfigError::NotFound`
    /// for an unknown base and a validation error if the result is invalid.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file = PolicyFile::parse(content)?;
        let base_name = file.base.as_deref().unwrap_or(BAM_26G_2006);
        let base = Self::builtin(base_name).ok_or_else(|| ConfigError::NotFound {
            key: base_name.to_string(),
        })?;
        file.apply(base)
    }

    /// Loads a policy document from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise see
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loading policy file");
        Self::from_toml_str(&content)
    }

    // =========================================================================
    // ENGINE WIRING
    // =========================================================================

    /// Credit engine using this policy's weights and past-due rule.
    #[must_use]
    pub fn credit_engine(&self) -> CreditRiskEngine {
        CreditRiskEngine::new(self.weights.clone()).with_past_due_rule(self.past_due.weighting())
    }

    /// Market engine using this policy's parameters.
    #[must_use]
    pub fn market_engine(&self) -> MarketRiskEngine {
        MarketRiskEngine::new(self.market)
    }

    /// Operational engine using this policy's parameters.
    #[must_use]
    pub fn operational_engine(&self) -> OperationalRiskEngine {
        OperationalRiskEngine::new(self.operational)
    }

    /// Capital aggregator using this policy's tier minima.
    #[must_use]
    pub fn capital_aggregator(&self) -> CapitalAggregator {
        CapitalAggregator::new(self.tier_minima)
    }

    /// Solvency evaluator using this policy's minimum ratio.
    #[must_use]
    pub fn solvency_evaluator(&self) -> SolvencyEvaluator {
        SolvencyEvaluator::new(self.min_solvency_ratio)
    }
}

impl Validate for RegulatoryPolicy {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.min_solvency_ratio <= Decimal::ZERO || self.min_solvency_ratio > Decimal::ONE_HUNDRED
        {
            errors.push(ValidationError::with_rule(
                "min_solvency_ratio",
                format!(
                    "Minimum ratio {} must be in (0, 100]",
                    self.min_solvency_ratio
                ),
                "valid_percentage",
            ));
        }

        for (category, weight) in self.weights.iter() {
            if weight < Decimal::ZERO || weight > MAX_RISK_WEIGHT {
                errors.push(ValidationError::with_rule(
                    format!("weights.{}", category.code()),
                    format!("Weight {weight} must be between 0 and {MAX_RISK_WEIGHT}"),
                    "valid_weight",
                ));
            }
        }

        let minima = &self.tier_minima;
        if minima.cet1 < Decimal::ZERO || minima.tier1 < Decimal::ZERO || minima.total < Decimal::ZERO
        {
            errors.push(ValidationError::new(
                "tier_minima",
                "Tier minima must be non-negative",
            ));
        }
        if minima.cet1 > minima.tier1 || minima.tier1 > minima.total {
            errors.push(ValidationError::with_rule(
                "tier_minima",
                format!(
                    "Minima must satisfy cet1 <= tier1 <= total, got {} / {} / {}",
                    minima.cet1, minima.tier1, minima.total
                ),
                "ordered_minima",
            ));
        }

        let market = &self.market;
        if market.volatility_floor <= Decimal::ZERO || market.volatility_floor > Decimal::ONE {
            errors.push(ValidationError::new(
                "market.volatility_floor",
                format!("Floor {} must be in (0, 1]", market.volatility_floor),
            ));
        }
        if market.volatility_divisor <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "market.volatility_divisor",
                "Divisor must be positive",
            ));
        }
        if market.rwa_multiplier <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "market.rwa_multiplier",
                "Multiplier must be positive",
            ));
        }

        let operational = &self.operational;
        if operational.alpha <= Decimal::ZERO || operational.alpha > Decimal::ONE {
            errors.push(ValidationError::new(
                "operational.alpha",
                format!("Alpha {} must be in (0, 1]", operational.alpha),
            ));
        }
        if operational.rwa_multiplier <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "operational.rwa_multiplier",
                "Multiplier must be positive",
            ));
        }

        self.past_due.validate_into(&mut errors);

        errors
    }
}

// =============================================================================
// POLICY FILE
// =============================================================================

/// On-disk policy document.
///
/// Every field is optional; absent fields keep the value of the base policy.
///
/// ```toml
/// name = "BANK.INTERNAL"
/// base = "BAM.14G13"
/// min_solvency_ratio = 12.5
///
/// [weights]
/// SME = 0.85
/// "Venture capital" = 2.5
///
/// [market]
/// volatility_floor = 0.10
///
/// [past_due]
/// rule = "banded"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Name of the resulting policy.
    pub name: Option<String>,
    /// Policy the document starts from.
    pub base: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Minimum solvency ratio, in percent.
    pub min_solvency_ratio: Option<Decimal>,
    /// Per-category weight overrides, keyed by category code or alias.
    #[serde(default)]
    pub weights: BTreeMap<String, Decimal>,
    /// Tier minima overrides.
    #[serde(default)]
    pub tier_minima: TierMinimaOverrides,
    /// Market parameter overrides.
    #[serde(default)]
    pub market: MarketOverrides,
    /// Operational parameter overrides.
    #[serde(default)]
    pub operational: OperationalOverrides,
    /// Replacement past-due rule.
    pub past_due: Option<PastDueRuleConfig>,
}

/// Partial [`TierMinima`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierMinimaOverrides {
    /// CET1 minimum.
    pub cet1: Option<Decimal>,
    /// Tier 1 minimum.
    pub tier1: Option<Decimal>,
    /// Total capital minimum.
    pub total: Option<Decimal>,
}

/// Partial [`MarketRiskParams`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketOverrides {
    /// Volatility floor.
    pub volatility_floor: Option<Decimal>,
    /// Volatility divisor.
    pub volatility_divisor: Option<Decimal>,
    /// RWA multiplier.
    pub rwa_multiplier: Option<Decimal>,
}

/// Partial [`OperationalRiskParams`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationalOverrides {
    /// Alpha.
    pub alpha: Option<Decimal>,
    /// RWA multiplier.
    pub rwa_multiplier: Option<Decimal>,
}

impl PolicyFile {
    /// Parses a TOML policy document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies the document on top of `base` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown weight key or an invalid
    /// resulting policy.
    pub fn apply(self, base: RegulatoryPolicy) -> ConfigResult<RegulatoryPolicy> {
        let mut overrides = BTreeMap::new();
        for (label, weight) in &self.weights {
            let category =
                ExposureCategory::parse(label).ok_or_else(|| ConfigError::Validation {
                    field: format!("weights.{label}"),
                    message: "Unknown exposure category".to_string(),
                })?;
            overrides.insert(category, *weight);
        }

        let mut policy = RegulatoryPolicy {
            name: self.name.unwrap_or_else(|| format!("{}.CUSTOM", base.name)),
            description: self.description.or(base.description),
            min_solvency_ratio: self.min_solvency_ratio.unwrap_or(base.min_solvency_ratio),
            weights: base.weights.merged(&overrides),
            tier_minima: base.tier_minima,
            market: base.market,
            operational: base.operational,
            past_due: self.past_due.unwrap_or(base.past_due),
            read_only: false,
        };

        let t = self.tier_minima;
        policy.tier_minima.cet1 = t.cet1.unwrap_or(policy.tier_minima.cet1);
        policy.tier_minima.tier1 = t.tier1.unwrap_or(policy.tier_minima.tier1);
        policy.tier_minima.total = t.total.unwrap_or(policy.tier_minima.total);

        let m = self.market;
        policy.market.volatility_floor = m.volatility_floor.unwrap_or(policy.market.volatility_floor);
        policy.market.volatility_divisor =
            m.volatility_divisor.unwrap_or(policy.market.volatility_divisor);
        policy.market.rwa_multiplier = m.rwa_multiplier.unwrap_or(policy.market.rwa_multiplier);

        let o = self.operational;
        policy.operational.alpha = o.alpha.unwrap_or(policy.operational.alpha);
        policy.operational.rwa_multiplier =
            o.rwa_multiplier.unwrap_or(policy.operational.rwa_multiplier);

        policy.validate_or_error()?;
        tracing::debug!(
            policy = %policy.name,
            weight_overrides = overrides.len(),
            "policy resolved"
        );
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solva_core::types::{Exposure, PastDueAdjustment};

    #[test]
    fn test_builtin_profiles() {
        let old = RegulatoryPolicy::bam_26g_2006();
        let new = RegulatoryPolicy::bam_14g_13();
        assert_eq!(old.min_solvency_ratio, dec!(10.0));
        assert_eq!(new.min_solvency_ratio, dec!(12.0));
        assert!(old.read_only && new.read_only);
        assert!(old.is_valid());
        assert!(new.is_valid());
        assert_eq!(RegulatoryPolicy::builtin("BAM.14G13"), Some(new));
        assert_eq!(RegulatoryPolicy::builtin("FED"), None);
    }

    #[test]
    fn test_wiring_uses_policy_values() {
        let policy = RegulatoryPolicy::new("TEST", dec!(11))
            .with_weight(ExposureCategory::Sme, dec!(0.85))
            .with_past_due(PastDueRuleConfig::Banded(ProvisionBandRule::default()));

        assert_eq!(policy.solvency_evaluator().min_ratio(), dec!(11));

        let engine = policy.credit_engine();
        let sme = Exposure::on_balance(ExposureCategory::Sme, dec!(100));
        assert_eq!(engine.compute_credit_rwa(&[sme]).unwrap(), dec!(85));

        let npl = Exposure::on_balance(ExposureCategory::PastDue, dec!(100)).with_past_due(dec!(0.3));
        assert_eq!(engine.effective_weight(&npl), dec!(1.00));
    }

    #[test]
    fn test_past_due_rule_selection() {
        let adj = PastDueAdjustment::new(dec!(0.6));
        let linear = PastDueRuleConfig::default().weighting();
        assert_eq!(linear.name(), "linear");
        assert_eq!(linear.effective_weight(dec!(1.5), &adj), dec!(0.90));

        let banded = PastDueRuleConfig::Banded(ProvisionBandRule::default()).weighting();
        assert_eq!(banded.name(), "banded");
        assert_eq!(banded.effective_weight(dec!(1.5), &adj), dec!(0.50));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut policy = RegulatoryPolicy::new("", dec!(0))
            .with_weight(ExposureCategory::BankA, dec!(13));
        policy.tier_minima.cet1 = dec!(10);
        policy.market.volatility_divisor = Decimal::ZERO;

        let fields: Vec<String> = policy.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"name".to_string()));
        assert!(fields.contains(&"min_solvency_ratio".to_string()));
        assert!(fields.contains(&"weights.BANK_A".to_string()));
        assert!(fields.contains(&"tier_minima".to_string()));
        assert!(fields.contains(&"market.volatility_divisor".to_string()));
        assert!(matches!(
            policy.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_inverted_past_due_bounds_rejected() {
        let policy = RegulatoryPolicy::new("TEST", dec!(10)).with_past_due(PastDueRuleConfig::Linear(
            LinearProvisioningRule {
                anchor: dec!(1.5),
                floor: dec!(1.2),
                ceiling: dec!(0.8),
            },
        ));
        let errors = policy.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule.as_deref(), Some("floor_le_ceiling"));
    }

    #[test]
    fn test_from_toml_minimal() {
        let policy = RegulatoryPolicy::from_toml_str("").unwrap();
        assert_eq!(policy.name, "BAM.26G2006.CUSTOM");
        assert_eq!(policy.min_solvency_ratio, dec!(10.0));
        assert!(!policy.read_only);
    }

    #[test]
    fn test_from_toml_overrides() {
        let policy = RegulatoryPolicy::from_toml_str(
            r#"
            name = "BANK.INTERNAL"
            base = "BAM.14G13"
            min_solvency_ratio = 12.5

            [weights]
            SME = 0.85
            "Venture capital" = 2.5

            [tier_minima]
            total = 13.0

            [market]
            volatility_floor = 0.10

            [past_due]
            rule = "banded"
            reduced_weight = 0.75
            "#,
        )
        .unwrap();

        assert_eq!(policy.name, "BANK.INTERNAL");
        assert_eq!(policy.min_solvency_ratio, dec!(12.5));
        assert_eq!(policy.weights.weight_for(ExposureCategory::Sme), dec!(0.85));
        assert_eq!(policy.weights.weight_for(ExposureCategory::Venture), dec!(2.5));
        assert_eq!(policy.weights.weight_for(ExposureCategory::Retail), dec!(0.75));
        assert_eq!(policy.tier_minima.total, dec!(13.0));
        assert_eq!(policy.tier_minima.cet1, dec!(8.0));
        assert_eq!(policy.market.volatility_floor, dec!(0.10));
        assert_eq!(policy.market.volatility_divisor, dec!(25));
        assert_eq!(
            policy.past_due,
            PastDueRuleConfig::Banded(ProvisionBandRule {
                reduced_weight: dec!(0.75),
                ..ProvisionBandRule::default()
            })
        );
    }

    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            RegulatoryPolicy::from_toml_str("base = \"FED.2020\""),
            Err(ConfigError::NotFound { .. })
        ));
        assert!(matches!(
            RegulatoryPolicy::from_toml_str("[weights]\nCRYPTO = 2.0"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            RegulatoryPolicy::from_toml_str("min_solvency_ratio = 0"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            RegulatoryPolicy::from_toml_str("minimum = 10"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let policy = RegulatoryPolicy::bam_14g_13();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains(r#""SOVEREIGN_A":0.2"#));
        assert!(json.contains(r#""rule":"linear""#));
        let back: RegulatoryPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
