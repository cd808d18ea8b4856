//! Policy registry.
//!
//! Holds named [`RegulatoryPolicy`] values, pre-loaded with the built-in
//! Bank Al-Maghrib profiles.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::policy::{PolicyFile, RegulatoryPolicy, BAM_26G_2006};

/// Thread-safe registry of regulatory policies.
///
/// # Example
///
/// ```rust
/// use solva_config::{PolicyRegistry, RegulatoryPolicy};
/// use rust_decimal_macros::dec;
///
/// let registry = PolicyRegistry::new();
/// assert_eq!(registry.get("BAM.14G13").unwrap().min_solvency_ratio, dec!(12.0));
///
/// let custom = RegulatoryPolicy::new("BANK.INTERNAL", dec!(11.0));
/// registry.register(custom).unwrap();
/// assert!(registry.names().unwrap().contains(&"BANK.INTERNAL".to_string()));
/// ```
pub struct PolicyRegistry {
    policies: RwLock<HashMap<String, RegulatoryPolicy>>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("names", &self.names().unwrap_or_default())
            .finish()
    }
}

impl PolicyRegistry {
    /// Creates a registry holding the built-in policies.
    #[must_use]
    pub fn new() -> Self {
        let policies = RegulatoryPolicy::builtins()
            .into_iter()
            .map(|policy| (policy.name.clone(), policy))
            .collect();
        Self {
            policies: RwLock::new(policies),
        }
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            policies: RwLock::new(HashMap::new()),
        }
    }

    /// Gets a policy by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no policy has that name.
    pub fn get(&self, name: &str) -> ConfigResult<RegulatoryPolicy> {
        let policies = self
            .policies
            .read()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {e}")))?;

        policies.get(name).cloned().ok_or_else(|| ConfigError::NotFound {
            key: name.to_string(),
        })
    }

    /// Registers a policy, replacing any writable policy of the same name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid policy and
    /// `ConfigError::ReadOnly` when the name belongs to a read-only policy.
    pub fn register(&self, policy: RegulatoryPolicy) -> ConfigResult<()> {
        policy.validate_or_error()?;

        let mut policies = self
            .policies
            .write()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {e}")))?;

        if let Some(existing) = policies.get(&policy.name) {
            if existing.read_only {
                return Err(ConfigError::ReadOnly {
                    key: policy.name.clone(),
                });
            }
        }

        tracing::debug!(policy = %policy.name, "policy registered");
        policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    /// Removes a writable policy. Returns true if it existed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadOnly` for a read-only policy.
    pub fn remove(&self, name: &str) -> ConfigResult<bool> {
        let mut policies = self
            .policies
            .write()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {e}")))?;

        if let Some(policy) = policies.get(name) {
            if policy.read_only {
                return Err(ConfigError::ReadOnly {
                    key: name.to_string(),
                });
            }
        }

        Ok(policies.remove(name).is_some())
    }

    /// Lists policy names in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Conflict` if the lock is poisoned.
    pub fn names(&self) -> ConfigResult<Vec<String>> {
        let policies = self
            .policies
            .read()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {e}")))?;

        let mut names: Vec<String> = policies.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Parses a policy document whose `base` may name any registered
    /// policy, registers the result and returns it.
    ///
    /// # Errors
    ///
    /// See [`PolicyFile::parse`], [`PolicyFile::apply`] and
    /// [`register`](Self::register).
    pub fn load_str(&self, content: &str) -> ConfigResult<RegulatoryPolicy> {
        let file = PolicyFile::parse(content)?;
        let base = self.get(file.base.as_deref().unwrap_or(BAM_26G_2006))?;
        let policy = file.apply(base)?;
        self.register(policy.clone())?;
        Ok(policy)
    }

    /// Reads and loads a policy document from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise see
    /// [`load_str`](Self::load_str).
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<RegulatoryPolicy> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.load_str(&content)
    }
}
