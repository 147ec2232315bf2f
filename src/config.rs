//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Values are validated after parsing.
//!
//! ```toml
//! min_inventory = 3
//! audit_blends = true
//!
//! [audit]
//! intent_threshold = 0.7
//! negligible_delta = 5.0
//! unstable_cap = 60.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default minimum number of available items for a meaningful blend.
pub const DEFAULT_MIN_INVENTORY: usize = 3;
/// Default intent level at which antagonism rules fire.
pub const DEFAULT_INTENT_THRESHOLD: f64 = 0.7;
/// Default alignment delta below which a component counts as negligible.
pub const DEFAULT_NEGLIGIBLE_DELTA: f64 = 5.0;
/// Default stability ceiling for blends with a negligible component.
pub const DEFAULT_UNSTABLE_CAP: f64 = 60.0;

/// Thresholds used by the confidence auditor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Intent level (inclusive) at which a dimension counts as strongly requested.
    pub intent_threshold: f64,
    /// Components whose removal moves alignment by less than this are negligible.
    pub negligible_delta: f64,
    /// Stability ceiling applied when any component is negligible.
    pub unstable_cap: f64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            intent_threshold: DEFAULT_INTENT_THRESHOLD,
            negligible_delta: DEFAULT_NEGLIGIBLE_DELTA,
            unstable_cap: DEFAULT_UNSTABLE_CAP,
        }
    }
}

impl AuditConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.intent_threshold.is_finite() {
            return Err(invalid("audit.intent_threshold", "must be finite"));
        }
        if !(0.0..=100.0).contains(&self.negligible_delta) {
            return Err(invalid("audit.negligible_delta", "must be within [0, 100]"));
        }
        if !(0.0..=100.0).contains(&self.unstable_cap) {
            return Err(invalid("audit.unstable_cap", "must be within [0, 100]"));
        }
        Ok(())
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum available items before the engine is consulted.
    pub min_inventory: usize,
    /// Attach a confidence audit to every recommended blend.
    pub audit_blends: bool,
    /// Auditor thresholds.
    pub audit: AuditConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_inventory: DEFAULT_MIN_INVENTORY,
            audit_blends: true,
            audit: AuditConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed TOML, `ConfigError::Invalid` for
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Read` when the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_inventory == 0 {
            return Err(invalid("min_inventory", "must be at least 1"));
        }
        self.audit.validate()
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
