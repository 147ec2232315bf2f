//! Error types for blendmatch.
//!
//! The scoring, assembly and audit paths are total functions and never
//! return errors. Errors only exist at the boundaries: adapting host
//! records, reading interpreter replies, loading configuration and
//! validating hand-built blends.

use thiserror::Error;

/// Validation errors raised while adapting or checking inputs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Inventory has {available} available items, at least {required} required")]
    InsufficientInventory {
        available: usize,
        required: usize,
    },

    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Blend must have exactly {expected} components, got {actual}")]
    ComponentCount {
        expected: usize,
        actual: usize,
    },

    #[error("Blend role '{role}' appears more than once")]
    DuplicateRole {
        role: String,
    },

    #[error("Blend role '{role}' holds {actual}%, expected {expected}%")]
    RoleShare {
        role: String,
        expected: u8,
        actual: u8,
    },

    #[error("Blend percentages sum to {total}, expected 100")]
    PercentageSum {
        total: u32,
    },

    #[error("Invalid interpretation payload: {reason}")]
    InvalidInterpretation {
        reason: String,
    },
}

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Read {
        path: String,
        message: String,
    },

    #[error("Failed to parse config: {message}")]
    Parse {
        message: String,
    },

    #[error("Config field '{field}' is invalid: {reason}")]
    Invalid {
        field: String,
        reason: String,
    },
}

/// Errors reading or writing host data (inventory files, interpreter replies,
/// recommendation output).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read '{path}': {message}")]
    Read {
        path: String,
        message: String,
    },

    #[error("Failed to parse {what}: {message}")]
    Parse {
        what: String,
        message: String,
    },

    #[error("Failed to encode {what}: {message}")]
    Encode {
        what: String,
        message: String,
    },
}

/// Top-level error type for blendmatch.
#[derive(Debug, Error)]
pub enum BlendError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl BlendError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a data file error.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Returns true when the host should present "no recommendation"
    /// instead of surfacing a failure.
    #[must_use]
    pub const fn is_no_recommendation(&self) -> bool {
        matches!(
            self,
            Self::Validation(ValidationError::InsufficientInventory { .. })
        )
    }
}

/// Result type alias for blendmatch operations.
pub type BlendResult<T> = Result<T, BlendError>;
