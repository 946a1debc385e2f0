//! Domain error model.

use thiserror::Error;

/// Result type used across the forecasting crates for value validation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Forecasting itself never fails on sparse or odd data; these errors only
/// surface when a caller builds a value object from invalid parts (a reversed
/// lookback window, a malformed id, an out-of-range tunable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A configuration value was out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
