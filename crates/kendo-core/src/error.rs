//! Error types for the KENDO engine
//!
//! The runtime core has no fatal error path: bad input degrades to a `None`
//! classification or an untouched game state. The only surfaced errors are
//! configuration mistakes caught up front by `validate()`.

use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{0} must be non-zero")]
    ZeroWindow(&'static str),

    #[error("{field} range is inverted: {low} > {high}")]
    InvertedRange {
        field: &'static str,
        low: f32,
        high: f32,
    },
}

/// Result type for KENDO configuration
pub type ConfigResult<T> = Result<T, ConfigError>;
