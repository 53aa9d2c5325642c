//! Error types for AQI classification.
//!
//! Classification is the only fallible core operation. Prediction accepts every
//! numeric input, and config loading reports through `anyhow` like the calibration
//! loaders do.

use thiserror::Error;

/// Result alias for classification.
pub type AqiResult<T> = Result<T, AqiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    /// Value is NaN or lies outside the band table's [min, max] domain.
    #[error("AQI value {value} is outside the classifiable range [{min}, {max}]")]
    OutOfRange {
        value: f64,
        min: f64,
        max: f64,
    },
}

impl AqiError {
    pub fn out_of_range(value: f64) -> Self {
        Self::OutOfRange {
            value,
            min: crate::bands::AQI_MIN,
            max: crate::bands::AQI_MAX,
        }
    }
}
