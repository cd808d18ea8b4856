//! Error types for the Solva engine.
//!
//! Every validation failure is raised at the component boundary. No engine
//! returns a silent zero for malformed input; the only documented zero result
//! is a solvency ratio computed against zero total RWA.

use thiserror::Error;

/// A specialized Result type for Solva operations.
pub type SolvaResult<T> = Result<T, SolvaError>;

/// The main error type for Solva operations.
///
/// Unrecognized exposure categories are not an error; they resolve to the
/// default 100% risk weight.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolvaError {
    /// Malformed exposure fields (negative EAD, CCF out of range, over-covered).
    #[error("Invalid exposure: {reason}")]
    InvalidExposure {
        /// Description of what is wrong with the exposure.
        reason: String,
    },

    /// Not enough observations to derive a statistic.
    #[error("Insufficient data: {required} observations required, {actual} provided")]
    InsufficientData {
        /// Minimum number of observations needed.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// Price series with non-positive values or unordered dates.
    #[error("Invalid series: {reason}")]
    InvalidSeries {
        /// Description of the series defect.
        reason: String,
    },

    /// Scalar input outside its admissible domain.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: String,
        /// Reason for rejection.
        reason: String,
    },

    /// Error in date parsing or construction.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl SolvaError {
    /// Creates an invalid exposure error.
    #[must_use]
    pub fn invalid_exposure(reason: impl Into<String>) -> Self {
        Self::InvalidExposure {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolvaError::invalid_exposure("covered amount exceeds EAD");
        assert_eq!(
            err.to_string(),
            "Invalid exposure: covered amount exceeds EAD"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = SolvaError::insufficient_data(2, 1);
        assert!(err.to_string().contains("2 observations required"));
        assert!(err.to_string().contains("1 provided"));
    }

    #[test]
    fn test_invalid_input_names_field() {
        let err = SolvaError::invalid_input("avg_gross_income", "must be non-negative");
        assert!(err.to_string().contains("avg_gross_income"));
    }
}
