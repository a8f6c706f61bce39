//! Error handling for METAR decoding operations.
//!
//! Only whole-input problems surface as errors. Individual groups that fail
//! to decode degrade to an unknown value inside the parsed report instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid METAR data found for {station} ({non_empty_lines} non-empty line(s), expected 2)")]
    MalformedInput {
        station: String,
        non_empty_lines: usize,
    },

    #[error("No raw report text available for {station}")]
    NoRawText { station: String },

    #[error("Retrieval failed for {station}: {reason}")]
    RetrievalFailed { station: String, reason: String },

    #[error("Invalid ICAO code '{code}': expected a 4-letter airport code (e.g. KSEA, EGLL)")]
    InvalidStationCode { code: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl MetarError {
    /// Create a malformed input error for a station
    pub fn malformed_input(station: impl Into<String>, non_empty_lines: usize) -> Self {
        Self::MalformedInput {
            station: station.into(),
            non_empty_lines,
        }
    }

    /// Create a retrieval failure with context
    pub fn retrieval_failed(station: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            station: station.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the report could not be decoded because no usable data exists
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::MalformedInput { .. } | Self::NoRawText { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_message_names_station() {
        let error = MetarError::malformed_input("KSEA", 1);
        assert!(error.to_string().starts_with("No valid METAR data found for KSEA"));
        assert!(error.is_no_data());
    }

    #[test]
    fn test_retrieval_failure_is_not_no_data() {
        let error = MetarError::retrieval_failed("EGLL", "connection reset");
        assert_eq!(
            error.to_string(),
            "Retrieval failed for EGLL: connection reset"
        );
        assert!(!error.is_no_data());
    }
}
