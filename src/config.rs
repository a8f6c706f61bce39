//! Configuration management and validation.
//!
//! Provides the decoder configuration: the visibility default policy and
//! the summary line display settings.

use crate::constants::{DEFAULT_TIME_FORMAT, DEFAULT_VISIBILITY_SM};
use chrono::format::{Item, StrftimeItems};
use crate::error::{MetarError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for the human-readable summary line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix each field with its icon (wind, visibility, temperature, ...)
    pub icons: bool,

    /// strftime pattern for parsed observation times
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            icons: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// Global configuration for METAR decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Visibility used when a visibility group is present but unreadable
    pub default_visibility_sm: f64,

    /// Summary line settings
    pub display: DisplayConfig,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            default_visibility_sm: DEFAULT_VISIBILITY_SM,
            display: DisplayConfig::default(),
        }
    }
}

impl DecoderConfig {
    /// Override the unreadable-visibility default
    pub fn with_default_visibility(mut self, statute_miles: f64) -> Self {
        self.default_visibility_sm = statute_miles;
        self
    }

    /// Drop field icons from the summary line
    pub fn without_icons(mut self) -> Self {
        self.display.icons = false;
        self
    }

    /// Set the observation time display pattern
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.display.time_format = format.into();
        self
    }

    /// Check the configuration before use
    pub fn validate(&self) -> Result<()> {
        if !self.default_visibility_sm.is_finite() || self.default_visibility_sm < 0.0 {
            return Err(MetarError::configuration(format!(
                "default visibility must be a non-negative number of statute miles, got {}",
                self.default_visibility_sm
            )));
        }

        if self.display.time_format.trim().is_empty() {
            return Err(MetarError::configuration("time format must not be empty"));
        }

        if StrftimeItems::new(&self.display.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(MetarError::configuration(format!(
                "invalid time format '{}'",
                self.display.time_format
            )));
        }

        debug!(
            "Decoder configuration validated: default visibility {}SM, time format '{}'",
            self.default_visibility_sm, self.display.time_format
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DecoderConfig::default();
        assert_eq!(config.default_visibility_sm, 10.0);
        assert!(config.display.icons);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = DecoderConfig::default()
            .with_default_visibility(7.0)
            .without_icons()
            .with_time_format("%H:%M");

        assert_eq!(config.default_visibility_sm, 7.0);
        assert!(!config.display.icons);
        assert_eq!(config.display.time_format, "%H:%M");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let negative = DecoderConfig::default().with_default_visibility(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(MetarError::Configuration { .. })
        ));

        let not_a_number = DecoderConfig::default().with_default_visibility(f64::NAN);
        assert!(not_a_number.validate().is_err());

        let empty_format = DecoderConfig::default().with_time_format("  ");
        assert!(empty_format.validate().is_err());
    }

    #[test]
    fn test_unknown_strftime_specifier_rejected() {
        let config = DecoderConfig::default().with_time_format("%Q");
        match config.validate() {
            Err(MetarError::Configuration { message }) => assert!(message.contains("%Q")),
            other => panic!("expected configuration error, got {:?}", other),
        }

        let valid = DecoderConfig::default().with_time_format("%Y-%m-%d %H:%MZ");
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = DecoderConfig::default().without_icons();
        let json = serde_json::to_string(&config).unwrap();
        let restored: DecoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
