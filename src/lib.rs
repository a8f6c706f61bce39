//! METAR Decoder Library
//!
//! A Rust library for decoding raw aviation weather reports (METAR) into
//! structured data and deriving flight classifications from them.
//!
//! This library provides tools for:
//! - Extracting wind, visibility, temperature, altimeter, sky and weather groups
//! - Decoding each group independently, degrading unreadable fields to unknown
//! - Classifying flight category, automation status and hazard alerts
//! - Composing a one-line human-readable summary
//! - Reading raw reports from local station files

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use classifier::HazardAlert;
pub use config::{DecoderConfig, DisplayConfig};
pub use decoder::MetarDecoder;
pub use error::{MetarError, Result};
pub use models::{FlightCategory, ParsedReport, StationCode};
pub use report::DecodedReport;
pub use source::{FileReportSource, ReportSource, TextReportSource};

/// Decode a raw two-line report with the default configuration
pub fn decode(station: &StationCode, text: &str) -> Result<DecodedReport> {
    MetarDecoder::default().decode_text(station, text)
}
