//! Application constants for the METAR decoder
//!
//! This module contains decoding defaults, classification thresholds,
//! unit conversion factors and weather group prefixes used
//! throughout the decoder.

// =============================================================================
// Decoding Defaults
// =============================================================================

/// Visibility assumed when a visibility group is present but cannot be decoded.
///
/// The parsed value is tagged [`crate::models::VisibilityOrigin::Defaulted`].
/// A report with no visibility group at all stays unknown instead.
pub const DEFAULT_VISIBILITY_SM: f64 = 10.0;

/// Largest whole-mile value accepted from a statute-mile group
pub const MAX_REPORTED_VISIBILITY_SM: f64 = 999.0;

/// Display format for parsed observation timestamps (chrono strftime syntax)
pub const DEFAULT_TIME_FORMAT: &str = "%b %d, %H:%M UTC";

/// Report type prefixes that may precede the station group
pub const REPORT_TYPE_PREFIXES: &[&str] = &["METAR", "SPECI"];

/// Tokens that end the main body section of a report
pub const SECTION_TERMINATORS: &[&str] = &["RMK", "BECMG", "TEMPO", "NOSIG"];

/// Remarks section marker
pub const REMARKS_MARKER: &str = "RMK";

/// Sky condition tokens meaning no cloud of significance
pub const CLEAR_SKY_TOKENS: &[&str] = &["CLR", "SKC", "NSC", "NCD"];

/// Ceiling and visibility OK token
pub const CAVOK_TOKEN: &str = "CAVOK";

/// Formats tried, in order, when parsing the observation header line
pub const OBSERVATION_TIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d %b %Y %H:%M",
];

// =============================================================================
// Unit Conversion
// =============================================================================

pub mod conversion {
    /// Hectopascals per inch of mercury
    pub const HPA_PER_INHG: f64 = 33.8639;

    /// Metres per statute mile
    pub const METRES_PER_STATUTE_MILE: f64 = 1609.344;

    /// Metric visibility value meaning "10 km or more"
    pub const METRIC_VISIBILITY_UNLIMITED: u32 = 9999;

    /// Metres reported by CAVOK and by the 9999 group
    pub const METRIC_VISIBILITY_MAX_METRES: u32 = 10_000;

    /// Cloud heights are reported in hundreds of feet
    pub const FEET_PER_HEIGHT_UNIT: u32 = 100;
}

// =============================================================================
// Classification Thresholds
// =============================================================================

/// Flight category thresholds (statute miles, feet)
pub mod flight_rules {
    pub const VFR_MIN_VISIBILITY_SM: f64 = 5.0;
    pub const VFR_MIN_CEILING_FT: u32 = 3000;

    pub const MVFR_MIN_VISIBILITY_SM: f64 = 3.0;
    pub const MVFR_MIN_CEILING_FT: u32 = 1000;

    pub const IFR_MIN_VISIBILITY_SM: f64 = 1.0;
    pub const IFR_MIN_CEILING_FT: u32 = 500;
}

/// Gusts at or above this speed raise a hazard alert
pub const GUST_ALERT_THRESHOLD_KT: u16 = 25;

/// Remark markers that raise independent alerts
pub mod remark_markers {
    /// Station requires maintenance
    pub const MAINTENANCE: &str = "$";

    /// Visibility at the secondary sensor not available
    pub const VISIBILITY_MISSING: &str = "VISNO";

    /// Sea-level pressure not available
    pub const SLP_UNAVAILABLE: &str = "SLPNO";
}

// =============================================================================
// Weather Phenomena
// =============================================================================

/// Weather group prefixes
pub mod phenomena {
    /// Heavy intensity prefix
    pub const HEAVY_PREFIX: &str = "+";

    /// Light intensity prefix
    pub const LIGHT_PREFIX: &str = "-";

    /// In the vicinity prefix
    pub const VICINITY_PREFIX: &str = "VC";

    /// Phenomenon codes are always two letters
    pub const CODE_LEN: usize = 2;
}
