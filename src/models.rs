//! Core data structures for decoded METAR reports.
//!
//! Defines the raw input pair, the parsed report and every field type it is
//! built from, plus the classification results derived from it. Absent or
//! undecodable fields are always `None`, never a sentinel number.

use crate::constants::{conversion, phenomena};
use crate::error::{MetarError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Input
// =============================================================================

/// ICAO station identifier: exactly four uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a candidate token without allocating
    pub fn is_valid(candidate: &str) -> bool {
        candidate.len() == 4 && candidate.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl FromStr for StationCode {
    type Err = MetarError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        if Self::is_valid(&upper) {
            Ok(Self(upper))
        } else {
            Err(MetarError::InvalidStationCode {
                code: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for StationCode {
    type Error = MetarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two lines a station report file is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    /// Observation time header, e.g. `2024/10/21 19:53`
    pub observation_line: String,
    /// Encoded report body
    pub body_line: String,
}

impl RawReport {
    /// Split a retrieved text blob into header and body.
    ///
    /// Blank lines are ignored. Fewer than two non-empty lines means there is
    /// no valid data for the station.
    pub fn from_text(station: &StationCode, text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        match (lines.next(), lines.next()) {
            (Some(observation_line), Some(body_line)) => Ok(Self {
                observation_line: observation_line.to_string(),
                body_line: body_line.to_string(),
            }),
            (first, _) => Err(MetarError::malformed_input(
                station.as_str(),
                usize::from(first.is_some()),
            )),
        }
    }
}

// =============================================================================
// Time
// =============================================================================

/// Observation time taken from the header line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationTime {
    Parsed(DateTime<Utc>),
    /// Header text passed through unchanged. Best-effort display value only,
    /// not machine-parseable.
    Raw(String),
}

impl ObservationTime {
    /// Render with a strftime pattern, or the raw header text.
    /// An unusable pattern falls back to RFC 3339.
    pub fn display_with(&self, format: &str) -> String {
        use std::fmt::Write as _;

        match self {
            Self::Parsed(time) => {
                let mut text = String::new();
                match write!(text, "{}", time.format(format)) {
                    Ok(()) => text,
                    Err(_) => time.to_rfc3339(),
                }
            }
            Self::Raw(text) => text.clone(),
        }
    }
}

/// Day-of-month and UTC time from the `ddhhmmZ` group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {:02}:{:02}Z", self.day, self.hour, self.minute)
    }
}

// =============================================================================
// Wind
// =============================================================================

/// Surface wind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Wind {
    Calm,
    Variable {
        speed_kt: u16,
        gust_kt: Option<u16>,
    },
    Directional {
        bearing: u16,
        speed_kt: u16,
        gust_kt: Option<u16>,
    },
}

impl Wind {
    pub fn gust_kt(&self) -> Option<u16> {
        match self {
            Self::Calm => None,
            Self::Variable { gust_kt, .. } | Self::Directional { gust_kt, .. } => *gust_kt,
        }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calm => f.write_str("Calm winds"),
            Self::Variable { speed_kt, gust_kt } => {
                write!(f, "Variable at {}kt", speed_kt)?;
                write_gust(f, *gust_kt)
            }
            Self::Directional {
                bearing,
                speed_kt,
                gust_kt,
            } => {
                write!(f, "{:03}° at {}kt", bearing, speed_kt)?;
                write_gust(f, *gust_kt)
            }
        }
    }
}

fn write_gust(f: &mut fmt::Formatter<'_>, gust_kt: Option<u16>) -> fmt::Result {
    match gust_kt {
        Some(gust) => write!(f, " gusting {}kt", gust),
        None => Ok(()),
    }
}

/// Range the wind direction varied across, from a `dddVddd` group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindVariation {
    pub from: u16,
    pub to: u16,
}

// =============================================================================
// Visibility
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityQualifier {
    Exact,
    /// `M` prefix
    LessThan,
    /// `P` prefix, or the metric 9999 / CAVOK groups
    GreaterThan,
}

/// Where a visibility value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityOrigin {
    /// Decoded from a statute mile group
    Reported,
    /// The group was present but unreadable; the default policy value applies
    Defaulted,
    /// Converted from a 4-digit metre group
    Metric { metres: u32 },
    /// Implied by CAVOK
    Cavok,
}

/// Prevailing visibility in statute miles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub statute_miles: f64,
    pub qualifier: VisibilityQualifier,
    pub origin: VisibilityOrigin,
}

impl Visibility {
    pub fn reported(statute_miles: f64, qualifier: VisibilityQualifier) -> Self {
        Self {
            statute_miles,
            qualifier,
            origin: VisibilityOrigin::Reported,
        }
    }

    pub fn defaulted(statute_miles: f64) -> Self {
        Self {
            statute_miles,
            qualifier: VisibilityQualifier::Exact,
            origin: VisibilityOrigin::Defaulted,
        }
    }

    pub fn from_metres(metres: u32) -> Self {
        let (metres, qualifier) = if metres >= conversion::METRIC_VISIBILITY_UNLIMITED {
            (
                conversion::METRIC_VISIBILITY_MAX_METRES,
                VisibilityQualifier::GreaterThan,
            )
        } else {
            (metres, VisibilityQualifier::Exact)
        };

        Self {
            statute_miles: f64::from(metres) / conversion::METRES_PER_STATUTE_MILE,
            qualifier,
            origin: VisibilityOrigin::Metric { metres },
        }
    }

    pub fn cavok() -> Self {
        Self {
            statute_miles: f64::from(conversion::METRIC_VISIBILITY_MAX_METRES)
                / conversion::METRES_PER_STATUTE_MILE,
            qualifier: VisibilityQualifier::GreaterThan,
            origin: VisibilityOrigin::Cavok,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.qualifier {
            VisibilityQualifier::Exact => "",
            VisibilityQualifier::LessThan => "less than ",
            VisibilityQualifier::GreaterThan => "more than ",
        };

        match self.origin {
            VisibilityOrigin::Reported => {
                write!(f, "{}{}SM", prefix, format_miles(self.statute_miles))
            }
            VisibilityOrigin::Defaulted => {
                write!(f, "{}SM (assumed)", format_miles(self.statute_miles))
            }
            VisibilityOrigin::Metric { metres } => write!(f, "{}{} m", prefix, metres),
            VisibilityOrigin::Cavok => f.write_str("CAVOK"),
        }
    }
}

/// Whole miles print without decimals, fractions with at most two places
fn format_miles(miles: f64) -> String {
    if miles.fract() == 0.0 {
        format!("{}", miles as u64)
    } else {
        let text = format!("{:.2}", miles);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

// =============================================================================
// Temperature and Pressure
// =============================================================================

/// Convert Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(celsius: i32) -> f64 {
    f64::from(celsius) * 9.0 / 5.0 + 32.0
}

/// Altimeter setting, kept in both units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Altimeter {
    pub inches_hg: f64,
    pub hectopascals: f64,
}

impl Altimeter {
    pub fn from_inches_hg(inches_hg: f64) -> Self {
        Self {
            inches_hg,
            hectopascals: inches_hg * conversion::HPA_PER_INHG,
        }
    }

    pub fn from_hectopascals(hectopascals: f64) -> Self {
        Self {
            inches_hg: hectopascals / conversion::HPA_PER_INHG,
            hectopascals,
        }
    }

    /// QNH rounded to the nearest whole hectopascal
    pub fn qnh(&self) -> i32 {
        self.hectopascals.round() as i32
    }
}

// =============================================================================
// Sky Condition
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkyCover {
    Few,
    Sct,
    Bkn,
    Ovc,
}

impl SkyCover {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FEW" => Some(Self::Few),
            "SCT" => Some(Self::Sct),
            "BKN" => Some(Self::Bkn),
            "OVC" => Some(Self::Ovc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Few => "FEW",
            Self::Sct => "SCT",
            Self::Bkn => "BKN",
            Self::Ovc => "OVC",
        }
    }

    /// Broken and overcast layers constitute a ceiling
    pub fn is_ceiling(&self) -> bool {
        matches!(self, Self::Bkn | Self::Ovc)
    }
}

impl fmt::Display for SkyCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convective cloud suffix on a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudType {
    #[serde(rename = "CB")]
    Cumulonimbus,
    #[serde(rename = "TCU")]
    ToweringCumulus,
}

impl CloudType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CB" => Some(Self::Cumulonimbus),
            "TCU" => Some(Self::ToweringCumulus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cumulonimbus => "CB",
            Self::ToweringCumulus => "TCU",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyLayer {
    pub cover: SkyCover,
    pub height_ft: u32,
    pub cloud_type: Option<CloudType>,
}

impl fmt::Display for SkyLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}ft", self.cover, self.height_ft)?;
        if let Some(cloud_type) = self.cloud_type {
            write!(f, " {}", cloud_type.as_str())?;
        }
        Ok(())
    }
}

/// Height of the lowest broken or overcast layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ceiling {
    Height(u32),
    /// No BKN/OVC layer: at or above every threshold
    Unlimited,
}

impl Ceiling {
    /// True when the ceiling is at or above `feet`
    pub fn at_least(&self, feet: u32) -> bool {
        match self {
            Self::Height(height) => *height >= feet,
            Self::Unlimited => true,
        }
    }
}

impl Ord for Ceiling {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Height(a), Self::Height(b)) => a.cmp(b),
            (Self::Height(_), Self::Unlimited) => Ordering::Less,
            (Self::Unlimited, Self::Height(_)) => Ordering::Greater,
            (Self::Unlimited, Self::Unlimited) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Ceiling {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Weather Phenomena
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    Moderate,
    Heavy,
    Vicinity,
}

impl Intensity {
    /// Split an intensity or proximity prefix off a weather token
    pub fn split_prefix(token: &str) -> (Self, &str) {
        if let Some(rest) = token.strip_prefix(phenomena::HEAVY_PREFIX) {
            (Self::Heavy, rest)
        } else if let Some(rest) = token.strip_prefix(phenomena::LIGHT_PREFIX) {
            (Self::Light, rest)
        } else if let Some(rest) = token.strip_prefix(phenomena::VICINITY_PREFIX) {
            (Self::Vicinity, rest)
        } else {
            (Self::Moderate, token)
        }
    }

    /// Precedence within a hazard family: heavy > moderate > light > vicinity
    pub fn rank(&self) -> u8 {
        match self {
            Self::Vicinity => 0,
            Self::Light => 1,
            Self::Moderate => 2,
            Self::Heavy => 3,
        }
    }
}

/// Two-letter descriptor and phenomenon codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhenomenonCode {
    // descriptors
    Mi,
    Bc,
    Pr,
    Dr,
    Bl,
    Sh,
    Ts,
    Fz,
    // precipitation
    Dz,
    Ra,
    Sn,
    Sg,
    Ic,
    Pl,
    Gr,
    Gs,
    Up,
    // obscuration
    Br,
    Fg,
    Fu,
    Va,
    Du,
    Sa,
    Hz,
    Py,
    // other
    Po,
    Sq,
    Fc,
    Ss,
    Ds,
}

impl PhenomenonCode {
    pub fn from_code(code: &str) -> Option<Self> {
        let phenomenon = match code {
            "MI" => Self::Mi,
            "BC" => Self::Bc,
            "PR" => Self::Pr,
            "DR" => Self::Dr,
            "BL" => Self::Bl,
            "SH" => Self::Sh,
            "TS" => Self::Ts,
            "FZ" => Self::Fz,
            "DZ" => Self::Dz,
            "RA" => Self::Ra,
            "SN" => Self::Sn,
            "SG" => Self::Sg,
            "IC" => Self::Ic,
            "PL" => Self::Pl,
            "GR" => Self::Gr,
            "GS" => Self::Gs,
            "UP" => Self::Up,
            "BR" => Self::Br,
            "FG" => Self::Fg,
            "FU" => Self::Fu,
            "VA" => Self::Va,
            "DU" => Self::Du,
            "SA" => Self::Sa,
            "HZ" => Self::Hz,
            "PY" => Self::Py,
            "PO" => Self::Po,
            "SQ" => Self::Sq,
            "FC" => Self::Fc,
            "SS" => Self::Ss,
            "DS" => Self::Ds,
            _ => return None,
        };
        Some(phenomenon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mi => "MI",
            Self::Bc => "BC",
            Self::Pr => "PR",
            Self::Dr => "DR",
            Self::Bl => "BL",
            Self::Sh => "SH",
            Self::Ts => "TS",
            Self::Fz => "FZ",
            Self::Dz => "DZ",
            Self::Ra => "RA",
            Self::Sn => "SN",
            Self::Sg => "SG",
            Self::Ic => "IC",
            Self::Pl => "PL",
            Self::Gr => "GR",
            Self::Gs => "GS",
            Self::Up => "UP",
            Self::Br => "BR",
            Self::Fg => "FG",
            Self::Fu => "FU",
            Self::Va => "VA",
            Self::Du => "DU",
            Self::Sa => "SA",
            Self::Hz => "HZ",
            Self::Py => "PY",
            Self::Po => "PO",
            Self::Sq => "SQ",
            Self::Fc => "FC",
            Self::Ss => "SS",
            Self::Ds => "DS",
        }
    }

    pub fn is_descriptor(&self) -> bool {
        matches!(
            self,
            Self::Mi | Self::Bc | Self::Pr | Self::Dr | Self::Bl | Self::Sh | Self::Ts | Self::Fz
        )
    }
}

/// One decoded phenomenon with the intensity of its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phenomenon {
    pub intensity: Intensity,
    pub code: PhenomenonCode,
}

/// A present-weather group such as `+TSRA` or `VCSH`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherGroup {
    pub intensity: Intensity,
    pub codes: Vec<PhenomenonCode>,
    pub raw: String,
}

impl WeatherGroup {
    pub fn contains(&self, code: PhenomenonCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn phenomena(&self) -> impl Iterator<Item = Phenomenon> + '_ {
        self.codes.iter().map(|&code| Phenomenon {
            intensity: self.intensity,
            code,
        })
    }
}

// =============================================================================
// Qualifiers and Remarks
// =============================================================================

/// Report-level markers describing how the observation was made
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationQualifiers {
    pub auto: bool,
    pub ao1: bool,
    pub ao2: bool,
    pub corrected: bool,
    pub has_remarks: bool,
}

/// Remark markers that raise independent hazard alerts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkMarkers {
    pub maintenance: bool,
    pub visibility_missing: bool,
    pub slp_unavailable: bool,
}

// =============================================================================
// Parsed Report
// =============================================================================

/// Structured result of decoding one report. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub station: StationCode,
    pub observed_at: ObservationTime,
    pub report_time: Option<DayTime>,
    pub wind: Option<Wind>,
    pub wind_variation: Option<WindVariation>,
    pub visibility: Option<Visibility>,
    pub temperature_c: Option<i32>,
    pub dewpoint_c: Option<i32>,
    pub altimeter: Option<Altimeter>,
    pub sky: Vec<SkyLayer>,
    pub sky_clear: bool,
    pub weather: Vec<WeatherGroup>,
    pub qualifiers: StationQualifiers,
    pub remark_markers: RemarkMarkers,
    pub raw_body: String,
}

impl ParsedReport {
    /// Lowest broken or overcast layer, regardless of report order
    pub fn ceiling(&self) -> Ceiling {
        self.sky
            .iter()
            .filter(|layer| layer.cover.is_ceiling())
            .map(|layer| Ceiling::Height(layer.height_ft))
            .min()
            .unwrap_or(Ceiling::Unlimited)
    }

    /// Visibility in statute miles, `None` when no visibility group was found
    pub fn visibility_sm(&self) -> Option<f64> {
        self.visibility.map(|v| v.statute_miles)
    }

    /// All phenomena in report order
    pub fn phenomena(&self) -> impl Iterator<Item = Phenomenon> + '_ {
        self.weather.iter().flat_map(WeatherGroup::phenomena)
    }
}

// =============================================================================
// Classification Results
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    Unknown,
}

impl FlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vfr => "VFR",
            Self::Mvfr => "MVFR",
            Self::Ifr => "IFR",
            Self::Lifr => "LIFR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Colour indicator used at the start of the summary line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Vfr => "🟢",
            Self::Mvfr => "🔵",
            Self::Ifr => "🟠",
            Self::Lifr => "🔴",
            Self::Unknown => "⚪",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the observation was made, by qualifier precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AutomationStatus {
    Ao2 { with_remarks: bool },
    Ao1 { with_remarks: bool },
    Automated,
    Corrected,
    HumanObserver,
}

impl fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (text, with_remarks) = match self {
            Self::Ao2 { with_remarks } => ("Automated (AO2)", *with_remarks),
            Self::Ao1 { with_remarks } => ("Automated (AO1)", *with_remarks),
            Self::Automated => ("Automated report", false),
            Self::Corrected => ("Corrected report", false),
            Self::HumanObserver => ("Human observer", false),
        };

        f.write_str(text)?;
        if with_remarks {
            f.write_str(" with remarks")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_station_code_parsing() {
        assert_eq!("ksea".parse::<StationCode>().unwrap().as_str(), "KSEA");
        assert!("JFK".parse::<StationCode>().is_err());
        assert!("K5EA".parse::<StationCode>().is_err());
        assert!("KSEAX".parse::<StationCode>().is_err());
    }

    #[test]
    fn test_raw_report_requires_two_lines() {
        let station: StationCode = "KSEA".parse().unwrap();

        let report = RawReport::from_text(&station, "2024/10/21 19:53\n\nKSEA 211953Z 18012KT\n")
            .unwrap();
        assert_eq!(report.observation_line, "2024/10/21 19:53");
        assert_eq!(report.body_line, "KSEA 211953Z 18012KT");

        match RawReport::from_text(&station, "2024/10/21 19:53\n  \n") {
            Err(MetarError::MalformedInput {
                non_empty_lines, ..
            }) => assert_eq!(non_empty_lines, 1),
            other => panic!("expected malformed input, got {:?}", other),
        }
        assert!(RawReport::from_text(&station, "").is_err());
    }

    #[test]
    fn test_ceiling_ordering() {
        assert!(Ceiling::Height(99_999) < Ceiling::Unlimited);
        assert!(Ceiling::Height(500) < Ceiling::Height(1000));
        assert!(Ceiling::Unlimited.at_least(u32::MAX));
        assert!(!Ceiling::Height(2900).at_least(3000));
    }

    #[test]
    fn test_visibility_display() {
        let whole = Visibility::reported(10.0, VisibilityQualifier::Exact);
        assert_eq!(whole.to_string(), "10SM");

        let fraction = Visibility::reported(0.25, VisibilityQualifier::LessThan);
        assert_eq!(fraction.to_string(), "less than 0.25SM");

        assert_eq!(Visibility::defaulted(10.0).to_string(), "10SM (assumed)");
        assert_eq!(Visibility::from_metres(9999).to_string(), "more than 10000 m");
    }

    #[test]
    fn test_altimeter_conversion() {
        let altimeter = Altimeter::from_inches_hg(29.92);
        assert_eq!(altimeter.qnh(), 1013);

        let qnh = Altimeter::from_hectopascals(1013.0);
        assert!((qnh.inches_hg - 29.91).abs() < 0.01);
    }

    #[test]
    fn test_wind_display() {
        let wind = Wind::Directional {
            bearing: 180,
            speed_kt: 12,
            gust_kt: Some(20),
        };
        assert_eq!(wind.to_string(), "180° at 12kt gusting 20kt");
        assert_eq!(
            Wind::Directional {
                bearing: 90,
                speed_kt: 8,
                gust_kt: None
            }
            .to_string(),
            "090° at 8kt"
        );
        assert_eq!(Wind::Calm.to_string(), "Calm winds");
    }

    #[test]
    fn test_invalid_time_format_falls_back_to_rfc3339() {
        let time = Utc.with_ymd_and_hms(2024, 10, 21, 19, 53, 0).unwrap();
        let observed = ObservationTime::Parsed(time);

        assert_eq!(observed.display_with("%H:%M"), "19:53");
        assert_eq!(observed.display_with("%Q"), "2024-10-21T19:53:00+00:00");
    }

    #[test]
    fn test_fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(18).round() as i32, 64);
        assert_eq!(celsius_to_fahrenheit(-40), -40.0);
    }
}
