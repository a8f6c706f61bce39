//! Field decoders for extracted METAR groups
//!
//! Each decoder turns one extracted group into its typed value. A decoder
//! never fails the whole report: unreadable input is logged and becomes
//! `None` (or, for visibility, the documented default).

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use super::tokenizer::{
    AltimeterGroup, DayTimeGroup, SkyGroup, TemperatureGroup, TokenizedBody, WindGroup,
};
use crate::constants::{
    DEFAULT_VISIBILITY_SM, MAX_REPORTED_VISIBILITY_SM, OBSERVATION_TIME_FORMATS, conversion,
    phenomena, remark_markers,
};
use crate::models::{
    Altimeter, CloudType, DayTime, Intensity, ObservationTime, PhenomenonCode, RemarkMarkers,
    SkyCover, SkyLayer, StationQualifiers, Visibility, VisibilityQualifier, WeatherGroup, Wind,
    WindVariation,
};

/// Parse a statute-mile visibility group using the default policy value
///
/// Accepts a whole number (`6SM`), a fraction (`3/4SM`) or a mixed number
/// (`1 1/2SM`), optionally prefixed with `M` (less than) or `P` (more than).
/// Anything unreadable yields [`DEFAULT_VISIBILITY_SM`] tagged as defaulted.
pub fn parse_visibility(group: &str) -> Visibility {
    parse_visibility_with_default(group, DEFAULT_VISIBILITY_SM)
}

/// Parse a statute-mile visibility group with an explicit default
pub fn parse_visibility_with_default(group: &str, default_sm: f64) -> Visibility {
    let text = group.trim();
    let text = text.strip_suffix("SM").unwrap_or(text).trim();

    let (qualifier, value) = if let Some(rest) = text.strip_prefix('M') {
        (VisibilityQualifier::LessThan, rest)
    } else if let Some(rest) = text.strip_prefix('P') {
        (VisibilityQualifier::GreaterThan, rest)
    } else {
        (VisibilityQualifier::Exact, text)
    };

    match parse_statute_miles(value) {
        Some(miles) => Visibility::reported(miles, qualifier),
        None => {
            debug!(
                "Unreadable visibility group '{}', assuming {}SM",
                group, default_sm
            );
            Visibility::defaulted(default_sm)
        }
    }
}

/// Whole, fraction or mixed number. A mixed number whose fraction is
/// unreadable falls back to its whole part.
fn parse_statute_miles(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.split_whitespace().collect();

    match parts.as_slice() {
        [whole, fraction] => {
            let whole = parse_whole_miles(whole)?;
            Some(whole + parse_fraction(fraction).unwrap_or(0.0))
        }
        [single] if single.contains('/') => parse_fraction(single),
        [single] => parse_whole_miles(single),
        _ => None,
    }
}

fn parse_whole_miles(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|miles| (0.0..=MAX_REPORTED_VISIBILITY_SM).contains(miles))
}

/// `N/D` with a non-zero denominator
fn parse_fraction(text: &str) -> Option<f64> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator = numerator.parse::<u32>().ok()?;
    let denominator = denominator.parse::<u32>().ok()?;

    if denominator == 0 {
        debug!("Rejecting visibility fraction with zero denominator: '{}'", text);
        return None;
    }

    Some(f64::from(numerator) / f64::from(denominator))
}

/// Parse a 4-digit metre visibility group
pub fn parse_metric_visibility(group: &str) -> Option<Visibility> {
    group.parse::<u32>().ok().map(Visibility::from_metres)
}

/// Parse a wind group. `00000KT` is calm even when a gust group follows.
pub fn parse_wind(group: &WindGroup<'_>) -> Option<Wind> {
    let speed_kt = match group.speed.parse::<u16>() {
        Ok(speed) => speed,
        Err(e) => {
            debug!("Failed to parse wind speed '{}': {}", group.speed, e);
            return None;
        }
    };
    let gust_kt = group.gust.and_then(|gust| gust.parse::<u16>().ok());

    let wind = match group.direction {
        "000" if speed_kt == 0 => Wind::Calm,
        "VRB" => Wind::Variable { speed_kt, gust_kt },
        bearing => match bearing.parse::<u16>() {
            Ok(bearing) if bearing <= 360 => Wind::Directional {
                bearing,
                speed_kt,
                gust_kt,
            },
            _ => {
                debug!("Wind bearing out of range: '{}'", bearing);
                return None;
            }
        },
    };

    Some(wind)
}

/// Parse a `dddVddd` variable direction group
pub fn parse_wind_variation(from: &str, to: &str) -> Option<WindVariation> {
    let from = from.parse::<u16>().ok().filter(|b| *b <= 360)?;
    let to = to.parse::<u16>().ok().filter(|b| *b <= 360)?;
    Some(WindVariation { from, to })
}

/// Parse one temperature value; a leading `M` negates it
pub fn parse_temperature(value: &str) -> Option<i32> {
    let (negative, digits) = match value.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    match digits.parse::<i32>() {
        Ok(degrees) if negative => Some(-degrees),
        Ok(degrees) => Some(degrees),
        Err(e) => {
            debug!("Failed to parse temperature '{}': {}", value, e);
            None
        }
    }
}

/// Parse the temperature/dew point pair
pub fn parse_temperature_pair(group: &TemperatureGroup<'_>) -> (Option<i32>, Option<i32>) {
    (
        parse_temperature(group.temperature),
        group.dewpoint.and_then(parse_temperature),
    )
}

/// Parse an altimeter group in either unit
pub fn parse_altimeter(group: &AltimeterGroup<'_>) -> Option<Altimeter> {
    match group {
        AltimeterGroup::InchesHg(digits) => digits
            .parse::<u32>()
            .ok()
            .map(|hundredths| Altimeter::from_inches_hg(f64::from(hundredths) / 100.0)),
        AltimeterGroup::Hectopascals(digits) => digits
            .parse::<u32>()
            .ok()
            .map(|hpa| Altimeter::from_hectopascals(f64::from(hpa))),
    }
}

/// Parse one sky layer; height is reported in hundreds of feet
pub fn parse_sky_layer(group: &SkyGroup<'_>) -> Option<SkyLayer> {
    let cover = SkyCover::from_code(group.cover)?;
    let height_ft = group.height.parse::<u32>().ok()? * conversion::FEET_PER_HEIGHT_UNIT;
    let cloud_type = group.cloud_type.and_then(CloudType::from_code);

    Some(SkyLayer {
        cover,
        height_ft,
        cloud_type,
    })
}

/// Decode a present-weather token such as `+TSRA`, `VCSH` or `FZFG`.
///
/// After the optional prefix the token is read greedily two letters at a
/// time; every chunk must be a known code or the token is not weather.
pub fn parse_weather_group(token: &str) -> Option<WeatherGroup> {
    let (intensity, rest) = Intensity::split_prefix(token);

    if rest.is_empty() || rest.len() % phenomena::CODE_LEN != 0 || !rest.is_ascii() {
        return None;
    }

    let codes = rest
        .as_bytes()
        .chunks(phenomena::CODE_LEN)
        .map(|chunk| std::str::from_utf8(chunk).ok().and_then(PhenomenonCode::from_code))
        .collect::<Option<Vec<_>>>()?;

    // Descriptors other than TS and SH only qualify a following phenomenon
    let standalone = |code: &PhenomenonCode| {
        !code.is_descriptor() || matches!(code, PhenomenonCode::Ts | PhenomenonCode::Sh)
    };
    if !codes.iter().any(standalone) {
        return None;
    }

    Some(WeatherGroup {
        intensity,
        codes,
        raw: token.to_string(),
    })
}

/// Parse the `ddhhmmZ` group
pub fn parse_day_time(group: &DayTimeGroup<'_>) -> Option<DayTime> {
    let day = group.day.parse::<u8>().ok().filter(|d| (1..=31).contains(d))?;
    let hour = group.hour.parse::<u8>().ok().filter(|h| *h < 24)?;
    let minute = group.minute.parse::<u8>().ok().filter(|m| *m < 60)?;

    Some(DayTime { day, hour, minute })
}

/// Parse the observation header line, passing it through raw on failure
pub fn parse_observation_time(line: &str) -> ObservationTime {
    let text = line.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return ObservationTime::Parsed(time.with_timezone(&Utc));
    }

    for format in OBSERVATION_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return ObservationTime::Parsed(naive.and_utc());
        }
    }

    debug!("Observation time '{}' not recognized, keeping raw text", text);
    ObservationTime::Raw(text.to_string())
}

/// Collect AUTO/COR from the main section and AO1/AO2 from anywhere
pub fn parse_qualifiers(body: &TokenizedBody<'_>) -> StationQualifiers {
    // AO1A/AO2A are the augmented forms of the same station types
    let any_token = |prefix: &str| {
        body.all_tokens().iter().any(|token| {
            token
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest == "A")
        })
    };

    StationQualifiers {
        auto: body.main_contains("AUTO"),
        ao1: any_token("AO1"),
        ao2: any_token("AO2"),
        corrected: body.main_contains("COR"),
        has_remarks: body.has_remarks(),
    }
}

/// Detect the maintenance, VISNO and SLPNO markers
pub fn parse_remark_markers(body: &TokenizedBody<'_>) -> RemarkMarkers {
    RemarkMarkers {
        maintenance: body.contains_token(remark_markers::MAINTENANCE),
        visibility_missing: body.contains_token(remark_markers::VISIBILITY_MISSING),
        slp_unavailable: body.contains_token(remark_markers::SLP_UNAVAILABLE),
    }
}
