//! Group extraction for METAR report bodies
//!
//! Splits a body line into its main section and remarks, then locates each
//! recognized group independently. Every extractor returns the matched text
//! (or its captured sub-fields) or `None`; no extractor depends on another
//! having succeeded, so groups may appear in any order or not at all.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{
    CAVOK_TOKEN, CLEAR_SKY_TOKENS, REMARKS_MARKER, REPORT_TYPE_PREFIXES, SECTION_TERMINATORS,
};
use crate::models::StationCode;

static DAY_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2})(\d{2})(\d{2})Z\b").expect("day/time pattern is valid")
});

static WIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?KT\b").expect("wind pattern is valid")
});

static WIND_VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{3})V(\d{3})\b").expect("wind variation pattern is valid")
});

// Optional M/P qualifier, optional whole number, then anything up to SM.
// Whatever sits in front of SM is handed to the visibility parser, which
// decides whether it is readable.
static VISIBILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)([MP]?(?:\d{1,2} )?\S*?SM)(?:\s|$)").expect("visibility pattern is valid")
});

static METRIC_VISIBILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:NDV)?$").expect("metric visibility pattern is valid")
});

static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(M?\d{2})/(M?\d{2})?(?:\s|$)").expect("temperature pattern is valid")
});

static ALTIMETER_INHG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bA(\d{4})\b").expect("altimeter pattern is valid"));

static ALTIMETER_HPA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bQ(\d{4})\b").expect("QNH pattern is valid"));

static SKY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(FEW|SCT|BKN|OVC)(\d{3})(CB|TCU)?\b").expect("sky pattern is valid")
});

static WEATHER_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+|-|VC)?(?:[A-Z]{2})+$").expect("weather token pattern is valid")
});

/// Day/time group sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTimeGroup<'a> {
    pub day: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
}

/// Wind group sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindGroup<'a> {
    /// Three-digit bearing or `VRB`
    pub direction: &'a str,
    pub speed: &'a str,
    pub gust: Option<&'a str>,
}

/// Temperature/dew point group sub-fields, `M` prefixes still attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureGroup<'a> {
    pub temperature: &'a str,
    pub dewpoint: Option<&'a str>,
}

/// Altimeter group in either unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltimeterGroup<'a> {
    /// `A` group digits, hundredths of an inch of mercury
    InchesHg(&'a str),
    /// `Q` group digits, whole hectopascals
    Hectopascals(&'a str),
}

/// Sky layer group sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyGroup<'a> {
    pub cover: &'a str,
    pub height: &'a str,
    pub cloud_type: Option<&'a str>,
}

/// A report body split into sections and tokens
#[derive(Debug, Clone)]
pub struct TokenizedBody<'a> {
    /// Main section rejoined with single spaces, for pattern matching
    main: String,
    main_tokens: Vec<&'a str>,
    all_tokens: Vec<&'a str>,
    station_index: Option<usize>,
    has_remarks: bool,
}

impl<'a> TokenizedBody<'a> {
    /// Split a body line at the first section terminator (RMK, trend groups)
    pub fn new(body: &'a str) -> Self {
        let all_tokens: Vec<&'a str> = body.split_whitespace().collect();

        let main_len = all_tokens
            .iter()
            .position(|token| SECTION_TERMINATORS.contains(token))
            .unwrap_or(all_tokens.len());
        let main_tokens = all_tokens[..main_len].to_vec();

        let station_index = main_tokens
            .iter()
            .position(|token| !REPORT_TYPE_PREFIXES.contains(token))
            .filter(|&index| StationCode::is_valid(main_tokens[index]));

        let has_remarks = all_tokens.contains(&REMARKS_MARKER);

        Self {
            main: main_tokens.join(" "),
            main_tokens,
            all_tokens,
            station_index,
            has_remarks,
        }
    }

    /// Main section text (everything before RMK or a trend group)
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Every token of the body, remarks included
    pub fn all_tokens(&self) -> &[&'a str] {
        &self.all_tokens
    }

    pub fn has_remarks(&self) -> bool {
        self.has_remarks
    }

    /// True when `token` appears anywhere in the body
    pub fn contains_token(&self, token: &str) -> bool {
        self.all_tokens.iter().any(|t| *t == token)
    }

    /// True when `token` appears in the main section
    pub fn main_contains(&self, token: &str) -> bool {
        self.main_tokens.iter().any(|t| *t == token)
    }

    /// Station group: first token after an optional METAR/SPECI prefix
    pub fn station(&self) -> Option<&'a str> {
        self.station_index.map(|index| self.main_tokens[index])
    }

    pub fn day_time(&self) -> Option<DayTimeGroup<'_>> {
        DAY_TIME_RE.captures(&self.main).map(|caps| DayTimeGroup {
            day: caps.get(1).map_or("", |m| m.as_str()),
            hour: caps.get(2).map_or("", |m| m.as_str()),
            minute: caps.get(3).map_or("", |m| m.as_str()),
        })
    }

    pub fn wind(&self) -> Option<WindGroup<'_>> {
        WIND_RE.captures(&self.main).map(|caps| WindGroup {
            direction: caps.get(1).map_or("", |m| m.as_str()),
            speed: caps.get(2).map_or("", |m| m.as_str()),
            gust: caps.get(3).map(|m| m.as_str()),
        })
    }

    pub fn wind_variation(&self) -> Option<(&str, &str)> {
        WIND_VARIATION_RE.captures(&self.main).and_then(|caps| {
            let from = caps.get(1)?.as_str();
            let to = caps.get(2)?.as_str();
            Some((from, to))
        })
    }

    /// Full statute-mile visibility group including the `SM` suffix,
    /// e.g. `1 1/2SM`, `M1/4SM`, `10SM`
    pub fn visibility(&self) -> Option<&str> {
        first_capture(&VISIBILITY_RE, &self.main)
    }

    /// First 4-digit metre group following the day/time group, or the wind
    /// group when no day/time group is present
    pub fn metric_visibility(&self) -> Option<&'a str> {
        let anchor = self
            .token_position(&DAY_TIME_RE)
            .or_else(|| self.token_position(&WIND_RE))?;

        self.main_tokens[anchor + 1..].iter().find_map(|&token| {
            METRIC_VISIBILITY_RE
                .captures(token)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
    }

    /// Index of the first main-section token matching `re`
    fn token_position(&self, re: &Regex) -> Option<usize> {
        self.main_tokens.iter().position(|token| re.is_match(token))
    }

    pub fn has_cavok(&self) -> bool {
        self.main_contains(CAVOK_TOKEN)
    }

    pub fn temperature(&self) -> Option<TemperatureGroup<'_>> {
        TEMPERATURE_RE.captures(&self.main).and_then(|caps| {
            Some(TemperatureGroup {
                temperature: caps.get(1)?.as_str(),
                dewpoint: caps.get(2).map(|m| m.as_str()),
            })
        })
    }

    /// `A` group when present, otherwise a `Q` group
    pub fn altimeter(&self) -> Option<AltimeterGroup<'_>> {
        first_capture(&ALTIMETER_INHG_RE, &self.main)
            .map(AltimeterGroup::InchesHg)
            .or_else(|| {
                first_capture(&ALTIMETER_HPA_RE, &self.main).map(AltimeterGroup::Hectopascals)
            })
    }

    /// Every sky layer group, in report order
    pub fn sky_layers(&self) -> Vec<SkyGroup<'_>> {
        SKY_RE
            .captures_iter(&self.main)
            .filter_map(|caps| {
                Some(SkyGroup {
                    cover: caps.get(1)?.as_str(),
                    height: caps.get(2)?.as_str(),
                    cloud_type: caps.get(3).map(|m| m.as_str()),
                })
            })
            .collect()
    }

    /// CLR/SKC/NSC/NCD, or CAVOK
    pub fn has_clear_sky(&self) -> bool {
        self.has_cavok()
            || self
                .main_tokens
                .iter()
                .any(|token| CLEAR_SKY_TOKENS.contains(token))
    }

    /// Main-section tokens shaped like present-weather groups, in order.
    /// The station token is never a candidate.
    pub fn weather_candidates(&self) -> Vec<&'a str> {
        self.main_tokens
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.station_index)
            .map(|(_, token)| *token)
            .filter(|token| !REPORT_TYPE_PREFIXES.contains(token))
            .filter(|token| WEATHER_TOKEN_RE.is_match(token))
            .collect()
    }
}

/// First capture group of the leftmost match
fn first_capture<'s>(re: &Regex, text: &'s str) -> Option<&'s str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
