//! METAR report decoder
//!
//! Turns a raw two-line report into a [`ParsedReport`] and then into a fully
//! classified [`DecodedReport`].
//!
//! ## Architecture
//!
//! - [`tokenizer`] - Section splitting and independent group extraction
//! - [`field_parsers`] - Per-group decoders with local degradation to unknown
//!
//! Classification and summary assembly live in [`crate::classifier`] and
//! [`crate::report`]; the decoder wires them together.
//!
//! ## Usage
//!
//! ```rust
//! use metar_decoder::{MetarDecoder, StationCode};
//!
//! # fn example() -> metar_decoder::Result<()> {
//! let decoder = MetarDecoder::default();
//! let station: StationCode = "KSEA".parse()?;
//! let text = "2024/10/21 19:53\nKSEA 211953Z 18012G20KT 10SM FEW050 BKN100 18/12 A2992 RMK AO2";
//!
//! let decoded = decoder.decode_text(&station, text)?;
//! println!("{}", decoded.summary);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod tokenizer;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::{MetarError, Result};
use crate::models::{ParsedReport, RawReport, StationCode, Visibility};
use crate::report::{self, DecodedReport};
use crate::source::ReportSource;
use field_parsers::{
    parse_altimeter, parse_day_time, parse_metric_visibility, parse_observation_time,
    parse_qualifiers, parse_remark_markers, parse_sky_layer, parse_temperature_pair,
    parse_visibility_with_default, parse_weather_group, parse_wind, parse_wind_variation,
};
use tokenizer::TokenizedBody;

/// Stateless METAR decoder. Cheap to share between threads.
#[derive(Debug, Clone, Default)]
pub struct MetarDecoder {
    config: DecoderConfig,
}

impl MetarDecoder {
    /// Create a decoder after validating its configuration
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Split raw text into header and body, then decode it.
    ///
    /// Fails only when the text holds fewer than two non-empty lines.
    pub fn decode_text(&self, station: &StationCode, text: &str) -> Result<DecodedReport> {
        let raw = RawReport::from_text(station, text)?;
        Ok(self.decode(station, &raw))
    }

    /// Fetch a station's report from `source` and decode it
    pub fn decode_station<S>(&self, source: &S, station: &StationCode) -> Result<DecodedReport>
    where
        S: ReportSource + ?Sized,
    {
        let text = source.fetch(station)?;
        if text.trim().is_empty() {
            return Err(MetarError::NoRawText {
                station: station.to_string(),
            });
        }
        self.decode_text(station, &text)
    }

    /// Decode and classify a raw report
    pub fn decode(&self, station: &StationCode, raw: &RawReport) -> DecodedReport {
        let parsed = self.parse(station, raw);
        report::assemble(parsed, &self.config.display)
    }

    /// Decode every recognized group of a raw report.
    ///
    /// Never fails: each group that is missing or unreadable leaves its field
    /// unknown without affecting the others.
    pub fn parse(&self, station: &StationCode, raw: &RawReport) -> ParsedReport {
        let body = TokenizedBody::new(&raw.body_line);

        let reported_station = body
            .station()
            .and_then(|code| code.parse::<StationCode>().ok());
        if let Some(reported) = &reported_station {
            if reported != station {
                debug!(
                    "Report body names station {} while {} was requested",
                    reported, station
                );
            }
        }

        let (temperature_c, dewpoint_c) = body
            .temperature()
            .map(|group| parse_temperature_pair(&group))
            .unwrap_or((None, None));

        let sky = body
            .sky_layers()
            .iter()
            .filter_map(parse_sky_layer)
            .collect();

        let weather = body
            .weather_candidates()
            .into_iter()
            .filter_map(parse_weather_group)
            .collect();

        let parsed = ParsedReport {
            station: reported_station.unwrap_or_else(|| station.clone()),
            observed_at: parse_observation_time(&raw.observation_line),
            report_time: body.day_time().and_then(|group| parse_day_time(&group)),
            wind: body.wind().and_then(|group| parse_wind(&group)),
            wind_variation: body
                .wind_variation()
                .and_then(|(from, to)| parse_wind_variation(from, to)),
            visibility: self.extract_visibility(&body),
            temperature_c,
            dewpoint_c,
            altimeter: body.altimeter().and_then(|group| parse_altimeter(&group)),
            sky,
            sky_clear: body.has_clear_sky(),
            weather,
            qualifiers: parse_qualifiers(&body),
            remark_markers: parse_remark_markers(&body),
            raw_body: raw.body_line.clone(),
        };

        debug!(
            "Parsed {}: wind={:?} visibility={:?} layers={} weather groups={}",
            parsed.station,
            parsed.wind,
            parsed.visibility_sm(),
            parsed.sky.len(),
            parsed.weather.len()
        );

        parsed
    }

    /// Statute-mile group first, then a metre group, then CAVOK
    fn extract_visibility(&self, body: &TokenizedBody<'_>) -> Option<Visibility> {
        if let Some(group) = body.visibility() {
            return Some(parse_visibility_with_default(
                group,
                self.config.default_visibility_sm,
            ));
        }

        body.metric_visibility()
            .and_then(parse_metric_visibility)
            .or_else(|| body.has_cavok().then(Visibility::cavok))
    }
}
