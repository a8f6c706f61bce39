//! Report assembly: one decoded record and its summary line

use serde::Serialize;

use crate::classifier::{self, HazardAlert};
use crate::config::DisplayConfig;
use crate::models::{
    AutomationStatus, FlightCategory, ParsedReport, StationCode, Wind, celsius_to_fahrenheit,
};

const SEPARATOR: &str = " | ";

/// Field icons, emitted only when [`DisplayConfig::icons`] is on
mod icons {
    pub const WIND: &str = "💨";
    pub const VISIBILITY: &str = "👁️";
    pub const TEMPERATURE: &str = "🌡️";
    pub const ALTIMETER: &str = "📟";
    pub const SKY: &str = "☁️";
    pub const WEATHER: &str = "🌧️";
    pub const ALERT: &str = "⚠️";
    pub const AUTOMATED: &str = "🤖";
    pub const HUMAN: &str = "👨‍✈️";
}

/// A parsed report with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedReport {
    pub report: ParsedReport,
    pub category: FlightCategory,
    pub automation: AutomationStatus,
    pub hazards: Vec<HazardAlert>,
    pub summary: String,
}

impl DecodedReport {
    pub fn station(&self) -> &StationCode {
        &self.report.station
    }

    pub fn has_hazards(&self) -> bool {
        !self.hazards.is_empty()
    }
}

/// Classify a parsed report and compose its summary line. Pure.
pub fn assemble(report: ParsedReport, display: &DisplayConfig) -> DecodedReport {
    let category = classifier::classify(&report);
    let automation = classifier::automation_status(&report.qualifiers);
    let hazards = classifier::hazard_alerts(&report);
    let summary = summary_line(&report, category, automation, &hazards, display);

    DecodedReport {
        report,
        category,
        automation,
        hazards,
        summary,
    }
}

/// Segments joined with ` | `, in fixed order
pub fn summary_line(
    report: &ParsedReport,
    category: FlightCategory,
    automation: AutomationStatus,
    hazards: &[HazardAlert],
    display: &DisplayConfig,
) -> String {
    let field = |icon: &str, text: String| {
        if display.icons {
            format!("{} {}", icon, text)
        } else {
            text
        }
    };

    let mut segments = vec![
        format!(
            "{} {} ({})",
            category.indicator(),
            report.station,
            category
        ),
        field(icons::WIND, wind_segment(report)),
        field(icons::VISIBILITY, visibility_segment(report)),
        field(icons::TEMPERATURE, temperature_segment(report)),
        field(icons::ALTIMETER, altimeter_segment(report)),
        field(icons::SKY, sky_segment(report)),
    ];

    if !report.weather.is_empty() {
        let groups: Vec<&str> = report.weather.iter().map(|group| group.raw.as_str()).collect();
        segments.push(field(icons::WEATHER, format!("Wx: {}", groups.join(" "))));
    }

    if !hazards.is_empty() {
        let alerts: Vec<String> = hazards.iter().map(ToString::to_string).collect();
        let alerts = alerts.join(", ");
        segments.push(if display.icons {
            format!("{} {}", icons::ALERT, alerts)
        } else {
            format!("Alerts: {}", alerts)
        });
    }

    let automation_icon = match automation {
        AutomationStatus::HumanObserver => icons::HUMAN,
        _ => icons::AUTOMATED,
    };
    segments.push(field(automation_icon, automation.to_string()));

    segments.push(format!(
        "Obs: {}",
        report.observed_at.display_with(&display.time_format)
    ));
    segments.push(format!("METAR: {}", report.raw_body));

    segments.join(SEPARATOR)
}

fn wind_segment(report: &ParsedReport) -> String {
    match report.wind {
        Some(Wind::Calm) => Wind::Calm.to_string(),
        Some(wind) => match report.wind_variation {
            Some(variation) => format!(
                "Wind: {} (varying {:03}°-{:03}°)",
                wind, variation.from, variation.to
            ),
            None => format!("Wind: {}", wind),
        },
        None => "Wind: Not reported".to_string(),
    }
}

fn visibility_segment(report: &ParsedReport) -> String {
    match report.visibility {
        Some(visibility) => format!("Visibility: {}", visibility),
        None => "Visibility: unknown".to_string(),
    }
}

fn fahrenheit(celsius: i32) -> i32 {
    celsius_to_fahrenheit(celsius).round() as i32
}

fn temperature_segment(report: &ParsedReport) -> String {
    match (report.temperature_c, report.dewpoint_c) {
        (Some(temperature), Some(dewpoint)) => format!(
            "Temp/Dew: {}/{}°C ({}°F/{}°F)",
            temperature,
            dewpoint,
            fahrenheit(temperature),
            fahrenheit(dewpoint)
        ),
        (Some(temperature), None) => {
            format!("Temp: {}°C ({}°F)", temperature, fahrenheit(temperature))
        }
        (None, _) => "Temp: unknown".to_string(),
    }
}

fn altimeter_segment(report: &ParsedReport) -> String {
    match report.altimeter {
        Some(altimeter) => format!(
            "Altimeter: {:.2} inHg (QNH {})",
            altimeter.inches_hg,
            altimeter.qnh()
        ),
        None => "Altimeter: unknown".to_string(),
    }
}

fn sky_segment(report: &ParsedReport) -> String {
    if !report.sky.is_empty() {
        let layers: Vec<String> = report.sky.iter().map(ToString::to_string).collect();
        format!("Sky: {}", layers.join(", "))
    } else if report.sky_clear {
        "Sky: clear".to_string()
    } else {
        "Sky: unknown".to_string()
    }
}
