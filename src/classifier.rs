//! Derived classifications for parsed reports.
//!
//! Flight category and automation status are ordered rule lists where the
//! first match wins. Hazard alerts come from a family-aware matcher over the
//! decoded weather groups: each family contributes at most one alert, the
//! highest ranked candidate, followed by the independent remark markers.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{GUST_ALERT_THRESHOLD_KT, flight_rules};
use crate::models::{
    AutomationStatus, Ceiling, FlightCategory, Intensity, ParsedReport, PhenomenonCode,
    StationQualifiers, WeatherGroup,
};

// =============================================================================
// Flight Category
// =============================================================================

/// Minimum visibility and ceiling for a category
#[derive(Debug, Clone, Copy)]
struct CategoryRule {
    category: FlightCategory,
    min_visibility_sm: f64,
    min_ceiling_ft: u32,
}

/// Evaluated top to bottom; anything below the last rule is LIFR
const CATEGORY_RULES: [CategoryRule; 3] = [
    CategoryRule {
        category: FlightCategory::Vfr,
        min_visibility_sm: flight_rules::VFR_MIN_VISIBILITY_SM,
        min_ceiling_ft: flight_rules::VFR_MIN_CEILING_FT,
    },
    CategoryRule {
        category: FlightCategory::Mvfr,
        min_visibility_sm: flight_rules::MVFR_MIN_VISIBILITY_SM,
        min_ceiling_ft: flight_rules::MVFR_MIN_CEILING_FT,
    },
    CategoryRule {
        category: FlightCategory::Ifr,
        min_visibility_sm: flight_rules::IFR_MIN_VISIBILITY_SM,
        min_ceiling_ft: flight_rules::IFR_MIN_CEILING_FT,
    },
];

/// Flight category from visibility and ceiling.
///
/// Unknown visibility gives [`FlightCategory::Unknown`], never LIFR.
pub fn flight_category(visibility_sm: Option<f64>, ceiling: Ceiling) -> FlightCategory {
    let Some(visibility_sm) = visibility_sm else {
        return FlightCategory::Unknown;
    };

    CATEGORY_RULES
        .iter()
        .find(|rule| visibility_sm >= rule.min_visibility_sm && ceiling.at_least(rule.min_ceiling_ft))
        .map_or(FlightCategory::Lifr, |rule| rule.category)
}

/// Flight category of a parsed report
pub fn classify(report: &ParsedReport) -> FlightCategory {
    flight_category(report.visibility_sm(), report.ceiling())
}

// =============================================================================
// Automation Status
// =============================================================================

/// Observer status by precedence AO2 > AO1 > AUTO > COR > none
pub fn automation_status(qualifiers: &StationQualifiers) -> AutomationStatus {
    let with_remarks = qualifiers.has_remarks;

    match qualifiers {
        StationQualifiers { ao2: true, .. } => AutomationStatus::Ao2 { with_remarks },
        StationQualifiers { ao1: true, .. } => AutomationStatus::Ao1 { with_remarks },
        StationQualifiers { auto: true, .. } => AutomationStatus::Automated,
        StationQualifiers {
            corrected: true, ..
        } => AutomationStatus::Corrected,
        _ => AutomationStatus::HumanObserver,
    }
}

// =============================================================================
// Hazard Alerts
// =============================================================================

/// Phenomenon families; declaration order is the order alerts are listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HazardFamily {
    Thunderstorm,
    Fog,
    Rain,
    Snow,
    FreezingPrecipitation,
    Hail,
    FunnelCloud,
    Duststorm,
    Sandstorm,
    VicinityShowers,
    Squall,
}

/// A phenomenon or remark of note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardAlert {
    Thunderstorm { intensity: Intensity, with_rain: bool },
    Fog { freezing: bool },
    FogInVicinity,
    Rain(Intensity),
    Snow(Intensity),
    FreezingRain,
    FreezingDrizzle,
    Hail,
    SmallHail,
    Tornado,
    FunnelCloud,
    Duststorm,
    Sandstorm,
    ShowersInArea,
    Squalls,
    StrongGusts { gust_kt: u16 },
    VisibilityDataMissing,
    SeaLevelPressureUnavailable,
    MaintenanceRequired,
}

impl HazardAlert {
    /// Family for phenomenon alerts; remark markers have none
    fn family(&self) -> Option<HazardFamily> {
        let family = match self {
            Self::Thunderstorm { .. } => HazardFamily::Thunderstorm,
            Self::Fog { .. } | Self::FogInVicinity => HazardFamily::Fog,
            Self::Rain(_) => HazardFamily::Rain,
            Self::Snow(_) => HazardFamily::Snow,
            Self::FreezingRain | Self::FreezingDrizzle => HazardFamily::FreezingPrecipitation,
            Self::Hail | Self::SmallHail => HazardFamily::Hail,
            Self::Tornado | Self::FunnelCloud => HazardFamily::FunnelCloud,
            Self::Duststorm => HazardFamily::Duststorm,
            Self::Sandstorm => HazardFamily::Sandstorm,
            Self::ShowersInArea => HazardFamily::VicinityShowers,
            Self::Squalls => HazardFamily::Squall,
            Self::StrongGusts { .. }
            | Self::VisibilityDataMissing
            | Self::SeaLevelPressureUnavailable
            | Self::MaintenanceRequired => return None,
        };
        Some(family)
    }

    /// Precedence within a family; higher wins
    fn rank(&self) -> u8 {
        match self {
            // with-rain outranks every plain thunderstorm
            Self::Thunderstorm {
                intensity,
                with_rain,
            } => u8::from(*with_rain) * 4 + intensity.rank(),
            Self::Fog { freezing: true } => 2,
            Self::Fog { freezing: false } => 1,
            Self::Rain(intensity) | Self::Snow(intensity) => intensity.rank(),
            Self::FreezingRain | Self::Hail | Self::Tornado => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for HazardAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thunderstorm {
                intensity,
                with_rain,
            } => {
                let base = match intensity {
                    Intensity::Heavy => "Heavy thunderstorm",
                    Intensity::Light => "Light thunderstorm",
                    Intensity::Moderate | Intensity::Vicinity => "Thunderstorm",
                };
                f.write_str(base)?;
                if *with_rain {
                    f.write_str(" with rain")?;
                }
                if *intensity == Intensity::Vicinity {
                    f.write_str(" in vicinity")?;
                }
                Ok(())
            }
            Self::Fog { freezing: true } => f.write_str("Freezing fog"),
            Self::Fog { freezing: false } => f.write_str("Fog"),
            Self::FogInVicinity => f.write_str("Fog in vicinity"),
            Self::Rain(intensity) => write_graded(f, *intensity, "Rain"),
            Self::Snow(intensity) => write_graded(f, *intensity, "Snow"),
            Self::FreezingRain => f.write_str("Freezing rain"),
            Self::FreezingDrizzle => f.write_str("Freezing drizzle"),
            Self::Hail => f.write_str("Hail"),
            Self::SmallHail => f.write_str("Small hail"),
            Self::Tornado => f.write_str("Tornado or waterspout"),
            Self::FunnelCloud => f.write_str("Funnel cloud"),
            Self::Duststorm => f.write_str("Duststorm"),
            Self::Sandstorm => f.write_str("Sandstorm"),
            Self::ShowersInArea => f.write_str("Showers in area"),
            Self::Squalls => f.write_str("Squalls"),
            Self::StrongGusts { gust_kt } => write!(f, "Strong gusts to {}kt", gust_kt),
            Self::VisibilityDataMissing => f.write_str("Visibility sensor data missing"),
            Self::SeaLevelPressureUnavailable => f.write_str("Sea-level pressure unavailable"),
            Self::MaintenanceRequired => f.write_str("Maintenance required"),
        }
    }
}

impl Serialize for HazardAlert {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `Heavy rain`, `Rain`, `Light rain`
fn write_graded(f: &mut fmt::Formatter<'_>, intensity: Intensity, noun: &str) -> fmt::Result {
    match intensity {
        Intensity::Heavy => write!(f, "Heavy {}", noun.to_lowercase()),
        Intensity::Light => write!(f, "Light {}", noun.to_lowercase()),
        Intensity::Moderate | Intensity::Vicinity => f.write_str(noun),
    }
}

/// Candidate alerts raised by one weather group
fn group_candidates(group: &WeatherGroup) -> Vec<HazardAlert> {
    use PhenomenonCode as Code;

    let intensity = group.intensity;
    let vicinity = intensity == Intensity::Vicinity;
    let thunderstorm = group.contains(Code::Ts);
    let freezing = group.contains(Code::Fz);
    let mut candidates = Vec::new();

    if thunderstorm {
        candidates.push(HazardAlert::Thunderstorm {
            intensity,
            with_rain: group.contains(Code::Ra),
        });
    }

    for code in &group.codes {
        let candidate = match code {
            Code::Fg if vicinity => Some(HazardAlert::FogInVicinity),
            Code::Fg => Some(HazardAlert::Fog { freezing }),
            // rain inside a thunderstorm or freezing group belongs to that family
            Code::Ra if freezing => Some(HazardAlert::FreezingRain),
            Code::Ra if !thunderstorm && !vicinity => Some(HazardAlert::Rain(intensity)),
            Code::Dz if freezing => Some(HazardAlert::FreezingDrizzle),
            Code::Sn if !vicinity => Some(HazardAlert::Snow(intensity)),
            Code::Gr => Some(HazardAlert::Hail),
            Code::Gs => Some(HazardAlert::SmallHail),
            Code::Fc if intensity == Intensity::Heavy => Some(HazardAlert::Tornado),
            Code::Fc => Some(HazardAlert::FunnelCloud),
            Code::Ds => Some(HazardAlert::Duststorm),
            Code::Ss => Some(HazardAlert::Sandstorm),
            Code::Sh if vicinity => Some(HazardAlert::ShowersInArea),
            Code::Sq => Some(HazardAlert::Squalls),
            _ => None,
        };
        candidates.extend(candidate);
    }

    candidates
}

/// Ordered hazard alerts for a parsed report. An empty list is a valid result.
pub fn hazard_alerts(report: &ParsedReport) -> Vec<HazardAlert> {
    let mut by_family: BTreeMap<HazardFamily, HazardAlert> = BTreeMap::new();

    for candidate in report.weather.iter().flat_map(group_candidates) {
        let Some(family) = candidate.family() else {
            continue;
        };
        by_family
            .entry(family)
            .and_modify(|current| {
                if candidate.rank() > current.rank() {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    let mut alerts: Vec<HazardAlert> = by_family.into_values().collect();

    if let Some(gust_kt) = report
        .wind
        .and_then(|wind| wind.gust_kt())
        .filter(|gust| *gust >= GUST_ALERT_THRESHOLD_KT)
    {
        alerts.push(HazardAlert::StrongGusts { gust_kt });
    }

    let markers = report.remark_markers;
    if markers.visibility_missing {
        alerts.push(HazardAlert::VisibilityDataMissing);
    }
    if markers.slp_unavailable {
        alerts.push(HazardAlert::SeaLevelPressureUnavailable);
    }
    if markers.maintenance {
        alerts.push(HazardAlert::MaintenanceRequired);
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries_are_inclusive() {
        assert_eq!(
            flight_category(Some(5.0), Ceiling::Height(3000)),
            FlightCategory::Vfr
        );
        assert_eq!(
            flight_category(Some(4.99), Ceiling::Height(3000)),
            FlightCategory::Mvfr
        );
        assert_eq!(
            flight_category(Some(4.99), Ceiling::Height(900)),
            FlightCategory::Ifr
        );
        assert_eq!(
            flight_category(Some(3.0), Ceiling::Height(1000)),
            FlightCategory::Mvfr
        );
        assert_eq!(
            flight_category(Some(1.0), Ceiling::Height(500)),
            FlightCategory::Ifr
        );
        assert_eq!(
            flight_category(Some(0.99), Ceiling::Height(500)),
            FlightCategory::Lifr
        );
        assert_eq!(
            flight_category(Some(10.0), Ceiling::Height(400)),
            FlightCategory::Lifr
        );
    }

    #[test]
    fn test_unlimited_ceiling_leaves_visibility_deciding() {
        assert_eq!(
            flight_category(Some(6.0), Ceiling::Unlimited),
            FlightCategory::Vfr
        );
        assert_eq!(
            flight_category(Some(2.0), Ceiling::Unlimited),
            FlightCategory::Ifr
        );
        assert_eq!(
            flight_category(Some(0.5), Ceiling::Unlimited),
            FlightCategory::Lifr
        );
    }

    #[test]
    fn test_unknown_visibility_is_not_lifr() {
        assert_eq!(
            flight_category(None, Ceiling::Height(200)),
            FlightCategory::Unknown
        );
    }

    #[test]
    fn test_automation_precedence() {
        let all = StationQualifiers {
            auto: true,
            ao1: true,
            ao2: true,
            corrected: true,
            has_remarks: true,
        };
        assert_eq!(
            automation_status(&all),
            AutomationStatus::Ao2 { with_remarks: true }
        );

        let ao1 = StationQualifiers {
            ao1: true,
            auto: true,
            ..Default::default()
        };
        assert_eq!(
            automation_status(&ao1),
            AutomationStatus::Ao1 {
                with_remarks: false
            }
        );

        let auto_cor = StationQualifiers {
            auto: true,
            corrected: true,
            ..Default::default()
        };
        assert_eq!(automation_status(&auto_cor), AutomationStatus::Automated);

        let cor = StationQualifiers {
            corrected: true,
            ..Default::default()
        };
        assert_eq!(automation_status(&cor), AutomationStatus::Corrected);

        assert_eq!(
            automation_status(&StationQualifiers::default()),
            AutomationStatus::HumanObserver
        );
    }

    #[test]
    fn test_automation_status_text() {
        assert_eq!(
            AutomationStatus::Ao2 { with_remarks: true }.to_string(),
            "Automated (AO2) with remarks"
        );
        assert_eq!(
            AutomationStatus::Ao1 {
                with_remarks: false
            }
            .to_string(),
            "Automated (AO1)"
        );
        assert_eq!(AutomationStatus::HumanObserver.to_string(), "Human observer");
    }

    #[test]
    fn test_thunderstorm_rank_prefers_rain_then_intensity() {
        let heavy_plain = HazardAlert::Thunderstorm {
            intensity: Intensity::Heavy,
            with_rain: false,
        };
        let light_with_rain = HazardAlert::Thunderstorm {
            intensity: Intensity::Light,
            with_rain: true,
        };
        let heavy_with_rain = HazardAlert::Thunderstorm {
            intensity: Intensity::Heavy,
            with_rain: true,
        };

        assert!(light_with_rain.rank() > heavy_plain.rank());
        assert!(heavy_with_rain.rank() > light_with_rain.rank());
        assert_eq!(heavy_with_rain.to_string(), "Heavy thunderstorm with rain");
        assert_eq!(
            HazardAlert::Thunderstorm {
                intensity: Intensity::Vicinity,
                with_rain: false
            }
            .to_string(),
            "Thunderstorm in vicinity"
        );
    }
}
