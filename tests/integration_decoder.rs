//! Integration tests for the public decoding API
//!
//! These tests drive the decoder the way the command-line front end does:
//! station files on disk, read through a report source, decoded and rendered.

use metar_decoder::{
    DecoderConfig, FileReportSource, FlightCategory, MetarDecoder, MetarError, ReportSource,
    StationCode, TextReportSource,
};
use std::fs;
use tempfile::TempDir;

const KSEA_REPORT: &str = "2024/10/21 19:53\nKSEA 211953Z 18012G20KT 10SM FEW050 BKN100 18/12 A2992 RMK AO2\n";
const KBOS_REPORT: &str = "2024/10/21 19:54\nKBOS 211954Z VRB03KT 2SM -SN BR BKN007 OVC015 M02/M04 A3001 RMK AO2 VISNO\n";

fn station(code: &str) -> StationCode {
    code.parse().unwrap()
}

/// Station directory in the `<STATION>.TXT` layout
fn create_station_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("KSEA.TXT"), KSEA_REPORT).unwrap();
    fs::write(temp_dir.path().join("KBOS.TXT"), KBOS_REPORT).unwrap();
    fs::write(temp_dir.path().join("KXXX.TXT"), "2024/10/21 19:54\n").unwrap();
    temp_dir
}

#[test]
fn test_decode_station_files() {
    let temp_dir = create_station_dir();
    let source = FileReportSource::directory(temp_dir.path());
    let decoder = MetarDecoder::default();

    let ksea = decoder.decode_station(&source, &station("ksea")).unwrap();
    assert_eq!(ksea.category, FlightCategory::Vfr);
    assert!(ksea.hazards.is_empty());

    let kbos = decoder.decode_station(&source, &station("KBOS")).unwrap();
    assert_eq!(kbos.category, FlightCategory::Ifr);
    assert_eq!(kbos.report.temperature_c, Some(-2));
    let hazards: Vec<String> = kbos.hazards.iter().map(ToString::to_string).collect();
    assert_eq!(hazards, vec!["Light snow", "Visibility sensor data missing"]);
    assert!(kbos.summary.contains("Wind: Variable at 3kt"));
}

#[test]
fn test_station_file_errors() {
    let temp_dir = create_station_dir();
    let source = FileReportSource::directory(temp_dir.path());
    let decoder = MetarDecoder::default();

    let missing = decoder.decode_station(&source, &station("EGLL")).unwrap_err();
    assert!(matches!(missing, MetarError::RetrievalFailed { .. }));
    assert!(!missing.is_no_data());

    let truncated = decoder.decode_station(&source, &station("KXXX")).unwrap_err();
    assert!(truncated.is_no_data());
    assert!(
        truncated
            .to_string()
            .starts_with("No valid METAR data found for KXXX")
    );
}

#[test]
fn test_custom_source_implementation() {
    struct Fixed;

    impl ReportSource for Fixed {
        fn fetch(&self, station: &StationCode) -> metar_decoder::Result<String> {
            Ok(format!(
                "2024-10-21 19:53\n{} 211953Z 00000KT 1/2SM FG VV002 10/10 A3010",
                station
            ))
        }
    }

    let decoded = MetarDecoder::default()
        .decode_station(&Fixed, &station("KSFO"))
        .unwrap();

    assert_eq!(decoded.category, FlightCategory::Lifr);
    assert!(decoded.summary.contains("Calm winds"));
    assert!(decoded.summary.contains("Sky: unknown"));
}

#[test]
fn test_plain_output_and_json() {
    let config = DecoderConfig::default()
        .without_icons()
        .with_time_format("%Y-%m-%d %H:%MZ");
    let decoder = MetarDecoder::new(config).unwrap();
    let source = TextReportSource::new(KSEA_REPORT);

    let decoded = decoder.decode_station(&source, &station("KSEA")).unwrap();
    assert!(decoded.summary.starts_with("🟢 KSEA (VFR) | Wind: 180° at 12kt"));
    assert!(decoded.summary.contains("| Obs: 2024-10-21 19:53Z |"));

    let json = serde_json::to_value(&decoded).unwrap();
    assert_eq!(json["category"], "VFR");
    assert_eq!(json["automation"]["kind"], "ao2");
    assert_eq!(json["report"]["wind"]["kind"], "directional");
    assert_eq!(json["report"]["wind"]["gust_kt"], 20);
    assert_eq!(json["hazards"].as_array().unwrap().len(), 0);
}

#[test]
fn test_convenience_decode() {
    let decoded = metar_decoder::decode(&station("KSEA"), KSEA_REPORT).unwrap();
    assert_eq!(decoded.station().as_str(), "KSEA");
    assert_eq!(decoded.report.altimeter.unwrap().qnh(), 1013);
}
