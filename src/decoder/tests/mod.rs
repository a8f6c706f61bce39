//! Test utilities and sample reports for decoder testing
//!
//! Shared fixtures used across the field parser and end-to-end decoder tests.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::decoder::MetarDecoder;
use crate::models::{ParsedReport, RawReport, StationCode};
use crate::report::DecodedReport;


pub const KSEA_REPORT: &str = "2024/10/21 19:53
KSEA 211953Z 18012G20KT 10SM FEW050 BKN100 18/12 A2992 RMK AO2";

pub const EGLL_REPORT: &str = "2024/10/21 19:53
EGLL 211953Z 09008KT 1/4SM +TSRA FG BKN005 OVC010 07/06 A2980";

/// Winter report with freezing precipitation, negative temperatures and remarks
pub const KORD_REPORT: &str = "2024/01/15 06:51
KORD 150651Z AUTO 32024G35KT 290V350 1 1/2SM -FZRA BR OVC008 M05/M10 A2968 RMK AO2 SLPNO $";

/// European report with metre visibility and QNH
pub const LFPG_REPORT: &str = "2024/06/01 12:00
METAR LFPG 011200Z 24010KT 9999 SCT040 22/14 Q1018 NOSIG";

pub fn station(code: &str) -> StationCode {
    code.parse().unwrap()
}

/// Decode a fixture with the default decoder
pub fn decode_sample(code: &str, text: &str) -> DecodedReport {
    MetarDecoder::default()
        .decode_text(&station(code), text)
        .unwrap()
}

/// Parse a bare body line under a fixed observation header
pub fn parse_body(code: &str, body: &str) -> ParsedReport {
    let raw = RawReport {
        observation_line: "2024/10/21 19:53".to_string(),
        body_line: body.to_string(),
    };
    MetarDecoder::default().parse(&station(code), &raw)
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
