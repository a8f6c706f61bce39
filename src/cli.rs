//! Command-line interface components.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::DecoderConfig;
use crate::constants::DEFAULT_TIME_FORMAT;
use crate::decoder::MetarDecoder;
use crate::models::{Ceiling, FlightCategory, StationCode};
use crate::report::DecodedReport;
use crate::source::{FileReportSource, ReportSource, TextReportSource};

#[derive(Parser, Debug)]
#[command(name = "metar")]
#[command(about = "Decode a METAR weather report into a one-line summary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(group(ArgGroup::new("input").args(["dir", "file", "stdin"])))]
pub struct Args {
    /// 4-letter ICAO station code (e.g. KSEA, EGLL)
    #[arg(value_name = "STATION")]
    pub station: String,

    /// Directory of station report files named <STATION>.TXT
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Read the report from a single file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Read the report from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Print the decoded report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a field-by-field breakdown after the summary
    #[arg(long)]
    pub details: bool,

    /// Omit field icons from the summary line
    #[arg(long)]
    pub no_icons: bool,

    /// strftime pattern for the observation time
    #[arg(long, value_name = "FMT", default_value = DEFAULT_TIME_FORMAT)]
    pub time_format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Decoder configuration implied by the display flags
    pub fn decoder_config(&self) -> DecoderConfig {
        let config = DecoderConfig::default().with_time_format(&self.time_format);
        if self.no_icons {
            config.without_icons()
        } else {
            config
        }
    }

    /// Report source selected by the input flags; current directory by default
    pub fn report_source(&self) -> Result<Box<dyn ReportSource>> {
        if self.stdin {
            let source = TextReportSource::from_reader(io::stdin().lock())
                .context("Failed to read report from stdin")?;
            return Ok(Box::new(source));
        }

        let source = match (&self.file, &self.dir) {
            (Some(path), _) => FileReportSource::file(path),
            (None, Some(dir)) => FileReportSource::directory(dir),
            (None, None) => FileReportSource::directory("."),
        };
        Ok(Box::new(source))
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_decoder={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Decode the requested station and print the result
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let station: StationCode = args
        .station
        .parse()
        .with_context(|| format!("Cannot look up station '{}'", args.station))?;

    let decoder =
        MetarDecoder::new(args.decoder_config()).context("Invalid decoder configuration")?;
    let source = args.report_source()?;

    info!("Decoding report for {}", station);
    let decoded = decoder
        .decode_station(source.as_ref(), &station)
        .with_context(|| format!("Failed to decode report for {}", station))?;

    if args.json {
        let json = serde_json::to_string_pretty(&decoded)
            .context("Failed to serialize decoded report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", decoded.summary);
    if args.details {
        print_details(&decoded, &args.time_format);
    }

    Ok(())
}

fn print_details(decoded: &DecodedReport, time_format: &str) {
    let report = &decoded.report;
    let unknown = || "unknown".bright_black().to_string();

    println!();
    println!("{}", "Decoded report:".bright_green().bold());

    let label = decoded.category.as_str();
    let category = match decoded.category {
        FlightCategory::Vfr => label.bright_green(),
        FlightCategory::Mvfr => label.bright_blue(),
        FlightCategory::Ifr => label.bright_red(),
        FlightCategory::Lifr => label.bright_magenta(),
        FlightCategory::Unknown => label.bright_black(),
    };

    let rows = [
        ("Station", report.station.to_string()),
        (
            "Observed",
            report.observed_at.display_with(time_format),
        ),
        (
            "Report time",
            report
                .report_time
                .map_or_else(unknown, |time| time.to_string()),
        ),
        ("Category", category.bold().to_string()),
        (
            "Wind",
            report.wind.map_or_else(unknown, |wind| wind.to_string()),
        ),
        (
            "Visibility",
            report
                .visibility
                .map_or_else(unknown, |visibility| visibility.to_string()),
        ),
        (
            "Ceiling",
            match report.ceiling() {
                Ceiling::Height(feet) => format!("{}ft", feet),
                Ceiling::Unlimited => "unlimited".to_string(),
            },
        ),
        ("Automation", decoded.automation.to_string()),
    ];

    for (label, value) in rows {
        println!("  {:<12} {}", format!("{}:", label).bright_cyan(), value);
    }

    if decoded.hazards.is_empty() {
        println!("  {:<12} {}", "Hazards:".bright_cyan(), "none".bright_black());
    } else {
        println!("  {}", "Hazards:".bright_cyan());
        for hazard in &decoded.hazards {
            println!("    {} {}", "-".bright_yellow(), hazard.to_string().bright_yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let args = Args::try_parse_from(["metar", "ksea"]).unwrap();
        assert_eq!(args.station, "ksea");
        assert!(!args.json);
        assert_eq!(args.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.decoder_config().display.icons);
    }

    #[test]
    fn test_input_flags_are_exclusive() {
        assert!(Args::try_parse_from(["metar", "KSEA", "--dir", "a", "--file", "b"]).is_err());
        assert!(Args::try_parse_from(["metar", "KSEA", "--file", "b", "--stdin"]).is_err());
        assert!(Args::try_parse_from(["metar", "KSEA", "--dir", "reports"]).is_ok());
    }

    #[test]
    fn test_display_flags_reach_config() {
        let args = Args::try_parse_from([
            "metar",
            "EGLL",
            "--no-icons",
            "--time-format",
            "%H:%M",
            "--verbose",
        ])
        .unwrap();

        let config = args.decoder_config();
        assert!(!config.display.icons);
        assert_eq!(config.display.time_format, "%H:%M");
        assert_eq!(args.get_log_level(), "debug");
    }
}
