//! Raw report retrieval boundary.
//!
//! The decoder never performs I/O itself. A [`ReportSource`] resolves a
//! station code to the raw two-line text blob, or fails with
//! [`MetarError::RetrievalFailed`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MetarError, Result};
use crate::models::StationCode;

/// File extension of per-station report files (`KSEA.TXT`)
const REPORT_FILE_EXTENSION: &str = "TXT";

/// Anything that can supply the raw text for a station
pub trait ReportSource {
    fn fetch(&self, station: &StationCode) -> Result<String>;
}

/// Reads reports from the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReportSource {
    /// Directory laid out as `<dir>/<STATION>.TXT`
    Directory(PathBuf),
    /// One file, returned whatever station is requested
    File(PathBuf),
}

impl FileReportSource {
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Path read for `station`
    pub fn path_for(&self, station: &StationCode) -> PathBuf {
        match self {
            Self::Directory(dir) => {
                dir.join(format!("{}.{}", station.as_str(), REPORT_FILE_EXTENSION))
            }
            Self::File(path) => path.clone(),
        }
    }
}

impl ReportSource for FileReportSource {
    fn fetch(&self, station: &StationCode) -> Result<String> {
        let path = self.path_for(station);
        debug!("Reading report for {} from {}", station, path.display());
        read_report(station, &path)
    }
}

fn read_report(station: &StationCode, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MetarError::retrieval_failed(
            station.as_str(),
            format!("no report file at {}", path.display()),
        ),
        _ => MetarError::retrieval_failed(
            station.as_str(),
            format!("failed to read {}: {}", path.display(), e),
        ),
    })
}

/// Text already held in memory, such as stdin contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextReportSource {
    text: String,
}

impl TextReportSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Drain a reader into memory
    pub fn from_reader(mut reader: impl io::Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text })
    }
}

impl ReportSource for TextReportSource {
    fn fetch(&self, _station: &StationCode) -> Result<String> {
        Ok(self.text.clone())
    }
}
