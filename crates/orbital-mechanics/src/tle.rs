//! Two-line element sets
//!
//! Fixed-column parsing of NORAD TLEs into mean Keplerian elements.
//!
//! ```text
//! 1 25544U 98067A   21075.51005787  .00001264  00000-0  29621-4 0  9993
//!   ^^^^^            ^^^^^^^^^^^^^^ catalog number, epoch (YYDDD.DDDDDDDD)
//! 2 25544  51.6440  88.7421 0002396  96.0298 319.7034 15.48902037273910
//!          inc      raan    ecc      argp     M        mean motion
//! ```
//!
//! Only the fields the two-body model needs are read; drag terms and the
//! element-set number are ignored.

use std::f64::consts::TAU;
use std::ops::Range;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{MU_EARTH_KM3_S2, SECONDS_PER_DAY};

const LINE1_MIN_LEN: usize = 32;
const LINE2_MIN_LEN: usize = 63;
const CHECKSUM_COLUMN: usize = 68;

/// Two-digit years below this are 20xx, the rest 19xx
const EPOCH_YEAR_PIVOT: u32 = 57;

/// Geostationary screening bounds
pub const GEO_MAX_INCLINATION_DEG: f64 = 20.0;
pub const GEO_MEAN_MOTION_REV_DAY: (f64, f64) = (0.9, 1.1);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TleParseError {
    #[error("Line {line} is too short: need {needed} columns, got {len}")]
    Truncated { line: u8, needed: usize, len: usize },
    #[error("Line {line} must start with '{line} '")]
    BadLineNumber { line: u8 },
    #[error("Line {line} contains non-ASCII text")]
    NonAscii { line: u8 },
    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("Catalog number differs between lines: {line1} vs {line2}")]
    CatalogMismatch { line1: String, line2: String },
    #[error("Eccentricity {0} outside [0, 1)")]
    Eccentricity(f64),
    #[error("Mean motion must be positive, got {0} rev/day")]
    MeanMotion(f64),
    #[error("Epoch day of year {0} outside [1, 367)")]
    EpochDay(f64),
}

/// Raw catalog entry as stored in JSON catalogs and text files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TleEntry {
    #[serde(default)]
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleEntry {
    pub fn new(name: impl Into<String>, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

/// Mean elements of one satellite, with the derived two-body quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Catalog number as written in the TLE
    pub id: String,
    /// Numeric catalog number, absent for alpha-5 designators
    pub norad_id: Option<u32>,
    pub name: String,
    pub epoch: DateTime<Utc>,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
    pub mean_motion_rad_per_sec: f64,
    pub semi_major_axis_km: f64,
}

impl OrbitalElements {
    pub fn period_minutes(&self) -> f64 {
        1440.0 / self.mean_motion_rev_per_day
    }

    /// Near-equatorial and about one revolution per sidereal day
    pub fn is_geostationary(&self) -> bool {
        let (low, high) = GEO_MEAN_MOTION_REV_DAY;
        self.inclination_deg <= GEO_MAX_INCLINATION_DEG
            && (low..=high).contains(&self.mean_motion_rev_per_day)
    }
}

impl TryFrom<&TleEntry> for OrbitalElements {
    type Error = TleParseError;

    fn try_from(entry: &TleEntry) -> Result<Self, Self::Error> {
        parse_tle(entry)
    }
}

/// Parse one entry
pub fn parse_tle(entry: &TleEntry) -> Result<OrbitalElements, TleParseError> {
    let line1 = entry.line1.trim_end();
    let line2 = entry.line2.trim_end();
    check_line(line1, 1, LINE1_MIN_LEN)?;
    check_line(line2, 2, LINE2_MIN_LEN)?;

    let id = slice(line1, 1, 2..7)?.trim().to_string();
    let id2 = slice(line2, 2, 2..7)?.trim();
    if id.is_empty() {
        return Err(TleParseError::InvalidField {
            field: "catalog number",
            value: id,
        });
    }
    if id != id2 {
        return Err(TleParseError::CatalogMismatch {
            line1: id,
            line2: id2.to_string(),
        });
    }

    let epoch = parse_epoch(line1)?;

    let inclination_deg = number(line2, 2, 8..16, "inclination")?;
    let raan_deg = number(line2, 2, 17..25, "right ascension")?;
    let eccentricity = parse_eccentricity(line2)?;
    let arg_perigee_deg = number(line2, 2, 34..42, "argument of perigee")?;
    let mean_anomaly_deg = number(line2, 2, 43..51, "mean anomaly")?;
    let mean_motion_rev_per_day = number(line2, 2, 52..63, "mean motion")?;
    if mean_motion_rev_per_day <= 0.0 {
        return Err(TleParseError::MeanMotion(mean_motion_rev_per_day));
    }

    verify_checksum(line1, 1, &id);
    verify_checksum(line2, 2, &id);

    let mean_motion_rad_per_sec = mean_motion_rev_per_day * TAU / SECONDS_PER_DAY;
    let semi_major_axis_km = (MU_EARTH_KM3_S2 / mean_motion_rad_per_sec.powi(2)).cbrt();

    let name = match entry.name.trim() {
        "" => id.clone(),
        name => name.to_string(),
    };

    Ok(OrbitalElements {
        norad_id: id.parse().ok(),
        id,
        name,
        epoch,
        inclination_deg,
        raan_deg,
        eccentricity,
        arg_perigee_deg,
        mean_anomaly_deg,
        mean_motion_rev_per_day,
        mean_motion_rad_per_sec,
        semi_major_axis_km,
    })
}

/// Parse every entry, skipping and logging the ones that fail
pub fn parse_catalog(entries: &[TleEntry]) -> Vec<OrbitalElements> {
    let parsed: Vec<OrbitalElements> = entries
        .iter()
        .filter_map(|entry| match parse_tle(entry) {
            Ok(elements) => Some(elements),
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Skipping unparseable TLE");
                None
            }
        })
        .collect();

    info!(
        parsed = parsed.len(),
        skipped = entries.len() - parsed.len(),
        "TLE catalog parsed"
    );
    parsed
}

/// Split catalog text into entries.
///
/// Accepts three-line (name, line 1, line 2) and bare two-line blocks; a
/// leading `0 ` on the name line is dropped. Orphaned lines are logged and
/// skipped.
pub fn parse_tle_text(text: &str) -> Vec<TleEntry> {
    let mut entries = Vec::new();
    let mut name: Option<&str> = None;
    let mut lines = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .peekable();

    while let Some(line) = lines.next() {
        if line.starts_with("1 ") {
            match lines.peek() {
                Some(next) if next.starts_with("2 ") => {
                    let line2 = lines.next().unwrap_or_default();
                    let name = name.take().unwrap_or_default();
                    entries.push(TleEntry::new(name, line, line2));
                }
                _ => {
                    warn!(line, "Line 1 without a following line 2");
                    name = None;
                }
            }
        } else if line.starts_with("2 ") {
            warn!(line, "Line 2 without a preceding line 1");
            name = None;
        } else {
            if let Some(previous) = name {
                warn!(name = previous, "Name line without element lines");
            }
            let trimmed = line.trim();
            name = Some(trimmed.strip_prefix("0 ").unwrap_or(trimmed).trim());
        }
    }

    entries
}

/// Keep only geostationary satellites
pub fn filter_geostationary(elements: impl IntoIterator<Item = OrbitalElements>) -> Vec<OrbitalElements> {
    elements.into_iter().filter(OrbitalElements::is_geostationary).collect()
}

/// TLE checksum: sum of digits, minus signs count as one, modulo 10
pub fn checksum(line: &str) -> u32 {
    line.chars()
        .take(CHECKSUM_COLUMN)
        .map(|c| match c {
            '-' => 1,
            _ => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}

fn verify_checksum(line: &str, number: u8, id: &str) {
    let Some(expected) = line[CHECKSUM_COLUMN.min(line.len())..]
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
    else {
        return;
    };
    let computed = checksum(line);
    if computed != expected {
        warn!(id, line = number, expected, computed, "TLE checksum mismatch");
    }
}

fn check_line(line: &str, number: u8, min_len: usize) -> Result<(), TleParseError> {
    if !line.is_ascii() {
        return Err(TleParseError::NonAscii { line: number });
    }
    let prefix = [b'0' + number, b' '];
    if !line.as_bytes().starts_with(&prefix) {
        return Err(TleParseError::BadLineNumber { line: number });
    }
    if line.len() < min_len {
        return Err(TleParseError::Truncated {
            line: number,
            needed: min_len,
            len: line.len(),
        });
    }
    Ok(())
}

fn slice(line: &str, number: u8, range: Range<usize>) -> Result<&str, TleParseError> {
    let len = line.len();
    let needed = range.end;
    line.get(range).ok_or(TleParseError::Truncated {
        line: number,
        needed,
        len,
    })
}

fn number(line: &str, line_no: u8, range: Range<usize>, field: &'static str) -> Result<f64, TleParseError> {
    let raw = slice(line, line_no, range)?.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TleParseError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

fn parse_eccentricity(line2: &str) -> Result<f64, TleParseError> {
    let raw = slice(line2, 2, 26..33)?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TleParseError::InvalidField {
            field: "eccentricity",
            value: raw.to_string(),
        });
    }
    let eccentricity: f64 = format!("0.{raw}")
        .parse()
        .map_err(|_| TleParseError::InvalidField {
            field: "eccentricity",
            value: raw.to_string(),
        })?;
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(TleParseError::Eccentricity(eccentricity));
    }
    Ok(eccentricity)
}

fn parse_epoch(line1: &str) -> Result<DateTime<Utc>, TleParseError> {
    let year_raw = slice(line1, 1, 18..20)?.trim();
    let yy: u32 = year_raw.parse().map_err(|_| TleParseError::InvalidField {
        field: "epoch year",
        value: year_raw.to_string(),
    })?;
    let century = if yy < EPOCH_YEAR_PIVOT { 2000 } else { 1900 };
    let year = (century + yy) as i32;

    let day = number(line1, 1, 20..32, "epoch day")?;
    if !(1.0..367.0).contains(&day) {
        return Err(TleParseError::EpochDay(day));
    }

    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| TleParseError::InvalidField {
            field: "epoch year",
            value: year_raw.to_string(),
        })?;
    let offset_us = ((day - 1.0) * SECONDS_PER_DAY * 1e6).round() as i64;
    Ok(start + Duration::microseconds(offset_us))
}
