//! TLE catalog files

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use orbital_mechanics::{parse_tle_text, TleEntry};
use tracing::{info, warn};

use crate::Result;

/// Load a classic name / line 1 / line 2 text catalog
pub fn load_tle_text(path: impl AsRef<Path>) -> Result<Vec<TleEntry>> {
    let path = path.as_ref();
    info!("Loading TLE text from {:?}", path);
    let text = fs::read_to_string(path)?;
    let entries = parse_tle_text(&text);
    info!("Read {} TLE entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Load a JSON array of `{name, line1, line2}`; `null` slots are skipped
pub fn load_tle_json(path: impl AsRef<Path>) -> Result<Vec<TleEntry>> {
    let path = path.as_ref();
    info!("Loading TLE JSON from {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<Option<TleEntry>> = serde_json::from_reader(reader)?;

    let total = raw.len();
    let entries: Vec<TleEntry> = raw.into_iter().flatten().collect();
    if entries.len() < total {
        warn!(skipped = total - entries.len(), "Null entries in {:?}", path);
    }
    info!("Read {} TLE entries from {:?}", entries.len(), path);
    Ok(entries)
}
