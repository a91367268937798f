//! Two-line element fixtures
//!
//! Builds TLE text with the exact column layout real catalogs use, so parser
//! tests exercise the same slicing as production input.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// ISS reference entry (epoch 2021 day 75.51005787)
pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_LINE1: &str =
    "1 25544U 98067A   21075.51005787  .00001264  00000-0  29621-4 0  9993";
pub const ISS_LINE2: &str =
    "2 25544  51.6440  88.7421 0002396  96.0298 319.7034 15.48902037273910";

/// Keplerian elements in TLE units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSet {
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_day: f64,
}

impl ElementSet {
    /// Circular geostationary slot
    pub fn geostationary(raan_deg: f64, mean_anomaly_deg: f64) -> Self {
        Self {
            inclination_deg: 0.05,
            raan_deg,
            eccentricity: 0.0002,
            arg_perigee_deg: 0.0,
            mean_anomaly_deg,
            mean_motion_rev_day: 1.00273791,
        }
    }

    /// ISS-like low orbit
    pub fn low_earth(raan_deg: f64, mean_anomaly_deg: f64) -> Self {
        Self {
            inclination_deg: 51.6440,
            raan_deg,
            eccentricity: 0.0002396,
            arg_perigee_deg: 96.0298,
            mean_anomaly_deg,
            mean_motion_rev_day: 15.48902037,
        }
    }
}

/// Generate TLE line1 and line2 for `elements` at `epoch`
pub fn tle_lines(norad_id: u32, epoch: DateTime<Utc>, elements: &ElementSet) -> (String, String) {
    // Epoch format: YYDDD.DDDDDDDD (2-digit year, day of year with fraction)
    let year = epoch.year().rem_euclid(100);
    let day_of_year = epoch.ordinal() as f64
        + (epoch.hour() as f64 / 24.0)
        + (epoch.minute() as f64 / 1440.0)
        + (epoch.second() as f64 / 86400.0);

    let line1_base = format!(
        "1 {:05}U 24001A   {:02}{:012.8} -.00000000  00000-0  00000-0 0  999",
        norad_id, year, day_of_year
    );
    let line1 = format!("{}{}", line1_base, checksum_digit(&line1_base));

    // Eccentricity is written as 7 digits with an implied leading decimal point
    let ecc_str = format!("{:07}", (elements.eccentricity * 10_000_000.0).round() as u32);

    let line2_base = format!(
        "2 {:05} {:8.4} {:8.4} {} {:8.4} {:8.4} {:11.8}{:05}",
        norad_id,
        elements.inclination_deg,
        elements.raan_deg,
        ecc_str,
        elements.arg_perigee_deg,
        elements.mean_anomaly_deg,
        elements.mean_motion_rev_day,
        0 // revolution number at epoch
    );
    let line2 = format!("{}{}", line2_base, checksum_digit(&line2_base));

    (line1, line2)
}

/// TLE checksum digit
pub fn checksum_digit(line: &str) -> u32 {
    line.chars()
        .map(|c| match c {
            '-' => 1,
            _ => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}
