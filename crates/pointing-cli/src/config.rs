//! Config file and command-line overrides

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use antenna_pointing::PointingConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::Result;

/// Values given on the command line take precedence over the file
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub min_elevation_deg: Option<f64>,
    pub refresh_interval_s: Option<f64>,
    pub height_m: Option<f64>,
}

/// Read a JSON config; keys that are absent keep their defaults
pub fn load_config(path: impl AsRef<Path>) -> Result<PointingConfig> {
    let path = path.as_ref();
    info!("Loading config from {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn apply_overrides(mut config: PointingConfig, overrides: &Overrides) -> PointingConfig {
    if let Some(v) = overrides.min_elevation_deg {
        config.min_elevation_deg = v;
    }
    if let Some(v) = overrides.refresh_interval_s {
        config.refresh_interval_s = v;
    }
    if let Some(v) = overrides.height_m {
        config.default_height_m = v;
    }
    config
}

/// Instant of refresh tick `tick` when stepping from `start`; `None` when it
/// falls outside the representable range
pub fn tick_instant(start: DateTime<Utc>, step: Duration, tick: u32) -> Option<DateTime<Utc>> {
    let offset = step.checked_mul(i32::try_from(tick).ok()?)?;
    start.checked_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_elevation_deg": 20.0, "decode_cache_capacity": 4 }}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.min_elevation_deg, 20.0);
        assert_eq!(config.decode_cache_capacity, 4);
        assert_eq!(config.refresh_interval_s, 5.0);
    }

    #[test]
    fn test_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "min_elevation_deg = 20").unwrap();
        assert!(matches!(load_config(file.path()), Err(crate::CliError::Json(_))));
    }

    #[test]
    fn test_overrides_win() {
        let config = apply_overrides(
            PointingConfig::default(),
            &Overrides {
                min_elevation_deg: Some(30.0),
                height_m: Some(120.0),
                ..Default::default()
            },
        );
        assert_eq!(config.min_elevation_deg, 30.0);
        assert_eq!(config.default_height_m, 120.0);
        assert_eq!(config.refresh_interval_s, 5.0);
    }

    #[test]
    fn test_tick_instants() {
        use chrono::TimeZone;
        let start = Utc.with_ymd_and_hms(2021, 3, 16, 12, 14, 28).unwrap();
        let step = Duration::seconds(5);
        assert_eq!(tick_instant(start, step, 0), Some(start));
        assert_eq!(tick_instant(start, step, 3), Some(start + Duration::seconds(15)));
    }

    #[test]
    fn test_tick_overflow_is_none() {
        use chrono::TimeZone;
        let start = Utc.with_ymd_and_hms(2021, 3, 16, 12, 14, 28).unwrap();
        let one_day = Duration::days(1);
        assert_eq!(tick_instant(start, one_day, u32::MAX), None);
        assert_eq!(tick_instant(start, one_day, i32::MAX as u32), None);
    }
}
