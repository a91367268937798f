//! Report rendering

use std::fmt::Write;

use antenna_pointing::{Observer, PointingSession, VisibilityRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

const MISSING: &str = "--";

/// One refresh tick as shown to the operator
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub at: DateTime<Utc>,
    pub observer: Option<Observer>,
    pub min_elevation_deg: f64,
    pub selected: Option<String>,
    pub visible: Vec<VisibilityRecord>,
}

impl Report {
    pub fn from_session(session: &PointingSession, at: DateTime<Utc>) -> Self {
        Self {
            at,
            observer: session.observer().cloned(),
            min_elevation_deg: session.min_elevation(),
            selected: session.selected().map(str::to_string),
            visible: session.visible().to_vec(),
        }
    }
}

pub fn format_degrees(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{value:.digits$}°")
}

pub fn format_latitude(value: f64, digits: usize) -> String {
    hemisphere(value, digits, 'N', 'S')
}

pub fn format_longitude(value: f64, digits: usize) -> String {
    hemisphere(value, digits, 'E', 'W')
}

pub fn format_kilometers(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{value:.digits$} km")
}

pub fn format_meters(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{value:.0} m")
}

fn hemisphere(value: f64, digits: usize, positive: char, negative: char) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let suffix = if value < 0.0 { negative } else { positive };
    format!("{:.digits$}°{suffix}", value.abs())
}

/// Operator table, selected satellite marked with `*`
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let at = report.at.to_rfc3339_opts(SecondsFormat::Secs, true);

    let Some(observer) = &report.observer else {
        let _ = writeln!(out, "{at}  no observer position");
        return out;
    };

    let _ = writeln!(
        out,
        "{at}  observer {} {} {} {}  mask {}",
        observer.mgrs_canonical,
        format_latitude(observer.latitude_deg, 4),
        format_longitude(observer.longitude_deg, 4),
        format_meters(observer.height_m),
        format_degrees(report.min_elevation_deg, 1),
    );

    if report.visible.is_empty() {
        let _ = writeln!(out, "no satellites above {}", format_degrees(report.min_elevation_deg, 1));
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<8} {:<24} {:>7} {:>6} {:>11}  {:<18} {:>11}",
        "ID", "NAME", "AZ", "EL", "RANGE", "SUB-POINT", "ALT"
    );
    for r in &report.visible {
        let marker = if report.selected.as_deref() == Some(r.satellite_id.as_str()) {
            '*'
        } else {
            ' '
        };
        let sub_point = format!(
            "{} {}",
            format_latitude(r.sub_lat_deg, 2),
            format_longitude(r.sub_lon_deg, 2)
        );
        let _ = writeln!(
            out,
            "{marker} {:<8} {:<24} {:>7} {:>6} {:>11}  {:<18} {:>11}",
            r.satellite_id,
            truncate(&r.name, 24),
            format_degrees(r.azimuth_deg, 1),
            format_degrees(r.elevation_deg, 1),
            format_kilometers(r.range_km, 1),
            sub_point,
            format_kilometers(r.altitude_km, 1),
        );
    }
    out
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
