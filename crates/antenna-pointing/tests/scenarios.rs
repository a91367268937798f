//! End-to-end visibility scenarios

use antenna_pointing::{calculate_look_angles, compute_visibility, evaluate, filter_visible, Observer};
use chrono::{DateTime, Duration, TimeZone, Utc};
use fuzz_harness::fixtures::{ISS_LINE1, ISS_LINE2, ISS_NAME};
use fuzz_harness::prelude::*;
use nalgebra::Vector3;
use orbital_mechanics::{parse_catalog, parse_tle, OrbitalElements, TleEntry};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 16, 12, 14, 28).unwrap()
}

fn iss() -> OrbitalElements {
    parse_tle(&TleEntry::new(ISS_NAME, ISS_LINE1, ISS_LINE2)).unwrap()
}

/// ISS plus three geostationary slots and a low orbiter, epoch at the
/// reference time
fn catalog() -> Vec<OrbitalElements> {
    let epoch = reference_time();
    let mut entries = vec![TleEntry::new(ISS_NAME, ISS_LINE1, ISS_LINE2)];
    for (id, name, elements) in [
        (40001, "GEO-A", ElementSet::geostationary(0.0, 130.926)),
        (40002, "GEO-B", ElementSet::geostationary(0.0, 97.926)),
        (40003, "GEO-C", ElementSet::geostationary(0.0, 200.0)),
        (40004, "LEO", ElementSet::low_earth(120.0, 30.0)),
    ] {
        let (line1, line2) = tle_lines(id, epoch, &elements);
        entries.push(TleEntry::new(name, line1, line2));
    }
    entries.push(TleEntry::new("BROKEN", "1 nonsense", "2 nonsense"));
    parse_catalog(&entries)
}

#[test]
fn test_iss_scenario_bounds() {
    let observer = Observer::from_mgrs("43UCR", 0.0).unwrap();
    let records = evaluate(&observer, &[iss()], reference_time());
    assert_eq!(records.len(), 1);

    let iss = &records[0];
    assert_eq!(iss.satellite_id, "25544");
    assert!(iss.sub_lat_deg.is_finite() && iss.sub_lat_deg.abs() <= 51.65);
    assert!(iss.sub_lon_deg.is_finite() && (-180.0..=180.0).contains(&iss.sub_lon_deg));
    // Far side of Asia from Kazakhstan
    assert!(iss.elevation_deg < 0.0, "{iss:?}");
    assert!(compute_visibility(&observer, &[self::iss()], reference_time(), 10.0).is_empty());
}

#[test]
fn test_iss_overhead_from_53tle() {
    let observer = Observer::from_mgrs("53TLE", 0.0).unwrap();
    let visible = compute_visibility(&observer, &[iss()], reference_time(), 10.0);
    assert_eq!(visible.len(), 1);

    let iss = &visible[0];
    assert!((iss.elevation_deg - 86.56).abs() < 0.05, "{iss:?}");
    assert!((iss.azimuth_deg - 319.19).abs() < 0.5, "{iss:?}");
    assert!((iss.range_km - 419.4).abs() < 1.0, "{iss:?}");
    assert!((iss.sub_lat_deg - 40.35).abs() < 0.05);
    assert!((iss.sub_lon_deg - 133.06).abs() < 0.05);
    assert!((iss.altitude_km - 418.7).abs() < 0.5);
}

#[test]
fn test_mixed_catalog_order() {
    let observer = Observer::from_mgrs("53TLE", 0.0).unwrap();
    let elements = catalog();
    assert_eq!(elements.len(), 5);

    let all = evaluate(&observer, &elements, reference_time());
    let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["ISS (ZARYA)", "GEO-A", "GEO-B", "GEO-C", "LEO"]);

    let visible = filter_visible(all, 10.0);
    let names: Vec<&str> = visible.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["ISS (ZARYA)", "GEO-A", "GEO-B"]);
    assert!((visible[1].elevation_deg - 43.56).abs() < 0.1, "{:?}", visible[1]);
    assert!((visible[1].azimuth_deg - 180.3).abs() < 0.5, "{:?}", visible[1]);
    assert!(visible[1].altitude_km > 35_000.0);
}

#[test]
fn test_iss_sets_after_ten_minutes() {
    let observer = Observer::from_mgrs("53TLE", 0.0).unwrap();
    let later = reference_time() + Duration::minutes(10);
    let records = evaluate(&observer, &[iss()], later);
    assert!((records[0].elevation_deg + 13.19).abs() < 0.2, "{:?}", records[0]);
}

#[test]
fn test_azimuth_wraps_near_north() {
    let observer = Observer::from_mgrs("33UXP04", 0.0).unwrap();
    let (sin_lat, cos_lat) = observer.latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = observer.longitude_deg.to_radians().sin_cos();
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    for (heading, expected) in [(-0.05f64, 359.95), (0.05, 0.05), (359.95, 359.95), (360.05, 0.05)] {
        let (s, c) = heading.to_radians().sin_cos();
        let target = observer.ecef_km() + (east * s + north * c) * 1_000.0 + up * 500.0;
        let angles = calculate_look_angles(&observer, &target);
        assert!(angles.azimuth_deg >= 0.0 && angles.azimuth_deg < 360.0);
        assert!((angles.azimuth_deg - expected).abs() < 1e-6, "{heading} -> {angles:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_threshold_is_monotonic(
        entries in prop::collection::vec(tle_entry(), 1..12),
        mgrs in prop::sample::select(vec!["43UCR", "53TLE", "33UXP", "56HLH", "31NAA", "18TWL"]),
        offset in epoch_offset_s(),
        low in elevation_threshold_deg(),
        high in elevation_threshold_deg(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let entries: Vec<TleEntry> = entries.into_iter().map(|(n, l1, l2)| TleEntry::new(n, l1, l2)).collect();
        let elements = parse_catalog(&entries);
        let observer = Observer::from_mgrs(mgrs, 0.0).unwrap();
        let at = elements[0].epoch + Duration::seconds(offset);

        let records = evaluate(&observer, &elements, at);
        prop_assert_eq!(records.len(), elements.len());
        for r in &records {
            prop_assert!((0.0..360.0).contains(&r.azimuth_deg));
            prop_assert!(r.elevation_deg >= -90.0 && r.elevation_deg <= 90.0);
            prop_assert!(r.range_km >= 0.0);
        }

        let loose = filter_visible(records.clone(), low);
        let strict = filter_visible(records, high);
        prop_assert!(strict.len() <= loose.len());
        prop_assert!(strict.iter().all(|r| r.elevation_deg >= high));
        prop_assert!(loose.windows(2).all(|w| w[0].elevation_deg >= w[1].elevation_deg));
    }
}
