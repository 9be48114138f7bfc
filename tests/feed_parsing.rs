//! Feed snapshot parsing and seeding integration tests.

mod common;

use approx::assert_relative_eq;
use neo_impact::impact::ImpactModel;
use neo_impact::neo::{FeedError, load_feed_file, parse_feed, seed_from_record};

#[test]
fn test_envelope_records_sorted_by_name() {
    let records = parse_feed(common::SMALL_FEED).unwrap();
    let names: Vec<String> = records.iter().map(|r| r.display_name()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

#[test]
fn test_numeric_strings_are_accepted() {
    let records = parse_feed(common::SMALL_FEED).unwrap();
    let zeta = &records[1];
    assert_eq!(zeta.absolute_magnitude_h, Some(22.1));
    assert_eq!(zeta.raw_elements(), (Some(1.1), Some(0.2), Some(3.0)));

    let approaches = zeta.approach_records();
    assert_eq!(approaches.len(), 1);
    assert_eq!(approaches[0].relative_velocity_km_s, Some(12.5));
    assert_eq!(approaches[0].epoch_ms, Some(1_924_992_000_000));
}

#[test]
fn test_invalid_elements_fall_back_to_defaults() {
    let records = parse_feed(common::SMALL_FEED).unwrap();
    let seed = seed_from_record(&records[0], &ImpactModel::default());
    assert_eq!(seed.elements.semi_major_axis_au, 1.0);
    assert_eq!(seed.elements.eccentricity, 0.0);
    assert_eq!(seed.elements.inclination_deg, 0.0);
    // Geometric mean of 0.5 and 2.0
    assert_relative_eq!(seed.size.diameter_km, 1.0, max_relative = 1e-12);
}

#[test]
fn test_bare_array_and_duplicates() {
    let json = r#"[
        { "id": "1", "name": "Bee" },
        { "id": "1", "name": "Bee (copy)" },
        { "designation": "2020 AB" }
    ]"#;
    let records = parse_feed(json).unwrap();
    let names: Vec<String> = records.iter().map(|r| r.display_name()).collect();
    assert_eq!(names, vec!["2020 AB", "Bee"]);
}

#[test]
fn test_malformed_record_does_not_drop_the_feed() {
    let json = r#"{
        "near_earth_objects": {
            "2031-01-01": [
                {
                    "id": "1",
                    "name": "Good",
                    "orbital_data": { "semi_major_axis": "1.4", "eccentricity": "0.1" }
                },
                {
                    "id": "2",
                    "name": "Bad orbit",
                    "orbital_data": "n/a"
                },
                {
                    "id": "3",
                    "name": "Bad miss",
                    "close_approach_data": [
                        { "orbiting_body": "Earth", "miss_distance": "123",
                          "relative_velocity": { "kilometers_per_second": 9.5 } }
                    ]
                },
                "garbage"
            ]
        }
    }"#;
    let records = parse_feed(json).unwrap();
    let names: Vec<String> = records.iter().map(|r| r.display_name()).collect();
    assert_eq!(names, vec!["Bad miss", "Bad orbit", "Good"]);

    let model = ImpactModel::default();
    let bad_orbit = seed_from_record(&records[1], &model);
    assert_eq!(bad_orbit.elements.semi_major_axis_au, 1.0);

    let bad_miss = &records[0].approach_records()[0];
    assert_eq!(bad_miss.miss_distance_km, None);
    assert_eq!(bad_miss.relative_velocity_km_s, Some(9.5));
    assert_eq!(model.velocity_of(&seed_from_record(&records[0], &model).profile), Some(9.5));

    let good = seed_from_record(&records[2], &model);
    assert_eq!(good.elements.semi_major_axis_au, 1.4);
}

#[test]
fn test_published_orbit_details_are_seeded() {
    let json = r#"[{
        "name": "Detailed",
        "orbital_data": {
            "semi_major_axis": "1.0",
            "eccentricity": "0.2",
            "perihelion_distance": "0.79",
            "orbital_period": "bogus",
            "minimum_orbit_intersection": "0.003",
            "orbit_class": { "orbit_class_type": "ATE" },
            "orbit_uncertainty": 0,
            "data_arc_in_days": "8000"
        }
    }]"#;
    let records = parse_feed(json).unwrap();
    let seed = seed_from_record(&records[0], &ImpactModel::default());
    let details = &seed.details;
    assert_eq!(details.perihelion_au(&seed.elements), 0.79);
    assert_relative_eq!(details.aphelion_au(&seed.elements), 1.2, max_relative = 1e-12);
    assert_relative_eq!(details.period_days(&seed.elements), 365.25);
    assert_eq!(details.moid_au, Some(0.003));
    assert_eq!(details.orbit_class.as_deref(), Some("ATE"));
    assert_eq!(details.uncertainty.as_deref(), Some("0"));
    assert_eq!(details.data_arc_days, Some(8000.0));
    assert_eq!(details.epoch_osculation, None);
}

#[test]
fn test_load_from_file() {
    let (_dir, path) = common::write_temp("feed.json", common::SMALL_FEED);
    let records = load_feed_file(&path).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match load_feed_file(&path) {
        Err(FeedError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected IO error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(matches!(parse_feed("{ not json"), Err(FeedError::Json(_))));
}
