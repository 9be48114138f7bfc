//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use neo_impact::body::{BodyProfile, BodySeed, BodySource};
use neo_impact::impact::{ApproachRecord, SizeEstimate};
use neo_impact::orbit::{OrbitDetails, OrbitalElements};

/// Ticks from a simulation request to impact completion with default settings.
pub const TICKS_TO_IMPACT: usize = 100 + 200;

/// Approaches to Earth and Mars; the closest Earth pass is at 25 km/s.
pub fn mixed_approaches() -> Vec<ApproachRecord> {
    vec![
        ApproachRecord::new("Earth", 500_000.0, 10.0),
        ApproachRecord::new("Earth", 100_000.0, 25.0),
        ApproachRecord::new("Mars", 1.0, 99.0),
    ]
}

/// 1 km hazardous body with [`mixed_approaches`].
pub fn kilometer_profile() -> BodyProfile {
    BodyProfile {
        diam_min_km: Some(1.0),
        diam_max_km: Some(1.0),
        approaches: mixed_approaches(),
        is_potentially_hazardous: true,
        ..Default::default()
    }
}

/// Feed body on an orbit with the given elements.
pub fn seed(name: &str, a: f64, e: f64, i: f64) -> BodySeed {
    BodySeed {
        name: name.to_string(),
        elements: OrbitalElements::sanitized(Some(a), Some(e), Some(i)),
        details: OrbitDetails::default(),
        size: SizeEstimate { diameter_km: 1.0 },
        profile: kilometer_profile(),
        source: BodySource::Feed,
    }
}

/// A minimal date-keyed feed with two records.
pub const SMALL_FEED: &str = r#"{
    "links": {},
    "element_count": 2,
    "near_earth_objects": {
        "2031-01-01": [
            {
                "id": "100",
                "name": "Zeta",
                "absolute_magnitude_h": "22.1",
                "is_potentially_hazardous_asteroid": false,
                "close_approach_data": [
                    {
                        "epoch_date_close_approach": 1924992000000,
                        "relative_velocity": { "kilometers_per_second": "12.5" },
                        "miss_distance": { "kilometers": "750000" },
                        "orbiting_body": "Earth"
                    }
                ],
                "orbital_data": { "semi_major_axis": "1.1", "eccentricity": "0.2", "inclination": "3" }
            },
            {
                "id": "200",
                "name": "Alpha",
                "estimated_diameter": {
                    "kilometers": { "estimated_diameter_min": 0.5, "estimated_diameter_max": 2.0 }
                },
                "is_potentially_hazardous_asteroid": true,
                "close_approach_data": [],
                "orbital_data": { "semi_major_axis": null, "eccentricity": "1.7" }
            }
        ]
    }
}"#;

/// Write `contents` to a fresh temp dir; keep the dir alive while the path is used.
pub fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
