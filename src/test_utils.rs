//! Test utilities for the orbit and impact tests.
//!
//! Provides fixtures for bodies, approach lists and feed snapshots.

/// Fixtures for creating test bodies and observations.
pub mod fixtures {
    use crate::body::{BodyProfile, BodySeed, BodySource};
    use crate::impact::{ApproachRecord, SizeEstimate};
    use crate::orbit::{OrbitDetails, OrbitalElements};

    /// Approaches to Earth and Mars; the closest Earth pass is at 25 km/s.
    pub fn mixed_approaches() -> Vec<ApproachRecord> {
        vec![
            ApproachRecord::new("Earth", 500_000.0, 10.0),
            ApproachRecord::new("Earth", 100_000.0, 25.0),
            ApproachRecord::new("Mars", 1.0, 99.0),
        ]
    }

    /// 1 km body, flagged hazardous, with [`mixed_approaches`].
    pub fn kilometer_profile() -> BodyProfile {
        BodyProfile {
            diam_min_km: Some(1.0),
            diam_max_km: Some(1.0),
            absolute_magnitude_h: Some(17.5),
            approaches: mixed_approaches(),
            is_potentially_hazardous: true,
            manual_velocity_km_s: None,
        }
    }

    /// Feed body on a circular, planar 1 AU orbit.
    pub fn circular_seed(name: &str) -> BodySeed {
        BodySeed {
            name: name.to_string(),
            elements: OrbitalElements::default(),
            details: OrbitDetails::default(),
            size: SizeEstimate { diameter_km: 1.0 },
            profile: kilometer_profile(),
            source: BodySource::Feed,
        }
    }

    /// A two-record feed snapshot in the date-keyed envelope.
    pub const FEED_SNAPSHOT: &str = r#"{
        "element_count": 3,
        "near_earth_objects": {
            "2032-12-19": [
                {
                    "id": "3542519",
                    "name": "(2010 PK9)",
                    "absolute_magnitude_h": 21.9,
                    "estimated_diameter": {
                        "kilometers": {
                            "estimated_diameter_min": 0.1011,
                            "estimated_diameter_max": 0.2261
                        }
                    },
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [
                        {
                            "close_approach_date": "2032-12-19",
                            "close_approach_date_full": "2032-Dec-19 04:21",
                            "epoch_date_close_approach": 1987467660000,
                            "relative_velocity": { "kilometers_per_second": "17.2512" },
                            "miss_distance": { "kilometers": "6214385.3" },
                            "orbiting_body": "Earth"
                        }
                    ],
                    "orbital_data": {
                        "semi_major_axis": "1.3341",
                        "eccentricity": ".5461",
                        "inclination": "13.47",
                        "perihelion_distance": "0.6056",
                        "aphelion_distance": "2.0626",
                        "orbital_period": "562.85",
                        "minimum_orbit_intersection": ".0123",
                        "orbit_uncertainty": "5",
                        "data_arc_in_days": 12,
                        "epoch_osculation": "2460600.5",
                        "orbit_class": { "orbit_class_type": "APO" }
                    }
                }
            ],
            "2032-12-20": [
                {
                    "id": "2001036",
                    "name": "1036 Ganymed (A924 UB)",
                    "absolute_magnitude_h": "9.25",
                    "is_potentially_hazardous_asteroid": false,
                    "close_approach_data": [],
                    "orbital_data": {
                        "semi_major_axis": "2.6658",
                        "eccentricity": "bogus",
                        "inclination": 26.68
                    }
                },
                {
                    "id": "3542519",
                    "name": "(2010 PK9)",
                    "orbital_data": { "semi_major_axis": "9" }
                }
            ]
        }
    }"#;
}
