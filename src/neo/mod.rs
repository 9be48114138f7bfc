//! Near-Earth object sources: the feed snapshot and manual entry.
//!
//! Both sources end in a [`BodySeed`] with sanitized orbital elements, so the
//! orbit sampler never sees NaN or an open orbit.

pub mod feed;
pub mod loader;
pub mod manual;

use bevy::log::debug;

use crate::body::{BodyProfile, BodySeed, BodySource};
use crate::impact::ImpactModel;
use crate::orbit::{OrbitDetails, OrbitalElements};

pub use feed::{FeedError, NeoRecord, load_feed_file, parse_feed};
pub use loader::{FeedLoadTask, FeedLoaderPlugin, FeedLoaded, FeedStatus, LoadFeed};
pub use manual::{ManualEntry, ManualForm};

/// Seed for a feed record.
pub fn seed_from_record(record: &NeoRecord, model: &ImpactModel) -> BodySeed {
    let name = record.display_name();
    let (a, e, i) = record.raw_elements();
    let elements = OrbitalElements::sanitized(a, e, i);
    let used = [
        elements.semi_major_axis_au,
        elements.eccentricity,
        elements.inclination_deg,
    ];
    if [a, e, i].iter().zip(used).any(|(raw, v)| *raw != Some(v)) {
        debug!("{}: orbital elements defaulted to {:?}", name, elements);
    }

    let (diam_min_km, diam_max_km) = record.diameter_bounds_km();
    let profile = BodyProfile {
        diam_min_km,
        diam_max_km,
        absolute_magnitude_h: record.absolute_magnitude_h,
        approaches: record.approach_records(),
        is_potentially_hazardous: record.is_potentially_hazardous_asteroid,
        manual_velocity_km_s: None,
    };

    BodySeed {
        name,
        elements,
        details: record.orbit_details(),
        size: model.size_of(&profile),
        profile,
        source: BodySource::Feed,
    }
}

/// Seed for a hand-entered body. The entered velocity replaces approach
/// selection.
pub fn seed_from_manual(entry: &ManualEntry, model: &ImpactModel) -> BodySeed {
    let elements = OrbitalElements::sanitized(
        entry.semi_major_axis_au,
        entry.eccentricity,
        entry.inclination_deg,
    );
    let profile = BodyProfile {
        diam_min_km: entry.diam_min_km,
        diam_max_km: entry.diam_max_km,
        absolute_magnitude_h: entry.absolute_magnitude_h,
        approaches: Vec::new(),
        is_potentially_hazardous: false,
        manual_velocity_km_s: entry.velocity_km_s,
    };

    BodySeed {
        name: entry.name.clone(),
        elements,
        details: OrbitDetails::default(),
        size: model.size_of(&profile),
        profile,
        source: BodySource::Manual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::FEED_SNAPSHOT;

    #[test]
    fn test_feed_seed_defaults_bad_eccentricity() {
        let records = parse_feed(FEED_SNAPSHOT).unwrap();
        let model = ImpactModel::default();

        let pk9 = seed_from_record(&records[0], &model);
        assert_eq!(pk9.elements.semi_major_axis_au, 1.3341);
        assert_eq!(pk9.elements.eccentricity, 0.5461);
        assert!(pk9.profile.is_potentially_hazardous);
        assert!((pk9.size.diameter_km - (0.1011f64 * 0.2261).sqrt()).abs() < 1e-12);

        let ganymed = seed_from_record(&records[1], &model);
        assert_eq!(ganymed.elements.eccentricity, 0.0);
        assert_eq!(ganymed.elements.inclination_deg, 26.68);
        assert_eq!(ganymed.source, BodySource::Feed);
    }

    #[test]
    fn test_manual_seed_uses_entered_velocity() {
        let entry = ManualForm::default().parse(1);
        let model = ImpactModel::default();
        let seed = seed_from_manual(&entry, &model);
        assert_eq!(seed.source, BodySource::Manual);
        assert_eq!(model.velocity_of(&seed.profile), Some(15.0));
        assert_eq!(seed.elements.semi_major_axis_au, 1.5);
    }
}
