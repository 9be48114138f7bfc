//! Close-approach records and representative velocity selection.

/// Body used for approach filtering when the caller does not choose one.
pub const DEFAULT_PREFERRED_BODY: &str = "Earth";

/// One observed or predicted close approach.
///
/// Distances and velocities are optional because the feed delivers them as
/// strings that may be missing or unparseable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApproachRecord {
    /// Body being approached ("Earth", "Mars", ...).
    pub orbiting_body: String,
    /// Miss distance in kilometers.
    pub miss_distance_km: Option<f64>,
    /// Relative velocity in km/s.
    pub relative_velocity_km_s: Option<f64>,
    /// Epoch of closest approach, milliseconds since the Unix epoch.
    pub epoch_ms: Option<i64>,
    /// Human-readable approach date as supplied by the feed.
    pub date: Option<String>,
}

impl ApproachRecord {
    /// Record with only the fields used for velocity selection.
    pub fn new(orbiting_body: impl Into<String>, miss_distance_km: f64, relative_velocity_km_s: f64) -> Self {
        Self {
            orbiting_body: orbiting_body.into(),
            miss_distance_km: Some(miss_distance_km),
            relative_velocity_km_s: Some(relative_velocity_km_s),
            ..Default::default()
        }
    }

    /// Miss distance for ordering; unknown distances sort last.
    fn sort_distance(&self) -> f64 {
        self.miss_distance_km
            .filter(|d| !d.is_nan())
            .unwrap_or(f64::INFINITY)
    }
}

/// Candidate set: records for `prefer_body`, or every record when the
/// preferred body has none.
fn candidates<'a>(approaches: &'a [ApproachRecord], prefer_body: &str) -> Vec<&'a ApproachRecord> {
    let preferred: Vec<&ApproachRecord> = approaches
        .iter()
        .filter(|a| a.orbiting_body == prefer_body)
        .collect();

    if preferred.is_empty() {
        approaches.iter().collect()
    } else {
        preferred
    }
}

/// Closest approach (smallest miss distance), preferring `prefer_body`.
///
/// Ties keep the earlier record.
pub fn closest_approach<'a>(
    approaches: &'a [ApproachRecord],
    prefer_body: &str,
) -> Option<&'a ApproachRecord> {
    let mut pool = candidates(approaches, prefer_body);
    // Stable sort keeps input order among equal distances.
    pool.sort_by(|a, b| a.sort_distance().total_cmp(&b.sort_distance()));
    pool.first().copied()
}

/// Relative velocity (km/s) of the closest approach to `prefer_body`.
///
/// Falls back to all records when the preferred body has none. `None` when
/// there are no records or the chosen record has no finite velocity.
pub fn pick_velocity_km_s(approaches: &[ApproachRecord], prefer_body: &str) -> Option<f64> {
    closest_approach(approaches, prefer_body)?
        .relative_velocity_km_s
        .filter(|v| v.is_finite())
}

/// Next approach to `body` at or after `now_ms`.
///
/// Without a future approach, the earliest dated approach is returned
/// instead. Records without an epoch are ignored.
pub fn next_approach<'a>(
    approaches: &'a [ApproachRecord],
    body: &str,
    now_ms: i64,
) -> Option<&'a ApproachRecord> {
    let dated = || {
        approaches
            .iter()
            .filter(|a| a.orbiting_body == body)
            .filter_map(|a| a.epoch_ms.map(|epoch| (epoch, a)))
    };

    dated()
        .filter(|(epoch, _)| *epoch >= now_ms)
        .min_by_key(|(epoch, _)| *epoch)
        .or_else(|| dated().min_by_key(|(epoch, _)| *epoch))
        .map(|(_, a)| a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_empty_list() {
        assert_eq!(pick_velocity_km_s(&[], DEFAULT_PREFERRED_BODY), None);
        assert!(closest_approach(&[], DEFAULT_PREFERRED_BODY).is_none());
    }

    #[test]
    fn test_closest_preferred_body_wins() {
        let approaches = fixtures::mixed_approaches();
        assert_eq!(pick_velocity_km_s(&approaches, "Earth"), Some(25.0));
    }

    #[test]
    fn test_falls_back_to_all_records() {
        let approaches = vec![ApproachRecord::new("Mars", 1.0, 99.0)];
        assert_eq!(pick_velocity_km_s(&approaches, "Earth"), Some(99.0));
    }

    #[test]
    fn test_unknown_distance_sorts_last() {
        let approaches = vec![
            ApproachRecord {
                orbiting_body: "Earth".into(),
                miss_distance_km: None,
                relative_velocity_km_s: Some(40.0),
                ..Default::default()
            },
            ApproachRecord::new("Earth", 9e6, 12.0),
        ];
        assert_eq!(pick_velocity_km_s(&approaches, "Earth"), Some(12.0));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let approaches = vec![
            ApproachRecord::new("Earth", 100.0, 7.0),
            ApproachRecord::new("Earth", 100.0, 8.0),
        ];
        assert_eq!(pick_velocity_km_s(&approaches, "Earth"), Some(7.0));
    }

    #[test]
    fn test_missing_velocity_is_none() {
        let approaches = vec![
            ApproachRecord {
                orbiting_body: "Earth".into(),
                miss_distance_km: Some(10.0),
                relative_velocity_km_s: None,
                ..Default::default()
            },
            ApproachRecord::new("Earth", 20.0, 5.0),
        ];
        // The closest record decides, even without a velocity.
        assert_eq!(pick_velocity_km_s(&approaches, "Earth"), None);
    }

    #[test]
    fn test_next_approach_prefers_future() {
        let mut past = ApproachRecord::new("Earth", 1.0, 1.0);
        past.epoch_ms = Some(1_000);
        let mut soon = ApproachRecord::new("Earth", 1.0, 2.0);
        soon.epoch_ms = Some(5_000);
        let mut later = ApproachRecord::new("Earth", 1.0, 3.0);
        later.epoch_ms = Some(9_000);
        let mut mars = ApproachRecord::new("Mars", 1.0, 4.0);
        mars.epoch_ms = Some(4_000);

        let approaches = vec![later, past, mars, soon];
        let next = next_approach(&approaches, "Earth", 2_000).unwrap();
        assert_eq!(next.relative_velocity_km_s, Some(2.0));

        // Everything in the past: earliest dated approach
        let next = next_approach(&approaches, "Earth", 50_000).unwrap();
        assert_eq!(next.relative_velocity_km_s, Some(1.0));

        assert!(next_approach(&approaches, "Venus", 0).is_none());
    }
}
