//! Property-based tests for the impact pipeline using proptest.
//!
//! These tests verify ordering and totality invariants of the size, energy and
//! severity functions over wide input ranges.

use proptest::prelude::*;

use super::severity::{classify_energy_mt, combine_danger_level, tier_from_energy_mt};
use super::size::{DEFAULT_ALBEDO, FALLBACK_DIAMETER_KM, estimate_diameter_km};
use super::{DENSITY_ROCKY_ICY, compute_energy_mt};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The size estimate is always a positive finite number, whatever the inputs.
    #[test]
    fn prop_diameter_always_positive(
        min in proptest::option::of(-10.0f64..10.0),
        max in proptest::option::of(-10.0f64..10.0),
        h in proptest::option::of(-5.0f64..40.0),
    ) {
        let d = estimate_diameter_km(min, max, h, DEFAULT_ALBEDO);
        prop_assert!(d.is_finite() && d > 0.0, "diameter {} for {:?} {:?} {:?}", d, min, max, h);
    }

    /// The geometric mean lies between the two bounds.
    #[test]
    fn prop_geometric_mean_between_bounds(a in 0.001f64..50.0, b in 0.001f64..50.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let d = estimate_diameter_km(Some(lo), Some(hi), None, DEFAULT_ALBEDO);
        prop_assert!(d >= lo * (1.0 - 1e-12) && d <= hi * (1.0 + 1e-12));
    }

    /// Fainter objects (larger H) never come out larger.
    #[test]
    fn prop_magnitude_monotonic(h in 0.0f64..35.0, dh in 0.0f64..5.0) {
        let bright = estimate_diameter_km(None, None, Some(h), DEFAULT_ALBEDO);
        let faint = estimate_diameter_km(None, None, Some(h + dh), DEFAULT_ALBEDO);
        prop_assert!(faint <= bright || faint == FALLBACK_DIAMETER_KM);
    }

    /// Energy is positive and non-decreasing in both diameter and velocity.
    #[test]
    fn prop_energy_monotonic(
        d in 0.001f64..20.0,
        v in 0.1f64..80.0,
        grow in 1.0f64..3.0,
    ) {
        let base = compute_energy_mt(d, v, DENSITY_ROCKY_ICY).unwrap();
        let bigger = compute_energy_mt(d * grow, v, DENSITY_ROCKY_ICY).unwrap();
        let faster = compute_energy_mt(d, v * grow, DENSITY_ROCKY_ICY).unwrap();
        prop_assert!(base.energy_mt > 0.0);
        prop_assert!(bigger.energy_mt >= base.energy_mt);
        prop_assert!(faster.energy_mt >= base.energy_mt);
    }

    /// Non-positive velocity never yields an energy.
    #[test]
    fn prop_no_velocity_no_energy(d in 0.001f64..20.0, v in -80.0f64..=0.0) {
        prop_assert!(compute_energy_mt(d, v, DENSITY_ROCKY_ICY).is_none());
    }

    /// Both classifiers are monotonic in energy, and the PHA flag never lowers danger.
    #[test]
    fn prop_classifiers_monotonic(e in 0.0f64..1e5, factor in 1.0f64..100.0) {
        prop_assert!(tier_from_energy_mt(e) <= tier_from_energy_mt(e * factor));
        prop_assert!(classify_energy_mt(e) <= classify_energy_mt(e * factor));
        prop_assert!(combine_danger_level(e, false).level <= combine_danger_level(e, true).level);
        prop_assert!(combine_danger_level(e, true).level <= combine_danger_level(e * factor, true).level);
    }
}
