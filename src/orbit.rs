//! Keplerian orbit sampling.
//!
//! Converts idealized two-body elements {a, e, i} into a closed polyline of
//! 3D points. The ellipse is drawn in the x/z plane with the focus at the
//! origin, then tilted about the x-axis by the inclination:
//!
//! ```text
//! r(θ) = a·scale·(1 − e²) / (1 + e·cos θ)
//! x = r cos θ,  z = r sin θ
//! y = z sin i,  z' = z cos i
//! ```
//!
//! Sampling is uniform in θ. The first and last samples sit at θ = 0 and
//! θ = 2π, so a looping animation never jumps.

use bevy::math::DVec3;

use crate::types::{DAYS_PER_YEAR, DEG_TO_RAD};

/// Default number of segments for a sampled orbit.
pub const DEFAULT_SEGMENTS: usize = 128;

/// Fallback semi-major axis (AU) when a record carries no usable value.
pub const DEFAULT_SEMI_MAJOR_AXIS_AU: f64 = 1.0;

/// Errors raised for arguments outside the sampler's domain.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("semi-major axis must be positive and finite, got {0}")]
    InvalidSemiMajorAxis(f64),

    #[error("eccentricity must lie in [0, 1), got {0}")]
    InvalidEccentricity(f64),

    #[error("inclination must be finite, got {0}")]
    InvalidInclination(f64),

    #[error("orbit scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("segment count must be at least 1")]
    InvalidSegments,
}

/// Idealized elliptical orbit of a body around the central focus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (AU), always > 0.
    pub semi_major_axis_au: f64,
    /// Eccentricity in [0, 1).
    pub eccentricity: f64,
    /// Inclination of the orbital plane (degrees).
    pub inclination_deg: f64,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            semi_major_axis_au: DEFAULT_SEMI_MAJOR_AXIS_AU,
            eccentricity: 0.0,
            inclination_deg: 0.0,
        }
    }
}

impl OrbitalElements {
    /// Build validated elements.
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
    ) -> Result<Self, OrbitError> {
        if !semi_major_axis_au.is_finite() || semi_major_axis_au <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis_au));
        }
        if !eccentricity.is_finite() || !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        if !inclination_deg.is_finite() {
            return Err(OrbitError::InvalidInclination(inclination_deg));
        }
        Ok(Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
        })
    }

    /// Build elements from possibly-missing values, substituting the
    /// documented defaults (a = 1, e = 0, i = 0) for anything unusable.
    ///
    /// Never produces NaN, a non-positive axis, or an open orbit.
    pub fn sanitized(a: Option<f64>, e: Option<f64>, i: Option<f64>) -> Self {
        let semi_major_axis_au = a
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_SEMI_MAJOR_AXIS_AU);
        let eccentricity = e
            .filter(|v| v.is_finite() && (0.0..1.0).contains(v))
            .unwrap_or(0.0);
        let inclination_deg = i.filter(|v| v.is_finite()).unwrap_or(0.0);

        Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
        }
    }

    /// Perihelion distance q = a(1 − e) in AU.
    pub fn perihelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Aphelion distance Q = a(1 + e) in AU.
    pub fn aphelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }

    /// Orbital period in days from Kepler's third law (P[yr] = a[AU]^1.5).
    pub fn period_days(&self) -> f64 {
        DAYS_PER_YEAR * self.semi_major_axis_au.powf(1.5)
    }

    /// Semi-latus rectum p = a·scale·(1 − e²).
    fn semi_latus_rectum(&self, scale: f64) -> f64 {
        self.semi_major_axis_au * scale * (1.0 - self.eccentricity * self.eccentricity)
    }
}

/// Orbit determination values published alongside the elements.
///
/// Distances and the period, when present, take precedence over the values
/// derived from {a, e}.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitDetails {
    pub perihelion_au: Option<f64>,
    pub aphelion_au: Option<f64>,
    pub period_days: Option<f64>,
    /// Minimum orbit intersection distance with Earth (AU).
    pub moid_au: Option<f64>,
    /// Orbit class such as "APO" or "AMO".
    pub orbit_class: Option<String>,
    /// MPC uncertainty parameter, 0 (best) to 9.
    pub uncertainty: Option<String>,
    pub data_arc_days: Option<f64>,
    pub epoch_osculation: Option<String>,
}

impl OrbitDetails {
    pub fn perihelion_au(&self, elements: &OrbitalElements) -> f64 {
        positive(self.perihelion_au).unwrap_or_else(|| elements.perihelion_au())
    }

    pub fn aphelion_au(&self, elements: &OrbitalElements) -> f64 {
        positive(self.aphelion_au).unwrap_or_else(|| elements.aphelion_au())
    }

    pub fn period_days(&self, elements: &OrbitalElements) -> f64 {
        positive(self.period_days).unwrap_or_else(|| elements.period_days())
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Sampled orbit: `segments + 1` points covering one revolution.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    points: Vec<DVec3>,
    scale: f64,
}

impl OrbitPath {
    /// All sampled points, periapsis first.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Number of points (segments + 1).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a path produced by [`sample_orbit`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments the path was sampled with.
    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Linear scale factor (render units per AU) the path was built with.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Point at a fractional animation index: wrapped modulo the length,
    /// then floored.
    pub fn point_at(&self, index: f64) -> Option<DVec3> {
        if self.points.is_empty() || !index.is_finite() {
            return None;
        }
        let wrapped = index.rem_euclid(self.points.len() as f64);
        let i = (wrapped.floor() as usize).min(self.points.len() - 1);
        Some(self.points[i])
    }
}

/// Sample an orbit ellipse.
///
/// # Arguments
/// * `elements` - Orbital elements (validated on construction)
/// * `scale` - Linear scale applied to the semi-major axis, > 0
/// * `segments` - Number of segments, ≥ 1; the result has `segments + 1` points
pub fn sample_orbit(
    elements: &OrbitalElements,
    scale: f64,
    segments: usize,
) -> Result<OrbitPath, OrbitError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OrbitError::InvalidScale(scale));
    }
    if segments == 0 {
        return Err(OrbitError::InvalidSegments);
    }
    // Elements built through a struct literal skip validation.
    let e = elements.eccentricity;
    if !e.is_finite() || !(0.0..1.0).contains(&e) {
        return Err(OrbitError::InvalidEccentricity(e));
    }
    let a = elements.semi_major_axis_au;
    if !a.is_finite() || a <= 0.0 {
        return Err(OrbitError::InvalidSemiMajorAxis(a));
    }

    let p = elements.semi_latus_rectum(scale);
    let (sin_i, cos_i) = (elements.inclination_deg * DEG_TO_RAD).sin_cos();

    let points = (0..=segments)
        .map(|k| {
            let theta = (k as f64 / segments as f64) * std::f64::consts::TAU;
            let (sin_t, cos_t) = theta.sin_cos();
            let r = p / (1.0 + e * cos_t);

            let x = r * cos_t;
            let z = r * sin_t;
            DVec3::new(x, z * sin_i, z * cos_i)
        })
        .collect();

    Ok(OrbitPath { points, scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn elements(a: f64, e: f64, i: f64) -> OrbitalElements {
        OrbitalElements::new(a, e, i).expect("valid elements")
    }

    #[test]
    fn test_point_count() {
        let path = sample_orbit(&elements(1.5, 0.1, 10.0), 40.0, 128).unwrap();
        assert_eq!(path.len(), 129);
        assert_eq!(path.segments(), 128);

        let single = sample_orbit(&elements(1.0, 0.0, 0.0), 1.0, 1).unwrap();
        assert_eq!(single.len(), 2);
    }

    #[test]
    fn test_orbit_closes() {
        let path = sample_orbit(&elements(2.2, 0.6, 33.0), 10.0, 64).unwrap();
        let first = path.points()[0];
        let last = *path.points().last().unwrap();
        assert!(
            first.distance(last) < 1e-9,
            "first {first:?} and last {last:?} should coincide"
        );
    }

    #[test]
    fn test_first_point_is_periapsis() {
        let el = elements(2.0, 0.5, 0.0);
        let path = sample_orbit(&el, 1.0, 32).unwrap();
        // θ = 0 sits on +x at r = a(1 − e)
        assert_relative_eq!(path.points()[0].x, el.perihelion_au(), epsilon = 1e-12);
        assert_relative_eq!(path.points()[0].z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circle_radius() {
        let path = sample_orbit(&elements(1.3, 0.0, 0.0), 5.0, 48).unwrap();
        for p in path.points() {
            assert_relative_eq!(p.length(), 6.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_inclination_is_planar() {
        let path = sample_orbit(&elements(1.1, 0.3, 0.0), 3.0, 40).unwrap();
        assert!(path.points().iter().all(|p| p.y.abs() < 1e-12));
    }

    #[test]
    fn test_inclination_tilts_about_x() {
        let path = sample_orbit(&elements(1.0, 0.0, 90.0), 1.0, 4).unwrap();
        // θ = π/2 lands on +y once tilted by 90°
        let quarter = path.points()[1];
        assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-12);
        assert!(quarter.z.abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let el = elements(1.0, 0.2, 0.0);
        assert_eq!(
            sample_orbit(&el, 0.0, 16),
            Err(OrbitError::InvalidScale(0.0))
        );
        assert_eq!(sample_orbit(&el, 1.0, 0), Err(OrbitError::InvalidSegments));

        let open = OrbitalElements {
            eccentricity: 1.0,
            ..el
        };
        assert_eq!(
            sample_orbit(&open, 1.0, 16),
            Err(OrbitError::InvalidEccentricity(1.0))
        );
        assert!(OrbitalElements::new(-1.0, 0.0, 0.0).is_err());
        assert!(OrbitalElements::new(1.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_sanitized_defaults() {
        let el = OrbitalElements::sanitized(None, Some(f64::NAN), Some(f64::INFINITY));
        assert_eq!(el, OrbitalElements::default());

        let el = OrbitalElements::sanitized(Some(-3.0), Some(1.2), Some(12.0));
        assert_eq!(el.semi_major_axis_au, 1.0);
        assert_eq!(el.eccentricity, 0.0);
        assert_eq!(el.inclination_deg, 12.0);
    }

    #[test]
    fn test_orbit_summary() {
        let el = elements(1.0, 0.2, 0.0);
        assert_relative_eq!(el.perihelion_au(), 0.8, max_relative = 1e-12);
        assert_relative_eq!(el.aphelion_au(), 1.2, max_relative = 1e-12);
        assert_relative_eq!(el.period_days(), 365.25);
        assert_relative_eq!(elements(4.0, 0.0, 0.0).period_days(), 365.25 * 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_published_details_take_precedence() {
        let el = elements(1.0, 0.2, 0.0);
        let details = OrbitDetails {
            perihelion_au: Some(0.79),
            period_days: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(details.perihelion_au(&el), 0.79);
        assert_relative_eq!(details.aphelion_au(&el), 1.2, max_relative = 1e-12);
        assert_relative_eq!(details.period_days(&el), 365.25);
    }

    #[test]
    fn test_point_at_wraps_and_floors() {
        let path = sample_orbit(&elements(1.0, 0.0, 0.0), 1.0, 4).unwrap();
        assert_eq!(path.point_at(1.9), Some(path.points()[1]));
        assert_eq!(path.point_at(5.2), Some(path.points()[0]));
        assert_eq!(path.point_at(f64::NAN), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_closed_and_counted(
            a in 0.3f64..5.0,
            e in 0.0f64..0.95,
            i in -180.0f64..180.0,
            scale in 0.1f64..100.0,
            segments in 1usize..512,
        ) {
            let path = sample_orbit(&elements(a, e, i), scale, segments).unwrap();
            prop_assert_eq!(path.len(), segments + 1);

            let first = path.points()[0];
            let last = path.points()[segments];
            let tolerance = 1e-9 * a * scale / (1.0 - e);
            prop_assert!(first.distance(last) <= tolerance);
        }

        #[test]
        fn prop_circle_before_tilt(
            a in 0.3f64..5.0,
            i in -90.0f64..90.0,
            scale in 0.1f64..100.0,
        ) {
            let path = sample_orbit(&elements(a, 0.0, i), scale, 64).unwrap();
            // Rotation about x preserves length, so |p| equals the in-plane radius
            for p in path.points() {
                prop_assert!((p.length() - a * scale).abs() < 1e-9 * a * scale);
            }
        }
    }
}
