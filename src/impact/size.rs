//! Diameter estimation from incomplete observations.
//!
//! Resolution order, first usable rule wins:
//! 1. both bounds positive → mean of the bounds (geometric by default)
//! 2. only the minimum positive → minimum
//! 3. only the maximum positive → maximum
//! 4. absolute magnitude H → D = 1329 / √albedo · 10^(−H/5)
//! 5. otherwise → [`FALLBACK_DIAMETER_KM`]

use serde::{Deserialize, Serialize};

/// Diameter used when no input is usable (km).
pub const FALLBACK_DIAMETER_KM: f64 = 0.05;

/// Default geometric albedo for the magnitude-based estimate.
pub const DEFAULT_ALBEDO: f64 = 0.14;

/// Photometric constant of the H/albedo diameter relation (km).
const PHOTOMETRIC_CONSTANT_KM: f64 = 1329.0;

/// How two diameter bounds are merged into one value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiameterConvention {
    /// √(min·max); damps a wide uncertainty band.
    #[default]
    GeometricMean,
    /// (min + max) / 2.
    ArithmeticMean,
}

impl DiameterConvention {
    fn combine(self, min_km: f64, max_km: f64) -> f64 {
        match self {
            DiameterConvention::GeometricMean => (min_km * max_km).sqrt(),
            DiameterConvention::ArithmeticMean => (min_km + max_km) / 2.0,
        }
    }
}

/// Derived, always-positive body diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeEstimate {
    /// Diameter in kilometers.
    pub diameter_km: f64,
}

impl Default for SizeEstimate {
    fn default() -> Self {
        Self {
            diameter_km: FALLBACK_DIAMETER_KM,
        }
    }
}

impl SizeEstimate {
    /// Resolve a size estimate from partial inputs.
    pub fn resolve(
        convention: DiameterConvention,
        diam_min_km: Option<f64>,
        diam_max_km: Option<f64>,
        absolute_magnitude_h: Option<f64>,
        albedo: f64,
    ) -> Self {
        Self {
            diameter_km: estimate_diameter_km_with(
                convention,
                diam_min_km,
                diam_max_km,
                absolute_magnitude_h,
                albedo,
            ),
        }
    }

    /// Radius in kilometers (half the diameter).
    pub fn radius_km(&self) -> f64 {
        self.diameter_km / 2.0
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Diameter (km) from absolute magnitude and albedo.
///
/// `None` when H is not finite or the result is not a positive number.
pub fn diameter_from_magnitude(absolute_magnitude_h: f64, albedo: f64) -> Option<f64> {
    if !absolute_magnitude_h.is_finite() || !albedo.is_finite() || albedo <= 0.0 {
        return None;
    }
    let diameter = PHOTOMETRIC_CONSTANT_KM / albedo.sqrt() * 10f64.powf(-absolute_magnitude_h / 5.0);
    (diameter.is_finite() && diameter > 0.0).then_some(diameter)
}

/// Diameter (km) using the geometric-mean convention.
pub fn estimate_diameter_km(
    diam_min_km: Option<f64>,
    diam_max_km: Option<f64>,
    absolute_magnitude_h: Option<f64>,
    albedo: f64,
) -> f64 {
    estimate_diameter_km_with(
        DiameterConvention::GeometricMean,
        diam_min_km,
        diam_max_km,
        absolute_magnitude_h,
        albedo,
    )
}

/// Diameter (km) using an explicit bound-merging convention.
pub fn estimate_diameter_km_with(
    convention: DiameterConvention,
    diam_min_km: Option<f64>,
    diam_max_km: Option<f64>,
    absolute_magnitude_h: Option<f64>,
    albedo: f64,
) -> f64 {
    match (positive(diam_min_km), positive(diam_max_km)) {
        (Some(min), Some(max)) => convention.combine(min, max),
        (Some(min), None) => min,
        (None, Some(max)) => max,
        (None, None) => absolute_magnitude_h
            .and_then(|h| diameter_from_magnitude(h, albedo))
            .unwrap_or(FALLBACK_DIAMETER_KM),
    }
}
