//! Shared unit constants for orbit and impact computations.

/// Kilometers to meters.
pub const KM_TO_M: f64 = 1000.0;

/// Degrees to radians conversion factor.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Energy of one megaton of TNT in joules.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Days in a Julian year, used for Kepler's third law in AU/year units.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Convert a length in kilometers to meters.
pub fn km_to_m(km: f64) -> f64 {
    km * KM_TO_M
}

/// Convert joules to megatons of TNT.
pub fn joules_to_megatons(joules: f64) -> f64 {
    joules / JOULES_PER_MEGATON
}
