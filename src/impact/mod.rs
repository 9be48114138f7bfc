//! Impact energy estimation for near-Earth objects.
//!
//! The pipeline is a chain of small total functions:
//! - [`size`]: resolve a diameter from partial observations
//! - [`approach`]: pick a representative close-approach velocity
//! - [`compute_energy_mt`]: kinetic energy of a uniform sphere, in Mt TNT
//! - [`severity`]: map energy (and the PHA flag) onto discrete tiers
//! - [`assessment`]: bundle everything a display needs for one body

pub mod approach;
pub mod assessment;
pub mod severity;
pub mod size;

#[cfg(test)]
mod proptest_impact;

use serde::{Deserialize, Serialize};

use crate::types::{joules_to_megatons, km_to_m};

pub use approach::{ApproachRecord, pick_velocity_km_s};
pub use assessment::{BodyAssessment, ImpactModel};
pub use severity::{DangerAssessment, DangerLevel, EnergyClass, HazardTier};
pub use size::{DiameterConvention, SizeEstimate, estimate_diameter_km};

/// Bulk density of a generic rocky/icy mix (kg/m³).
pub const DENSITY_ROCKY_ICY: f64 = 2500.0;

/// Bulk density of a denser, rocky body (kg/m³).
pub const DENSITY_DENSE_ROCK: f64 = 3000.0;

/// Density assumption used for mass estimation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DensityPreset {
    /// 2500 kg/m³.
    #[default]
    RockyIcy,
    /// 3000 kg/m³.
    DenseRock,
    /// Any other density in kg/m³.
    Custom(f64),
}

impl DensityPreset {
    /// Density in kg/m³.
    pub fn kg_per_m3(self) -> f64 {
        match self {
            DensityPreset::RockyIcy => DENSITY_ROCKY_ICY,
            DensityPreset::DenseRock => DENSITY_DENSE_ROCK,
            DensityPreset::Custom(density) => density,
        }
    }
}

/// Kinetic impact energy together with the inputs it was derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEnergyResult {
    /// Kinetic energy in megatons of TNT.
    pub energy_mt: f64,
    /// Diameter actually used (km).
    pub diameter_km: f64,
    /// Velocity actually used (km/s).
    pub velocity_km_s: f64,
}

/// Mass of a uniform sphere in kg.
pub fn sphere_mass_kg(diameter_km: f64, density_kg_m3: f64) -> f64 {
    let radius_m = km_to_m(diameter_km) / 2.0;
    let volume_m3 = (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3);
    density_kg_m3 * volume_m3
}

/// Kinetic energy of a spherical impactor in megatons of TNT.
///
/// E = ½·ρ·(4/3)πr³·v², with r = d/2 and everything in SI before conversion.
///
/// Returns `None` when there is no positive velocity to attribute energy to;
/// a missing velocity is never treated as zero energy. Non-positive diameter
/// or density are refused the same way.
pub fn compute_energy_mt(
    diameter_km: f64,
    velocity_km_s: f64,
    density_kg_m3: f64,
) -> Option<ImpactEnergyResult> {
    if !velocity_km_s.is_finite() || velocity_km_s <= 0.0 {
        return None;
    }
    if !diameter_km.is_finite() || diameter_km <= 0.0 {
        return None;
    }
    if !density_kg_m3.is_finite() || density_kg_m3 <= 0.0 {
        return None;
    }

    let mass_kg = sphere_mass_kg(diameter_km, density_kg_m3);
    let velocity_m_s = km_to_m(velocity_km_s);
    let energy_j = 0.5 * mass_kg * velocity_m_s * velocity_m_s;

    Some(ImpactEnergyResult {
        energy_mt: joules_to_megatons(energy_j),
        diameter_km,
        velocity_km_s,
    })
}
