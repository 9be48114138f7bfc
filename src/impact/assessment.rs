//! Display-ready derived fields for one body.

use super::approach::{DEFAULT_PREFERRED_BODY, pick_velocity_km_s};
use super::severity::{
    DangerAssessment, EnergyClass, HazardTier, combine_danger_level, tier_from_energy_mt,
};
use super::size::{DEFAULT_ALBEDO, DiameterConvention, SizeEstimate};
use super::{DensityPreset, ImpactEnergyResult, compute_energy_mt};
use crate::body::BodyProfile;

/// Placeholder shown for values that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Model assumptions shared by every assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpactModel {
    pub density: DensityPreset,
    pub convention: DiameterConvention,
    pub albedo: f64,
    pub preferred_body: String,
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self {
            density: DensityPreset::default(),
            convention: DiameterConvention::default(),
            albedo: DEFAULT_ALBEDO,
            preferred_body: DEFAULT_PREFERRED_BODY.to_string(),
        }
    }
}

impl ImpactModel {
    /// Size estimate for a profile under this model's convention.
    pub fn size_of(&self, profile: &BodyProfile) -> SizeEstimate {
        SizeEstimate::resolve(
            self.convention,
            profile.diam_min_km,
            profile.diam_max_km,
            profile.absolute_magnitude_h,
            self.albedo,
        )
    }

    /// Representative velocity: a manual velocity wins over approach selection.
    pub fn velocity_of(&self, profile: &BodyProfile) -> Option<f64> {
        match profile.manual_velocity_km_s {
            Some(v) if v.is_finite() => Some(v),
            _ => pick_velocity_km_s(&profile.approaches, &self.preferred_body),
        }
    }

    /// Run the whole pipeline for one body.
    pub fn assess(&self, profile: &BodyProfile) -> BodyAssessment {
        let diameter_km = self.size_of(profile).diameter_km;
        let velocity_km_s = self.velocity_of(profile);
        let energy = velocity_km_s
            .and_then(|v| compute_energy_mt(diameter_km, v, self.density.kg_per_m3()));

        BodyAssessment {
            diameter_km,
            velocity_km_s,
            energy,
            hazard_tier: energy.map(|e| tier_from_energy_mt(e.energy_mt)),
            danger: energy.map(|e| combine_danger_level(e.energy_mt, profile.is_potentially_hazardous)),
            is_pha: profile.is_potentially_hazardous,
        }
    }
}

/// Derived readout for one body.
///
/// Fields that need a velocity are `None` when none is known; displays must
/// render those as [`NOT_AVAILABLE`], never as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyAssessment {
    pub diameter_km: f64,
    pub velocity_km_s: Option<f64>,
    pub energy: Option<ImpactEnergyResult>,
    pub hazard_tier: Option<HazardTier>,
    pub danger: Option<DangerAssessment>,
    pub is_pha: bool,
}

impl BodyAssessment {
    pub fn energy_mt(&self) -> Option<f64> {
        self.energy.map(|e| e.energy_mt)
    }

    pub fn energy_class(&self) -> Option<EnergyClass> {
        self.danger.map(|d| d.energy_class)
    }

    pub fn energy_text(&self) -> String {
        self.energy_mt()
            .map(format_megatons)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn velocity_text(&self) -> String {
        self.velocity_km_s
            .map(|v| format!("{v:.2} km/s"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn diameter_text(&self) -> String {
        format!("{:.3} km", self.diameter_km)
    }

    pub fn tier_text(&self) -> &'static str {
        self.hazard_tier.map_or(NOT_AVAILABLE, HazardTier::label)
    }

    pub fn danger_text(&self) -> &'static str {
        self.danger.map_or(NOT_AVAILABLE, |d| d.level.label())
    }
}

/// Human-readable megatons with precision suited to the magnitude.
pub fn format_megatons(energy_mt: f64) -> String {
    if energy_mt >= 1000.0 {
        format!("{energy_mt:.0} Mt")
    } else if energy_mt >= 1.0 {
        format!("{energy_mt:.2} Mt")
    } else {
        format!("{:.1} kt", energy_mt * 1000.0)
    }
}
