//! Severity classification of impact energy.
//!
//! Two independent schemes are provided:
//! - [`HazardTier`]: 3 tiers from energy alone (or from the PHA flag)
//! - [`EnergyClass`] crossed with the PHA flag into a [`DangerLevel`]
//!
//! Band edges are policy, not physics. Keep them exact.

/// Energy at or above which the 3-tier scheme reports [`HazardTier::High`] (Mt).
pub const TIER_HIGH_MT: f64 = 100.0;
/// Energy at or above which the 3-tier scheme reports [`HazardTier::Medium`] (Mt).
pub const TIER_MEDIUM_MT: f64 = 1.0;

/// Lower edge of [`EnergyClass::Catastrophic`] (Mt).
pub const CLASS_CATASTROPHIC_MT: f64 = 1000.0;
/// Lower edge of [`EnergyClass::Severe`] (Mt).
pub const CLASS_SEVERE_MT: f64 = 10.0;
/// Lower edge of [`EnergyClass::Significant`] (Mt).
pub const CLASS_SIGNIFICANT_MT: f64 = 0.1;

/// 3-level hazard tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HazardTier {
    Low,
    Medium,
    High,
}

impl HazardTier {
    pub fn label(self) -> &'static str {
        match self {
            HazardTier::Low => "LOW",
            HazardTier::Medium => "MEDIUM",
            HazardTier::High => "HIGH",
        }
    }
}

/// Energy-only tier: HIGH ≥ 100 Mt, MEDIUM ≥ 1 Mt, else LOW.
pub fn tier_from_energy_mt(energy_mt: f64) -> HazardTier {
    if energy_mt >= TIER_HIGH_MT {
        HazardTier::High
    } else if energy_mt >= TIER_MEDIUM_MT {
        HazardTier::Medium
    } else {
        HazardTier::Low
    }
}

/// Flag-style tier: potentially hazardous objects are HIGH, everything else LOW.
pub fn tier_from_hazard_flag(is_pha: bool) -> HazardTier {
    if is_pha {
        HazardTier::High
    } else {
        HazardTier::Low
    }
}

/// 4-band energy class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnergyClass {
    Minimal,
    Significant,
    Severe,
    Catastrophic,
}

impl EnergyClass {
    pub fn label(self) -> &'static str {
        match self {
            EnergyClass::Minimal => "Minimal",
            EnergyClass::Significant => "Significant",
            EnergyClass::Severe => "Severe",
            EnergyClass::Catastrophic => "Catastrophic",
        }
    }

    /// Display colour as sRGB bytes.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            EnergyClass::Minimal => [0x4c, 0xaf, 0x50],
            EnergyClass::Significant => [0xff, 0xc1, 0x07],
            EnergyClass::Severe => [0xff, 0x98, 0x00],
            EnergyClass::Catastrophic => [0xf4, 0x43, 0x36],
        }
    }

    /// Whether displays should emphasize this class with a glow.
    pub fn glows(self) -> bool {
        self >= EnergyClass::Severe
    }

    /// Relative size multiplier for impact effects.
    pub fn effect_scale(self) -> f32 {
        match self {
            EnergyClass::Minimal => 0.6,
            EnergyClass::Significant => 1.0,
            EnergyClass::Severe => 1.6,
            EnergyClass::Catastrophic => 2.5,
        }
    }
}

/// Classify energy into one of the four bands.
pub fn classify_energy_mt(energy_mt: f64) -> EnergyClass {
    if energy_mt >= CLASS_CATASTROPHIC_MT {
        EnergyClass::Catastrophic
    } else if energy_mt >= CLASS_SEVERE_MT {
        EnergyClass::Severe
    } else if energy_mt >= CLASS_SIGNIFICANT_MT {
        EnergyClass::Significant
    } else {
        EnergyClass::Minimal
    }
}

/// Combined 4-level danger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DangerLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl DangerLevel {
    /// Level name as shown in the readout.
    pub fn label(self) -> &'static str {
        match self {
            DangerLevel::Low => "Bajo",
            DangerLevel::Moderate => "Moderado",
            DangerLevel::High => "Alto",
            DangerLevel::Extreme => "Extremo",
        }
    }
}

/// Energy class crossed with the hazard flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DangerAssessment {
    pub energy_class: EnergyClass,
    pub level: DangerLevel,
    pub description: &'static str,
}

/// Fixed lookup of class × PHA flag.
pub fn danger_for_class(energy_class: EnergyClass, is_pha: bool) -> DangerAssessment {
    let (level, description) = match (energy_class, is_pha) {
        (EnergyClass::Catastrophic, _) => (DangerLevel::Extreme, "global effects"),
        (EnergyClass::Severe, true) => (DangerLevel::High, "severe regional risk"),
        (EnergyClass::Severe, false) => (DangerLevel::Moderate, "relevant regional risk"),
        (EnergyClass::Significant, true) => (DangerLevel::Moderate, "probable city damage"),
        (EnergyClass::Significant, false) => (DangerLevel::Low, "possible city damage"),
        (EnergyClass::Minimal, _) => (DangerLevel::Low, "local airburst/minor damage"),
    };
    DangerAssessment {
        energy_class,
        level,
        description,
    }
}

/// Classify `energy_mt` and combine it with the PHA flag.
pub fn combine_danger_level(energy_mt: f64, is_pha: bool) -> DangerAssessment {
    danger_for_class(classify_energy_mt(energy_mt), is_pha)
}

/// Qualitative outlook shown next to a 3-tier severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImpactOutlook {
    /// Impact probability in percent.
    pub probability_pct: Option<u8>,
    /// Torino scale value.
    pub torino: Option<u8>,
    pub risk_label: &'static str,
    pub advice: &'static str,
}

/// Outlook for a tier; `None` yields the "not available" outlook.
pub fn impact_outlook(tier: Option<HazardTier>) -> ImpactOutlook {
    match tier {
        Some(HazardTier::Low) => ImpactOutlook {
            probability_pct: Some(1),
            torino: Some(0),
            risk_label: "Low",
            advice: "Safe",
        },
        Some(HazardTier::Medium) => ImpactOutlook {
            probability_pct: Some(55),
            torino: Some(5),
            risk_label: "Medium",
            advice: "Danger. Run.",
        },
        Some(HazardTier::High) => ImpactOutlook {
            probability_pct: Some(90),
            torino: Some(8),
            risk_label: "High",
            advice: "Imminent impact!",
        },
        None => ImpactOutlook {
            probability_pct: None,
            torino: None,
            risk_label: "N/A",
            advice: "Information not available",
        },
    }
}
