//! Body definitions owned by the position animator.
//!
//! A [`Body`] carries everything the animator and the readout need: its
//! orbital elements, the sampled path, the current position and an optional
//! in-flight impact. Renderer entities refer to bodies by [`BodyId`] only.

use bevy::math::DVec3;

use crate::impact::{ApproachRecord, SizeEstimate};
use crate::orbit::{OrbitDetails, OrbitError, OrbitPath, OrbitalElements, sample_orbit};

/// Stable identifier of a body inside the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Where a body came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodySource {
    #[default]
    Feed,
    Manual,
}

impl BodySource {
    pub fn label(self) -> &'static str {
        match self {
            BodySource::Feed => "feed",
            BodySource::Manual => "manual",
        }
    }
}

/// Observational inputs of the impact pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyProfile {
    pub diam_min_km: Option<f64>,
    pub diam_max_km: Option<f64>,
    pub absolute_magnitude_h: Option<f64>,
    pub approaches: Vec<ApproachRecord>,
    pub is_potentially_hazardous: bool,
    /// Velocity entered by hand; skips approach selection when set.
    pub manual_velocity_km_s: Option<f64>,
}

/// Straight-line flight from the last orbital position to the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactState {
    pub start: DVec3,
    pub target: DVec3,
    /// Fraction of the flight covered, in [0, 1].
    pub progress: f64,
    pub done: bool,
}

impl ImpactState {
    /// Flight from `start` to the origin.
    pub fn toward_origin(start: DVec3) -> Self {
        Self {
            start,
            target: DVec3::ZERO,
            progress: 0.0,
            done: false,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.start.lerp(self.target, self.progress)
    }
}

/// Everything needed to add a body to the animator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodySeed {
    pub name: String,
    pub elements: OrbitalElements,
    pub details: OrbitDetails,
    pub size: SizeEstimate,
    pub profile: BodyProfile,
    pub source: BodySource,
}

/// An asteroid or other small body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub elements: OrbitalElements,
    pub details: OrbitDetails,
    pub size: SizeEstimate,
    /// Sampled orbit; `None` until a path has been built.
    pub path: Option<OrbitPath>,
    /// Fractional index into `path`.
    pub path_index: f64,
    /// Current position in render units; `None` until first placed.
    pub position: Option<DVec3>,
    pub impact: Option<ImpactState>,
    pub profile: BodyProfile,
    pub source: BodySource,
}

impl Body {
    /// Body without a path yet. It is skipped by the animator until
    /// [`Body::set_elements`] or [`Body::rebuild_path`] succeeds.
    pub fn pending(id: BodyId, seed: BodySeed) -> Self {
        Self {
            id,
            name: seed.name,
            elements: seed.elements,
            details: seed.details,
            size: seed.size,
            path: None,
            path_index: 0.0,
            position: None,
            impact: None,
            profile: seed.profile,
            source: seed.source,
        }
    }

    /// Body placed at the start of its freshly sampled orbit.
    pub fn new(id: BodyId, seed: BodySeed, scale: f64, segments: usize) -> Result<Self, OrbitError> {
        let mut body = Self::pending(id, seed);
        body.rebuild_path(scale, segments)?;
        Ok(body)
    }

    /// Sample a new path from the current elements.
    ///
    /// The old path is replaced, never patched. The index is kept when it is
    /// still in range so the body does not jump.
    pub fn rebuild_path(&mut self, scale: f64, segments: usize) -> Result<(), OrbitError> {
        let path = sample_orbit(&self.elements, scale, segments)?;
        if self.path_index >= path.len() as f64 {
            self.path_index = 0.0;
        }
        if self.impact.is_none() {
            self.position = path.point_at(self.path_index);
        }
        self.path = Some(path);
        Ok(())
    }

    /// Replace the orbital elements and resample.
    pub fn set_elements(
        &mut self,
        elements: OrbitalElements,
        scale: f64,
        segments: usize,
    ) -> Result<(), OrbitError> {
        self.elements = elements;
        self.rebuild_path(scale, segments)
    }

    /// Orbital point at the current index.
    pub fn orbital_position(&self) -> Option<DVec3> {
        self.path.as_ref()?.point_at(self.path_index)
    }
}
