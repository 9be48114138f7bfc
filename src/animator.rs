//! Orbital position animator.
//!
//! Single owner of every [`Body`]. Each tick advances orbiting bodies along
//! their sampled paths and, for at most one body at a time, plays the
//! straight-line flight to the impact target.
//!
//! ```text
//! Orbit ──begin_simulation──▶ Transitioning ──N ticks──▶ Impact ──progress=1──▶ Orbit
//!   ▲ │
//!   │ └──pause──▶ Paused
//!   └────resume────┘
//! ```
//!
//! The single-flight guard ([`PositionAnimator::is_simulated`]) is armed by
//! `begin_simulation` and only released by [`PositionAnimator::reset`].

use bevy::log::{debug, info};
use bevy::math::DVec3;
use bevy::prelude::Resource;

use crate::body::{Body, BodyId, BodySeed, BodySource, ImpactState};
use crate::orbit::{DEFAULT_SEGMENTS, OrbitError, OrbitalElements};

/// Progress at or above which the flight counts as finished.
const IMPACT_DONE_EPSILON: f64 = 1e-9;

/// Tick-based animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorSettings {
    /// Path points advanced per tick while orbiting.
    pub orbit_step: f64,
    /// Impact progress added per tick.
    pub impact_step: f64,
    /// Ticks spent in [`AnimatorPhase::Transitioning`].
    pub transition_ticks: u32,
    /// Render units per AU.
    pub orbit_scale: f64,
    pub segments: usize,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            orbit_step: 0.2,
            impact_step: 0.005,
            transition_ticks: 100,
            orbit_scale: 40.0,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Animator state machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimatorPhase {
    #[default]
    Orbit,
    /// Camera moving toward the active body; the body is frozen.
    Transitioning { elapsed: u32 },
    /// Active body flying toward the target.
    Impact,
    /// All motion frozen.
    Paused,
}

impl AnimatorPhase {
    pub fn label(self) -> &'static str {
        match self {
            AnimatorPhase::Orbit => "Orbit",
            AnimatorPhase::Transitioning { .. } => "Transitioning",
            AnimatorPhase::Impact => "Impact",
            AnimatorPhase::Paused => "Paused",
        }
    }
}

/// Notable transitions produced by [`PositionAnimator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorEvent {
    /// Transition finished, the flight has begun.
    ImpactStarted { id: BodyId, start: DVec3 },
    /// Flight reached the target. Emitted exactly once per simulation.
    ImpactCompleted { id: BodyId, position: DVec3 },
}

/// Owner of all bodies and of the impact state machine.
#[derive(Resource, Debug, Default)]
pub struct PositionAnimator {
    bodies: Vec<Body>,
    next_id: u32,
    phase: AnimatorPhase,
    active: Option<BodyId>,
    settings: AnimatorSettings,
}

impl PositionAnimator {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    /// Body currently selected for (or finished with) an impact simulation.
    pub fn active(&self) -> Option<BodyId> {
        self.active
    }

    /// Single-flight guard.
    pub fn is_simulated(&self) -> bool {
        self.active.is_some()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn allocate_id(&mut self) -> BodyId {
        self.next_id += 1;
        BodyId(self.next_id)
    }

    /// Add a body with a freshly sampled path.
    pub fn add_body(&mut self, seed: BodySeed) -> Result<BodyId, OrbitError> {
        let id = self.allocate_id();
        let body = Body::new(id, seed, self.settings.orbit_scale, self.settings.segments)?;
        debug!("Added body {} ({:?})", body.name, id);
        self.bodies.push(body);
        Ok(id)
    }

    /// Add a body whose path is built later. The animator skips it until then.
    pub fn add_pending(&mut self, seed: BodySeed) -> BodyId {
        let id = self.allocate_id();
        self.bodies.push(Body::pending(id, seed));
        id
    }

    /// Sample (or resample) the path of one body.
    pub fn build_path(&mut self, id: BodyId) -> Result<bool, OrbitError> {
        let (scale, segments) = (self.settings.orbit_scale, self.settings.segments);
        match self.body_mut(id) {
            Some(body) => body.rebuild_path(scale, segments).map(|_| true),
            None => Ok(false),
        }
    }

    /// Replace a body's elements; the path is rebuilt, never patched.
    pub fn set_elements(&mut self, id: BodyId, elements: OrbitalElements) -> Result<bool, OrbitError> {
        let (scale, segments) = (self.settings.orbit_scale, self.settings.segments);
        match self.body_mut(id) {
            Some(body) => body.set_elements(elements, scale, segments).map(|_| true),
            None => Ok(false),
        }
    }

    /// Change the orbit scale and resample every path.
    ///
    /// Applied as a whole: on error every body keeps its old path.
    pub fn set_orbit_scale(&mut self, scale: f64) -> Result<(), OrbitError> {
        let segments = self.settings.segments;
        let mut rebuilt = self.bodies.clone();
        for body in &mut rebuilt {
            body.rebuild_path(scale, segments)?;
        }
        self.bodies = rebuilt;
        self.settings.orbit_scale = scale;
        Ok(())
    }

    /// Replace every body of `source` with new seeds.
    ///
    /// Applied as a whole: on error nothing changes. A running simulation of a
    /// removed body is reset first.
    pub fn replace_source(
        &mut self,
        source: BodySource,
        seeds: Vec<BodySeed>,
    ) -> Result<Vec<BodyId>, OrbitError> {
        let (scale, segments) = (self.settings.orbit_scale, self.settings.segments);
        let first_id = self.next_id;
        let mut fresh = Vec::with_capacity(seeds.len());
        for (offset, seed) in seeds.into_iter().enumerate() {
            let id = BodyId(first_id + offset as u32 + 1);
            fresh.push(Body::new(id, seed, scale, segments)?);
        }

        if let Some(active) = self.active
            && self.body(active).is_some_and(|b| b.source == source)
        {
            self.reset();
        }

        self.next_id = first_id + fresh.len() as u32;
        self.bodies.retain(|b| b.source != source);
        let ids = fresh.iter().map(|b| b.id).collect();
        self.bodies.extend(fresh);
        Ok(ids)
    }

    /// Remove one body. A running simulation of it is reset first.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        if self.active == Some(id) {
            self.reset();
        }
        let index = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(index))
    }

    /// Select a body for impact simulation.
    ///
    /// Returns `false` (and changes nothing) while another simulation is
    /// active, outside [`AnimatorPhase::Orbit`], or when the body has no
    /// position yet.
    pub fn begin_simulation(&mut self, id: BodyId) -> bool {
        if self.is_simulated() || self.phase != AnimatorPhase::Orbit {
            return false;
        }
        let Some(body) = self.body_mut(id) else {
            return false;
        };
        let Some(start) = body.position else {
            return false;
        };

        body.impact = Some(ImpactState::toward_origin(start));
        info!("Simulating impact of {}", body.name);
        self.active = Some(id);
        self.phase = AnimatorPhase::Transitioning { elapsed: 0 };
        true
    }

    /// Freeze all motion. Only allowed from [`AnimatorPhase::Orbit`].
    pub fn pause(&mut self) -> bool {
        if self.phase != AnimatorPhase::Orbit {
            return false;
        }
        self.phase = AnimatorPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != AnimatorPhase::Paused {
            return false;
        }
        self.phase = AnimatorPhase::Orbit;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    /// Cancel any simulation and re-arm the guard.
    ///
    /// The active body returns to the orbital point at its last index.
    pub fn reset(&mut self) -> bool {
        let Some(id) = self.active.take() else {
            if self.phase == AnimatorPhase::Paused {
                self.phase = AnimatorPhase::Orbit;
            }
            return false;
        };
        if let Some(body) = self.body_mut(id) {
            body.impact = None;
            body.position = body.orbital_position();
            info!("Reset impact simulation of {}", body.name);
        }
        self.phase = AnimatorPhase::Orbit;
        true
    }

    /// Fraction of the camera transition covered, while transitioning.
    pub fn transition_fraction(&self) -> Option<f32> {
        match self.phase {
            AnimatorPhase::Transitioning { elapsed } => {
                let total = self.settings.transition_ticks.max(1);
                Some((elapsed as f32 / total as f32).min(1.0))
            }
            _ => None,
        }
    }

    /// Advance one animation tick.
    pub fn tick(&mut self) -> Vec<AnimatorEvent> {
        let mut events = Vec::new();
        if self.phase == AnimatorPhase::Paused {
            return events;
        }

        self.advance_orbits();

        match self.phase {
            AnimatorPhase::Transitioning { elapsed } => {
                let elapsed = elapsed + 1;
                if elapsed >= self.settings.transition_ticks {
                    self.phase = AnimatorPhase::Impact;
                    if let Some(id) = self.active
                        && let Some(start) = self.body(id).and_then(|b| b.impact).map(|i| i.start)
                    {
                        debug!("Transition finished, flight of {:?} begins", id);
                        events.push(AnimatorEvent::ImpactStarted { id, start });
                    }
                } else {
                    self.phase = AnimatorPhase::Transitioning { elapsed };
                }
            }
            AnimatorPhase::Impact => {
                if let Some(event) = self.advance_impact() {
                    events.push(event);
                }
            }
            AnimatorPhase::Orbit | AnimatorPhase::Paused => {}
        }

        events
    }

    /// Move every free body one step along its path.
    fn advance_orbits(&mut self) {
        let step = self.settings.orbit_step;
        for body in self.bodies.iter_mut().filter(|b| b.impact.is_none()) {
            let Some(path) = &body.path else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            body.path_index = (body.path_index + step).rem_euclid(path.len() as f64);
            body.position = path.point_at(body.path_index);
        }
    }

    fn advance_impact(&mut self) -> Option<AnimatorEvent> {
        let step = self.settings.impact_step;
        let Some(id) = self.active else {
            // Nothing in flight.
            self.phase = AnimatorPhase::Orbit;
            return None;
        };
        let Some(body) = self.body_mut(id) else {
            self.active = None;
            self.phase = AnimatorPhase::Orbit;
            return None;
        };
        let Some(impact) = body.impact.as_mut() else {
            self.phase = AnimatorPhase::Orbit;
            return None;
        };
        if impact.done {
            self.phase = AnimatorPhase::Orbit;
            return None;
        }

        impact.progress += step;
        let finished = impact.progress >= 1.0 - IMPACT_DONE_EPSILON;
        if finished {
            impact.progress = 1.0;
            impact.done = true;
        }
        let position = impact.position();
        body.position = Some(position);

        if finished {
            info!("{} reached the impact site", body.name);
            self.phase = AnimatorPhase::Orbit;
            Some(AnimatorEvent::ImpactCompleted { id, position })
        } else {
            None
        }
    }
}
