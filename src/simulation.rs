//! Simulation plugin: drives the position animator and evaluates impacts.
//!
//! The animator advances on the fixed timestep so the tick-based rates
//! (orbit step, impact step, transition length) do not depend on frame rate.
//! UI and input talk to it only through request messages.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::animator::{AnimatorEvent, PositionAnimator};
use crate::body::{BodyId, BodySource};
use crate::catalog::{CatalogFilter, ViewMode};
use crate::config::ImpactConfig;
use crate::impact::BodyAssessment;
use crate::neo::{ManualForm, seed_from_manual};

/// Animation ticks per second.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Select a body for impact simulation.
#[derive(Message, Clone, Copy, Debug)]
pub struct StartImpact(pub BodyId);

/// Cancel a simulation and re-arm the single-flight guard.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetSimulation;

/// Pause or resume orbital motion.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct TogglePause;

/// Add a hand-entered body, select it and simulate its impact.
#[derive(Message, Clone, Debug)]
pub struct SubmitManual(pub ManualForm);

/// A body reached the impact target.
#[derive(Message, Clone, Debug)]
pub struct ImpactCompleted {
    pub id: BodyId,
    pub position: DVec3,
    /// Where the flight began; the body came in from this side.
    pub start: DVec3,
    pub assessment: BodyAssessment,
}

/// Result of the last completed impact.
#[derive(Clone, Debug)]
pub struct ImpactReport {
    pub id: BodyId,
    pub name: String,
    pub assessment: BodyAssessment,
}

/// Outcome of the current simulation; cleared on reset.
#[derive(Resource, Default, Debug)]
pub struct ImpactOutcome {
    pub last: Option<ImpactReport>,
}

impl ImpactOutcome {
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Running count used to name unnamed manual bodies.
#[derive(Resource, Default, Debug)]
pub struct ManualCounter(pub u32);

/// Ordering of the per-frame request handling.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Requests,
    Outcome,
}

/// Plugin owning the animator and the impact state machine wiring.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ImpactConfig>()
            .init_resource::<CatalogFilter>()
            .init_resource::<ImpactOutcome>()
            .init_resource::<ManualCounter>()
            .insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
            .add_message::<StartImpact>()
            .add_message::<ResetSimulation>()
            .add_message::<TogglePause>()
            .add_message::<SubmitManual>()
            .add_message::<ImpactCompleted>()
            .configure_sets(Update, (SimulationSet::Requests, SimulationSet::Outcome).chain())
            .add_systems(Startup, init_animator)
            .add_systems(
                Update,
                (handle_manual_submissions, handle_simulation_requests)
                    .chain()
                    .in_set(SimulationSet::Requests),
            )
            .add_systems(FixedUpdate, tick_animator)
            .add_systems(Update, record_impact_outcome.in_set(SimulationSet::Outcome));
    }
}

/// Build the animator from the configuration, unless one was inserted already.
fn init_animator(
    mut commands: Commands,
    config: Res<ImpactConfig>,
    existing: Option<Res<PositionAnimator>>,
) {
    if existing.is_none() {
        commands.insert_resource(PositionAnimator::new(config.animator_settings()));
    }
}

/// Ingest submitted what-if forms.
fn handle_manual_submissions(
    mut submissions: MessageReader<SubmitManual>,
    mut animator: ResMut<PositionAnimator>,
    mut counter: ResMut<ManualCounter>,
    mut filter: ResMut<CatalogFilter>,
    mut outcome: ResMut<ImpactOutcome>,
    config: Res<ImpactConfig>,
) {
    for SubmitManual(form) in submissions.read() {
        counter.0 += 1;
        let entry = form.parse(counter.0);
        let seed = seed_from_manual(&entry, &config.impact_model());
        let id = match animator.add_body(seed) {
            Ok(id) => id,
            Err(err) => {
                warn!("Manual body {} rejected: {}", entry.name, err);
                continue;
            }
        };
        info!("Added manual body {}", entry.name);
        filter.selected = Some(id);
        if !filter.view_mode.includes(BodySource::Manual) {
            filter.view_mode = ViewMode::All;
        }

        if animator.begin_simulation(id) {
            outcome.clear();
        } else {
            info!("Simulation already active; {} not launched", entry.name);
        }
    }
}

fn handle_simulation_requests(
    mut starts: MessageReader<StartImpact>,
    mut resets: MessageReader<ResetSimulation>,
    mut pauses: MessageReader<TogglePause>,
    mut animator: ResMut<PositionAnimator>,
    mut outcome: ResMut<ImpactOutcome>,
) {
    if resets.read().count() > 0 {
        animator.reset();
        outcome.clear();
    }
    if pauses.read().count() % 2 == 1 {
        animator.toggle_pause();
    }
    for StartImpact(id) in starts.read() {
        if animator.begin_simulation(*id) {
            outcome.clear();
        } else {
            debug!("Impact request for {:?} ignored in {:?}", id, animator.phase());
        }
    }
}

/// One animation tick.
fn tick_animator(
    animator: Option<ResMut<PositionAnimator>>,
    config: Res<ImpactConfig>,
    mut completed: MessageWriter<ImpactCompleted>,
) {
    let Some(mut animator) = animator else {
        return;
    };
    for event in animator.tick() {
        let AnimatorEvent::ImpactCompleted { id, position } = event else {
            continue;
        };
        let Some(body) = animator.body(id) else {
            continue;
        };
        let start = body.impact.map_or(position, |impact| impact.start);
        let assessment = config.impact_model().assess(&body.profile);
        completed.write(ImpactCompleted {
            id,
            position,
            start,
            assessment,
        });
    }
}

/// Store the outcome of a completed impact. Runs once per completion.
fn record_impact_outcome(
    mut completed: MessageReader<ImpactCompleted>,
    animator: Res<PositionAnimator>,
    mut outcome: ResMut<ImpactOutcome>,
) {
    for event in completed.read() {
        let name = animator
            .body(event.id)
            .map(|b| b.name.clone())
            .unwrap_or_default();
        info!(
            "Impact of {}: {} ({})",
            name,
            event.assessment.energy_text(),
            event.assessment.danger_text()
        );
        outcome.last = Some(ImpactReport {
            id: event.id,
            name,
            assessment: event.assessment.clone(),
        });
    }
}
