//! Visual effects for completed impacts.
//!
//! An impact spawns a shockwave ring, a fog shell and a ring of smoke puffs,
//! all sized by the impact's energy class. Effects live for a fixed number of
//! frames and are cleared on reset.

use bevy::prelude::*;

use super::draw_circle_segments;
use super::scene::EARTH_RADIUS;
use crate::impact::EnergyClass;
use crate::simulation::{ImpactCompleted, ResetSimulation};

/// Lifetime of an impact effect in frames.
pub const EFFECT_FRAMES: u32 = 180;

/// Kind of effect layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactEffectKind {
    /// Expanding ring along the ground.
    Shockwave,
    /// Dust shell around the impact point.
    Fog,
    /// Puffs drifting outward and upward.
    Smoke,
}

/// Component for animated impact effects.
#[derive(Component, Debug)]
pub struct ImpactEffect {
    pub kind: ImpactEffectKind,
    /// Frames elapsed since spawn.
    pub frame: u32,
    pub lifetime: u32,
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
}

impl ImpactEffect {
    /// Progress through the lifetime, 0 at spawn and 1 when expired.
    pub fn progress(&self) -> f32 {
        (self.frame as f32 / self.lifetime.max(1) as f32).clamp(0.0, 1.0)
    }
}

/// Point on the Earth's surface facing the side a flight came from.
///
/// The flight ends at the Earth's centre, so effects drawn there would sit
/// inside the globe.
pub fn impact_site(target: Vec3, start: Vec3) -> Vec3 {
    target + (start - target).normalize_or(Vec3::Y) * EARTH_RADIUS
}

/// Effect colour for an energy class.
fn class_color(class: Option<EnergyClass>) -> Color {
    match class {
        Some(class) => {
            let [r, g, b] = class.rgb();
            Color::srgb_u8(r, g, b)
        }
        None => Color::srgb(0.8, 0.8, 0.8),
    }
}

/// Spawn effects for each completed impact.
pub(super) fn spawn_impact_effects(
    mut commands: Commands,
    mut events: MessageReader<ImpactCompleted>,
) {
    for event in events.read() {
        let class = event.assessment.energy_class();
        let scale = class.map_or(0.6, EnergyClass::effect_scale);
        let color = class_color(class);
        let position = impact_site(event.position.as_vec3(), event.start.as_vec3());

        for kind in [
            ImpactEffectKind::Shockwave,
            ImpactEffectKind::Fog,
            ImpactEffectKind::Smoke,
        ] {
            commands.spawn(ImpactEffect {
                kind,
                frame: 0,
                lifetime: EFFECT_FRAMES,
                position,
                scale,
                color,
            });
        }
        debug!("Spawned impact effects at {:?} (scale {:.1})", position, scale);
    }
}

/// Advance, draw and expire impact effects.
pub(super) fn animate_impact_effects(
    mut commands: Commands,
    mut effects: Query<(Entity, &mut ImpactEffect)>,
    mut gizmos: Gizmos,
) {
    for (entity, mut effect) in &mut effects {
        effect.frame += 1;
        let progress = effect.progress();
        if progress >= 1.0 {
            commands.entity(entity).despawn();
            continue;
        }

        match effect.kind {
            ImpactEffectKind::Shockwave => draw_shockwave(&mut gizmos, &effect, progress),
            ImpactEffectKind::Fog => draw_fog(&mut gizmos, &effect, progress),
            ImpactEffectKind::Smoke => draw_smoke(&mut gizmos, &effect, progress),
        }
    }
}

/// Remove all effects when the simulation is reset.
pub(super) fn clear_impact_effects(
    mut commands: Commands,
    mut resets: MessageReader<ResetSimulation>,
    effects: Query<Entity, With<ImpactEffect>>,
) {
    if resets.read().count() == 0 {
        return;
    }
    for entity in &effects {
        commands.entity(entity).despawn();
    }
}

fn draw_shockwave(gizmos: &mut Gizmos, effect: &ImpactEffect, progress: f32) {
    let radius = EARTH_RADIUS * (0.2 + progress * 1.5 * effect.scale);
    let alpha = (1.0 - progress).powf(0.5);
    let Srgba {
        red, green, blue, ..
    } = effect.color.to_srgba();
    let normal = effect.position.normalize_or(Vec3::Y);
    draw_circle_segments(
        gizmos,
        effect.position,
        normal,
        radius,
        Color::srgba(red, green, blue, alpha),
        32,
    );

    // Bright core, short-lived
    if progress < 0.2 {
        let flash = Color::srgba(1.0, 1.0, 0.9, 1.0 - progress * 5.0);
        draw_circle_segments(gizmos, effect.position, normal, radius * 0.3, flash, 12);
    }
}

fn draw_fog(gizmos: &mut Gizmos, effect: &ImpactEffect, progress: f32) {
    let radius = EARTH_RADIUS * 0.5 * effect.scale * (0.5 + progress);
    let alpha = 0.35 * (1.0 - progress);
    let color = Color::srgba(0.6, 0.55, 0.5, alpha);
    let isometry = Isometry3d::from_translation(effect.position);
    gizmos.sphere(isometry, radius, color).resolution(16);
}

fn draw_smoke(gizmos: &mut Gizmos, effect: &ImpactEffect, progress: f32) {
    const PUFFS: usize = 10;
    let up = effect.position.normalize_or(Vec3::Y);
    let side = up.any_orthonormal_vector();
    let forward = up.cross(side);
    let distance = EARTH_RADIUS * 0.8 * effect.scale * progress;
    let alpha = (1.0 - progress).powf(1.5) * 0.7;
    let color = Color::srgba(0.35, 0.33, 0.3, alpha);

    for i in 0..PUFFS {
        let angle = i as f32 * std::f32::consts::TAU / PUFFS as f32 + progress * 0.5;
        let spread = 0.8 + 0.4 * ((i as f32 * 1.7).sin() * 0.5 + 0.5);
        let offset = (side * angle.cos() + forward * angle.sin()) * distance * spread
            + up * distance * 0.6;
        let radius = 0.15 * effect.scale * (1.0 + progress);
        draw_circle_segments(gizmos, effect.position + offset, up, radius, color, 8);
    }
}
