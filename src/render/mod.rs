//! Rendering systems for the impact viewer.
//!
//! This module draws the static scene, the asteroid meshes mirroring the
//! animator, orbit paths and impact effects.

pub mod bodies;
pub mod effects;
pub mod orbits;
pub mod scene;

use bevy::prelude::*;

use self::bodies::{draw_selection, setup_asteroid_mesh, sync_body_entities, sync_body_transforms};
use self::effects::{animate_impact_effects, clear_impact_effects, spawn_impact_effects};
use self::orbits::{draw_impact_trajectory, draw_orbit_paths};
use self::scene::ScenePlugin;

pub use self::bodies::BodyMarker;
pub use self::effects::{ImpactEffect, ImpactEffectKind};
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ScenePlugin)
            .init_resource::<OrbitPathSettings>()
            .add_systems(Startup, setup_asteroid_mesh)
            // Entities must exist before positions are copied; gizmos read final positions.
            .add_systems(
                Update,
                (
                    sync_body_entities,
                    sync_body_transforms,
                    (draw_orbit_paths, draw_impact_trajectory, draw_selection),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (clear_impact_effects, spawn_impact_effects, animate_impact_effects).chain(),
            );
    }
}

/// Draw a circle of line segments around `normal`.
pub fn draw_circle_segments(
    gizmos: &mut Gizmos,
    center: Vec3,
    normal: Vec3,
    radius: f32,
    color: Color,
    segments: usize,
) {
    let n = normal.normalize_or(Vec3::Y);
    let u = n.any_orthonormal_vector();
    let v = n.cross(u);
    let angle_step = std::f32::consts::TAU / segments.max(3) as f32;

    for i in 0..segments.max(3) {
        let angle1 = i as f32 * angle_step;
        let angle2 = (i + 1) as f32 * angle_step;

        let p1 = center + (u * angle1.cos() + v * angle1.sin()) * radius;
        let p2 = center + (u * angle2.cos() + v * angle2.sin()) * radius;

        gizmos.line(p1, p2, color);
    }
}
