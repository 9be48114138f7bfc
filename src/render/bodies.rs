//! Asteroid meshes mirroring the animator's bodies.
//!
//! Entities hold only a [`BodyMarker`]; positions, visibility and colour are
//! read from the animator each frame.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::animator::PositionAnimator;
use crate::body::{Body, BodyId};
use crate::catalog::CatalogFilter;
use crate::config::ImpactConfig;
use crate::impact::ImpactModel;

/// Links a render entity to an animator body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyMarker(pub BodyId);

/// Shared unit sphere for all asteroids.
#[derive(Resource)]
pub struct AsteroidMesh(pub Handle<Mesh>);

/// Rendered radius for a diameter: grows with √d, clamped so tiny bodies stay visible.
pub fn visual_radius(diameter_km: f64) -> f32 {
    (0.4 + 0.6 * diameter_km.max(0.0).sqrt() as f32).clamp(0.4, 3.0)
}

/// Material for a body: energy class colour, glowing for the two upper classes.
/// Grey when no energy is known.
pub fn body_material(body: &Body, model: &ImpactModel) -> StandardMaterial {
    let class = model.assess(&body.profile).energy_class();
    let base_color = match class {
        Some(class) => {
            let [r, g, b] = class.rgb();
            Color::srgb_u8(r, g, b)
        }
        None => Color::srgb(0.55, 0.55, 0.55),
    };
    let emissive = if class.is_some_and(|c| c.glows()) {
        base_color.to_linear() * 2.0
    } else {
        LinearRgba::BLACK
    };
    StandardMaterial {
        base_color,
        emissive,
        perceptual_roughness: 0.85,
        metallic: 0.05,
        ..default()
    }
}

pub(super) fn setup_asteroid_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(AsteroidMesh(meshes.add(Sphere::new(1.0).mesh().uv(16, 12))));
}

/// Spawn entities for new bodies and despawn entities of removed ones.
pub(super) fn sync_body_entities(
    mut commands: Commands,
    animator: Res<PositionAnimator>,
    config: Res<ImpactConfig>,
    mesh: Option<Res<AsteroidMesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<(Entity, &BodyMarker)>,
) {
    if !animator.is_changed() {
        return;
    }
    let Some(mesh) = mesh else {
        return;
    };

    let live: HashSet<BodyId> = animator.bodies().iter().map(|b| b.id).collect();
    let mut spawned = HashSet::new();
    for (entity, marker) in &existing {
        if live.contains(&marker.0) {
            spawned.insert(marker.0);
        } else {
            commands.entity(entity).despawn();
        }
    }

    let model = config.impact_model();
    for body in animator.bodies().iter().filter(|b| !spawned.contains(&b.id)) {
        let material = materials.add(body_material(body, &model));
        let translation = body.position.map(|p| p.as_vec3()).unwrap_or_default();
        commands.spawn((
            BodyMarker(body.id),
            Mesh3d(mesh.0.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(translation)
                .with_scale(Vec3::splat(visual_radius(body.size.diameter_km))),
            Visibility::Hidden,
            Name::new(body.name.clone()),
        ));
    }
}

/// Copy positions from the animator and apply the catalog filter.
///
/// Bodies without a position stay hidden. The active body is always shown.
pub(super) fn sync_body_transforms(
    animator: Res<PositionAnimator>,
    filter: Res<CatalogFilter>,
    mut query: Query<(&BodyMarker, &mut Transform, &mut Visibility)>,
) {
    for (marker, mut transform, mut visibility) in &mut query {
        let Some(body) = animator.body(marker.0) else {
            continue;
        };
        let shown = match body.position {
            Some(position) => {
                transform.translation = position.as_vec3();
                filter.matches(body) || animator.active() == Some(body.id)
            }
            None => false,
        };
        visibility.set_if_neq(if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Outline the selected body.
pub(super) fn draw_selection(
    animator: Res<PositionAnimator>,
    filter: Res<CatalogFilter>,
    mut gizmos: Gizmos,
) {
    let Some(body) = filter.selected.and_then(|id| animator.body(id)) else {
        return;
    };
    let Some(position) = body.position else {
        return;
    };
    let radius = visual_radius(body.size.diameter_km) * 1.8;
    super::draw_circle_segments(
        &mut gizmos,
        position.as_vec3(),
        Vec3::Y,
        radius,
        Color::srgba(1.0, 1.0, 1.0, 0.8),
        24,
    );
}
