//! Static scene: Earth at the impact target, the Moon, the Sun and a starfield.

use bevy::prelude::*;
use rand::Rng;

/// Earth radius in render units.
pub const EARTH_RADIUS: f32 = 3.0;
/// Moon orbit radius around Earth in render units.
pub const MOON_ORBIT_RADIUS: f32 = 9.0;
/// Moon angular speed in radians per second.
const MOON_ANGULAR_SPEED: f32 = 0.15;
/// Distance of the Sun from the origin in render units.
const SUN_DISTANCE: f32 = 900.0;
/// Radius of the star shell.
const STAR_SHELL_RADIUS: f32 = 2500.0;
const STAR_COUNT: usize = 600;

/// Marker for the Earth entity.
#[derive(Component)]
pub struct Earth;

/// Moon on a circular orbit around Earth.
#[derive(Component)]
pub struct Moon {
    pub angle: f32,
}

/// Marker for the Sun entity.
#[derive(Component)]
pub struct Sun;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_bodies, spawn_starfield, spawn_lighting))
            .add_systems(Update, (orbit_moon, spin_earth));
    }
}

fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Earth,
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS).mesh().uv(48, 24))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.15, 0.35, 0.8),
            perceptual_roughness: 0.7,
            ..default()
        })),
        Transform::default(),
    ));

    commands.spawn((
        Moon { angle: 0.0 },
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS * 0.27))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.6, 0.6),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(MOON_ORBIT_RADIUS, 0.0, 0.0),
    ));

    let sun_color = Color::srgb(1.0, 0.85, 0.4);
    commands.spawn((
        Sun,
        Mesh3d(meshes.add(Sphere::new(40.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun_color,
            emissive: sun_color.to_linear() * 4.0,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(-SUN_DISTANCE, 120.0, -SUN_DISTANCE * 0.4),
    ));

    info!("Spawned Earth, Moon and Sun");
}

/// Spawn stars at random points on a distant spherical shell.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(1.5));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        // Uniform direction from z and azimuth
        let z: f32 = rng.gen_range(-1.0..1.0);
        let phi: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        let ring = (1.0 - z * z).sqrt();
        let dir = Vec3::new(ring * phi.cos(), z, ring * phi.sin());
        let scale = rng.gen_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(dir * STAR_SHELL_RADIUS).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {} background stars", STAR_COUNT);
}

fn spawn_lighting(mut commands: Commands) {
    // Sunlight toward the origin
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-SUN_DISTANCE, 120.0, -SUN_DISTANCE * 0.4).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light so the night side stays readable
    commands.spawn((
        PointLight {
            intensity: 2.0e7,
            range: 400.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(60.0, 80.0, 60.0),
    ));
}

fn orbit_moon(time: Res<Time>, mut moons: Query<(&mut Moon, &mut Transform)>) {
    for (mut moon, mut transform) in &mut moons {
        moon.angle = (moon.angle + MOON_ANGULAR_SPEED * time.delta_secs()) % std::f32::consts::TAU;
        transform.translation = moon_position(moon.angle);
    }
}

fn spin_earth(time: Res<Time>, mut earth: Query<&mut Transform, With<Earth>>) {
    for mut transform in &mut earth {
        transform.rotate_y(0.1 * time.delta_secs());
    }
}

/// Moon position for an orbit angle, in the Earth's equatorial plane.
pub fn moon_position(angle: f32) -> Vec3 {
    Vec3::new(
        MOON_ORBIT_RADIUS * angle.cos(),
        0.0,
        MOON_ORBIT_RADIUS * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moon_stays_on_circle() {
        for k in 0..16 {
            let p = moon_position(k as f32 * 0.4);
            assert!((p.length() - MOON_ORBIT_RADIUS).abs() < 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }
}
