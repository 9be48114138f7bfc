//! Camera system for the impact viewer.
//!
//! An orbit camera around a focus point: wheel zoom, right-drag to rotate.
//! While an impact is being set up the focus slides toward the selected
//! body, then follows it down to the target.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::animator::{AnimatorPhase, PositionAnimator};

/// Closest camera distance from the focus, in render units.
pub const MIN_DISTANCE: f32 = 8.0;

/// Furthest camera distance from the focus.
pub const MAX_DISTANCE: f32 = 1500.0;

/// Starting distance; frames orbits out to a few AU.
pub const DEFAULT_DISTANCE: f32 = 180.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Radians of rotation per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Pitch limit to keep the camera off the poles.
const MAX_PITCH: f32 = 1.5;

/// Per-frame smoothing toward the focus target while following.
const FOLLOW_SMOOTHING: f32 = 0.15;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Orbit camera parameters.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub focus: Vec3,
    /// Focus when the current transition began.
    transition_origin: Option<Vec3>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.5,
            distance: DEFAULT_DISTANCE,
            focus: Vec3::ZERO,
            transition_origin: None,
        }
    }
}

impl CameraState {
    /// Camera transform looking at the focus.
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }

    /// Multiply the distance by a wheel-driven factor, clamped.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - scroll * ZOOM_SPEED;
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Rotate by a mouse delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ROTATE_SPEED;
        self.pitch = (self.pitch + delta.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the focus for the animator's phase.
    ///
    /// Transitioning: interpolate from the focus at transition start to the
    /// active body. Impact: follow the active body. Otherwise drift back to
    /// the origin.
    pub fn track(&mut self, phase: AnimatorPhase, fraction: Option<f32>, active: Option<Vec3>) {
        match (phase, active) {
            (AnimatorPhase::Transitioning { .. }, Some(target)) => {
                let origin = *self.transition_origin.get_or_insert(self.focus);
                self.focus = origin.lerp(target, fraction.unwrap_or(0.0));
            }
            (AnimatorPhase::Impact, Some(target)) => {
                self.transition_origin = None;
                self.focus = self.focus.lerp(target, FOLLOW_SMOOTHING);
            }
            _ => {
                self.transition_origin = None;
                self.focus = self.focus.lerp(Vec3::ZERO, FOLLOW_SMOOTHING);
            }
        }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                ((camera_zoom, camera_rotate), camera_track, apply_camera).chain(),
            );
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(mut commands: Commands, state: Res<CameraState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            far: 10_000.0,
            ..default()
        }),
        state.transform(),
        MainCamera,
    ));
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false)
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut state: ResMut<CameraState>,
    mut contexts: EguiContexts,
) {
    if mouse_scroll.delta.y == 0.0 || pointer_over_ui(&mut contexts) {
        return;
    }
    state.zoom(mouse_scroll.delta.y);
}

/// Right mouse button drag rotates around the focus.
fn camera_rotate(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut state: ResMut<CameraState>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Right) || pointer_over_ui(&mut contexts) {
        return;
    }
    state.rotate(mouse_motion.delta);
}

fn camera_track(animator: Option<Res<PositionAnimator>>, mut state: ResMut<CameraState>) {
    let Some(animator) = animator else {
        return;
    };
    let active = animator
        .active()
        .and_then(|id| animator.body(id))
        .and_then(|body| body.position)
        .map(|p| p.as_vec3());
    state.track(animator.phase(), animator.transition_fraction(), active);
}

fn apply_camera(state: Res<CameraState>, mut camera: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    *transform = state.transform();
}
