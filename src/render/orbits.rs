//! Orbit path rendering using Bevy Gizmos.
//!
//! Each body's sampled [`OrbitPath`](crate::orbit::OrbitPath) is drawn as a
//! closed polyline. Bodies filtered out of the catalog draw nothing; the
//! selected body's path is drawn solid and brighter.

use bevy::prelude::*;

use crate::animator::PositionAnimator;
use crate::body::{BodyId, BodySource};
use crate::catalog::CatalogFilter;

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Alpha for unselected paths.
    pub alpha: f32,
    /// Dash pattern: draw N segments, then skip M segments, repeating.
    ///
    /// Set to (1, 0) for a solid line.
    pub dash_on: usize,
    pub dash_off: usize,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            alpha: 0.3,
            dash_on: 2,
            dash_off: 2,
        }
    }
}

fn orbit_color(source: BodySource, alpha: f32) -> Color {
    match source {
        BodySource::Feed => Color::srgba(0.55, 0.65, 0.8, alpha),
        BodySource::Manual => Color::srgba(0.85, 0.6, 0.9, alpha),
    }
}

/// Whether segment `index` is drawn under a dash pattern.
pub fn dash_visible(index: usize, dash_on: usize, dash_off: usize) -> bool {
    let period = dash_on + dash_off;
    period == 0 || dash_off == 0 || index % period < dash_on
}

pub(super) fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    animator: Res<PositionAnimator>,
    filter: Res<CatalogFilter>,
) {
    if !settings.visible {
        return;
    }

    for body in animator.bodies() {
        let Some(path) = &body.path else {
            continue;
        };
        let selected = filter.selected == Some(body.id);
        if !selected && !filter.matches(body) {
            continue;
        }

        let (color, dash_on, dash_off) = if selected {
            (Color::srgba(1.0, 1.0, 1.0, 0.8), 1, 0)
        } else {
            (
                orbit_color(body.source, settings.alpha),
                settings.dash_on,
                settings.dash_off,
            )
        };

        let points = path.points();
        for i in 0..points.len() {
            if !dash_visible(i, dash_on, dash_off) {
                continue;
            }
            let a = points[i].as_vec3();
            let b = points[(i + 1) % points.len()].as_vec3();
            gizmos.line(a, b, color);
        }
    }
}

/// Trajectory line from the active body's start point to the target.
pub(super) fn draw_impact_trajectory(animator: Res<PositionAnimator>, mut gizmos: Gizmos) {
    let Some(body) = animator.active().and_then(|id: BodyId| animator.body(id)) else {
        return;
    };
    if let Some(impact) = &body.impact {
        gizmos.line(
            impact.start.as_vec3(),
            impact.target.as_vec3(),
            Color::srgba(1.0, 0.35, 0.25, 0.5),
        );
    }
}
