//! Keyboard shortcuts for simulation control.
//!
//! Space toggles pause, R resets, Enter simulates the selected body and
//! Escape clears the selection. Keys are ignored while egui has focus.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::catalog::CatalogFilter;
use crate::simulation::{ResetSimulation, SimulationSet, StartImpact, TogglePause};

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            keyboard_shortcuts.before(SimulationSet::Requests),
        );
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut filter: ResMut<CatalogFilter>,
    mut contexts: EguiContexts,
    mut pauses: MessageWriter<TogglePause>,
    mut resets: MessageWriter<ResetSimulation>,
    mut starts: MessageWriter<StartImpact>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        pauses.write(TogglePause);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        resets.write(ResetSimulation);
    }

    if keys.just_pressed(KeyCode::Enter) {
        match filter.selected {
            Some(id) => {
                starts.write(StartImpact(id));
            }
            None => info!("No body selected"),
        }
    }

    if keys.just_pressed(KeyCode::Escape) {
        filter.selected = None;
    }
}
