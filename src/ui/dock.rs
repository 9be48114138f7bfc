//! Bottom bar with simulation controls.
//!
//! Play/pause, animator phase, reset, what-if toggle and a help popup with
//! the keyboard shortcuts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{UiState, colors, icons};
use crate::animator::{AnimatorPhase, PositionAnimator};
use crate::simulation::{ResetSimulation, TogglePause};

const DOCK_HEIGHT: f32 = 44.0;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Space", "Pause / resume orbits"),
    ("Enter", "Simulate impact of selection"),
    ("R", "Reset simulation"),
    ("Esc", "Clear selection"),
    ("Right drag", "Rotate camera"),
    ("Wheel", "Zoom"),
];

pub fn dock_system(
    mut contexts: EguiContexts,
    animator: Option<Res<PositionAnimator>>,
    mut ui_state: ResMut<UiState>,
    mut pauses: MessageWriter<TogglePause>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(animator) = animator else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(DOCK_HEIGHT)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 14.0;

                let phase = animator.phase();
                let can_toggle = matches!(phase, AnimatorPhase::Orbit | AnimatorPhase::Paused);
                let (icon, color) = if phase == AnimatorPhase::Paused {
                    (icons::PLAY, colors::PLAY_ICON)
                } else {
                    (icons::PAUSE, colors::PAUSE_ICON)
                };
                let button = egui::Button::new(egui::RichText::new(icon).size(18.0).color(color));
                if ui
                    .add_enabled(can_toggle, button)
                    .on_hover_text("Pause / resume (Space)")
                    .clicked()
                {
                    pauses.write(TogglePause);
                }

                ui.separator();
                ui.label(egui::RichText::new(phase.label()).color(colors::TEXT));
                if let Some(fraction) = animator.transition_fraction() {
                    ui.add(egui::ProgressBar::new(fraction).desired_width(80.0));
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} {}", icons::ASTEROID, animator.len()))
                        .color(colors::MUTED),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;

                    if ui
                        .button(egui::RichText::new(icons::HELP).size(16.0))
                        .on_hover_text("Shortcuts")
                        .clicked()
                    {
                        ui_state.help_open = !ui_state.help_open;
                    }

                    if ui
                        .button(format!("{} What if", icons::ADD))
                        .on_hover_text("Enter a hypothetical body")
                        .clicked()
                    {
                        ui_state.what_if_open = !ui_state.what_if_open;
                    }

                    if ui
                        .add_enabled(
                            animator.is_simulated(),
                            egui::Button::new(format!("{} Reset", icons::RESET)),
                        )
                        .on_hover_text("Reset simulation (R)")
                        .clicked()
                    {
                        resets.write(ResetSimulation);
                    }
                });
            });
        });

    if ui_state.help_open {
        let mut open = true;
        egui::Window::new("Shortcuts")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -DOCK_HEIGHT - 12.0])
            .show(ctx, |ui| {
                egui::Grid::new("shortcuts").striped(true).show(ui, |ui| {
                    for (key, action) in SHORTCUTS {
                        ui.label(egui::RichText::new(*key).strong());
                        ui.label(*action);
                        ui.end_row();
                    }
                });
            });
        ui_state.help_open = open;
    }
}
