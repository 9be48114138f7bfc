//! Floating "what if" form for hypothetical bodies.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{UiState, colors, icons};
use crate::animator::PositionAnimator;
use crate::neo::ManualForm;
use crate::simulation::SubmitManual;

pub fn what_if_system(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut form: ResMut<ManualForm>,
    animator: Option<Res<PositionAnimator>>,
    mut submissions: MessageWriter<SubmitManual>,
) {
    if !ui_state.what_if_open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let busy = animator.is_some_and(|a| a.is_simulated());

    let mut open = true;
    let mut submitted = false;
    egui::Window::new(format!("{} What if", icons::ADD))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_pos([320.0, 80.0])
        .show(ctx, |ui| {
            egui::Grid::new("what_if_form").num_columns(2).show(ui, |ui| {
                let f: &mut ManualForm = &mut form;
                let fields: [(&str, &mut String); 8] = [
                    ("Name", &mut f.name),
                    ("a (AU)", &mut f.semi_major_axis),
                    ("e", &mut f.eccentricity),
                    ("i (deg)", &mut f.inclination),
                    ("Diameter min (km)", &mut f.diam_min),
                    ("Diameter max (km)", &mut f.diam_max),
                    ("H (mag)", &mut f.absolute_magnitude),
                    ("Velocity (km/s)", &mut f.velocity),
                ];
                for (label, value) in fields {
                    ui.label(label);
                    ui.add(egui::TextEdit::singleline(value).desired_width(110.0));
                    ui.end_row();
                }
            });

            ui.label(
                egui::RichText::new("Blank or invalid values use defaults.")
                    .small()
                    .color(colors::MUTED),
            );
            if busy {
                ui.label(
                    egui::RichText::new(format!(
                        "{} A simulation is running; the body is added without launching.",
                        icons::WARNING
                    ))
                    .small()
                    .color(colors::PAUSE_ICON),
                );
            }

            ui.horizontal(|ui| {
                if ui.button(format!("{} Simulate", icons::TARGET)).clicked() {
                    submitted = true;
                }
                if ui.button("Defaults").clicked() {
                    *form = ManualForm::default();
                }
            });
        });

    if submitted {
        submissions.write(SubmitManual(form.clone()));
        form.name.clear();
    }
    ui_state.what_if_open = open;
}
