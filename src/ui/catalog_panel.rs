//! Left panel: feed snapshot loading, catalog filter and body list.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{UiState, colors, energy_color, icons};
use crate::animator::PositionAnimator;
use crate::catalog::{CatalogFilter, ViewMode};
use crate::config::ImpactConfig;
use crate::neo::{FeedLoadTask, FeedStatus, LoadFeed};

const PANEL_WIDTH: f32 = 260.0;

pub fn catalog_panel_system(
    mut contexts: EguiContexts,
    animator: Option<Res<PositionAnimator>>,
    config: Res<ImpactConfig>,
    mut filter: ResMut<CatalogFilter>,
    mut loader: ResMut<FeedLoadTask>,
    mut ui_state: ResMut<UiState>,
    mut requests: MessageWriter<LoadFeed>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(animator) = animator else {
        return;
    };

    egui::SidePanel::left("catalog")
        .default_width(PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading(format!("{} Near-Earth objects", icons::ASTEROID));
            ui.add_space(4.0);

            render_feed_controls(ui, &mut ui_state, &mut loader, &mut requests);
            ui.separator();

            ui.horizontal(|ui| {
                for mode in ViewMode::ALL {
                    ui.selectable_value(&mut filter.view_mode, mode, mode.label());
                }
            });
            ui.horizontal(|ui| {
                ui.label(icons::SEARCH);
                ui.add(
                    egui::TextEdit::singleline(&mut filter.name_query)
                        .hint_text("Filter by name")
                        .desired_width(f32::INFINITY),
                );
            });

            let counts = filter.counts(animator.bodies());
            ui.label(
                egui::RichText::new(format!("{} of {} shown", counts.filtered, counts.total))
                    .small()
                    .color(colors::MUTED),
            );
            ui.separator();

            let model = config.impact_model();
            let mut clicked = None;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for body in filter.apply(animator.bodies()) {
                        let class = model.assess(&body.profile).energy_class();
                        let selected = filter.selected == Some(body.id);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("●").color(energy_color(class)));
                            if ui.selectable_label(selected, &body.name).clicked() {
                                clicked = Some(body.id);
                            }
                            if body.profile.is_potentially_hazardous {
                                ui.label(egui::RichText::new(icons::WARNING).color(colors::DANGER))
                                    .on_hover_text("Potentially hazardous");
                            }
                        });
                    }
                });

            if let Some(id) = clicked {
                filter.selected = if filter.selected == Some(id) {
                    None
                } else {
                    Some(id)
                };
            }
        });
}

fn render_feed_controls(
    ui: &mut egui::Ui,
    ui_state: &mut UiState,
    loader: &mut FeedLoadTask,
    requests: &mut MessageWriter<LoadFeed>,
) {
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut ui_state.feed_path)
                .hint_text("feed.json")
                .desired_width(150.0),
        );
        if loader.is_loading() {
            if ui.button(format!("{} Cancel", icons::CLOSE)).clicked() {
                loader.cancel();
            }
        } else {
            let path = ui_state.feed_path.trim();
            if ui
                .add_enabled(!path.is_empty(), egui::Button::new(format!("{} Load", icons::DOWNLOAD)))
                .clicked()
            {
                requests.write(LoadFeed(PathBuf::from(path)));
            }
        }
    });

    let (text, color) = match &loader.status {
        FeedStatus::Idle => ("No snapshot loaded".to_string(), colors::MUTED),
        FeedStatus::Loading(path) => (
            format!("{} Loading {}", icons::SPINNER, path.display()),
            colors::ACCENT,
        ),
        FeedStatus::Loaded(count) => (format!("Loaded {} records", count), colors::SUCCESS),
        FeedStatus::Failed(reason) => (format!("{} {}", icons::WARNING, reason), colors::DANGER),
    };
    ui.label(egui::RichText::new(text).small().color(color));
}
