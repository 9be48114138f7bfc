//! Right panel: the selected body's impact assessment.
//!
//! Shows size, velocity, energy with its class colour, the hazard tiers,
//! the impact outlook, the orbit summary and the next close approach,
//! plus the simulate / reset controls and the last impact outcome.

use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, energy_color, icons};
use crate::animator::{AnimatorPhase, PositionAnimator};
use crate::body::Body;
use crate::catalog::CatalogFilter;
use crate::config::ImpactConfig;
use crate::impact::approach::next_approach;
use crate::impact::assessment::NOT_AVAILABLE;
use crate::impact::severity::{impact_outlook, tier_from_hazard_flag};
use crate::impact::{BodyAssessment, ImpactModel};
use crate::simulation::{ImpactOutcome, ResetSimulation, StartImpact};

const PANEL_WIDTH: f32 = 280.0;

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[allow(clippy::too_many_arguments)]
pub fn details_panel_system(
    mut contexts: EguiContexts,
    animator: Option<Res<PositionAnimator>>,
    config: Res<ImpactConfig>,
    filter: Res<CatalogFilter>,
    outcome: Res<ImpactOutcome>,
    mut starts: MessageWriter<StartImpact>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(animator) = animator else {
        return;
    };

    egui::SidePanel::right("details")
        .default_width(PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            let Some(body) = filter.selected.and_then(|id| animator.body(id)) else {
                ui.heading("No selection");
                ui.label(
                    egui::RichText::new("Pick a body from the catalog.").color(colors::MUTED),
                );
                render_outcome(ui, &outcome);
                return;
            };

            let model = config.impact_model();
            let assessment = model.assess(&body.profile);

            ui.heading(&body.name);
            ui.label(
                egui::RichText::new(body.source.label())
                    .small()
                    .color(colors::MUTED),
            );
            ui.separator();

            render_assessment(ui, &assessment);
            ui.separator();
            render_outlook(ui, &assessment);
            ui.separator();
            render_orbit(ui, body);
            ui.separator();
            render_next_approach(ui, body, &model);
            ui.separator();

            ui.horizontal(|ui| {
                let can_start = animator.phase() == AnimatorPhase::Orbit
                    && !animator.is_simulated()
                    && body.position.is_some();
                if ui
                    .add_enabled(
                        can_start,
                        egui::Button::new(format!("{} Simulate impact", icons::TARGET)),
                    )
                    .on_hover_text("Enter")
                    .clicked()
                {
                    starts.write(StartImpact(body.id));
                }
                if ui
                    .add_enabled(
                        animator.is_simulated(),
                        egui::Button::new(format!("{} Reset", icons::RESET)),
                    )
                    .clicked()
                {
                    resets.write(ResetSimulation);
                }
            });

            render_outcome(ui, &outcome);
        });
}

fn render_assessment(ui: &mut egui::Ui, assessment: &BodyAssessment) {
    let class = assessment.energy_class();
    egui::Grid::new("assessment").num_columns(2).show(ui, |ui| {
        ui.label("Diameter");
        ui.label(assessment.diameter_text());
        ui.end_row();

        ui.label("Velocity");
        ui.label(assessment.velocity_text());
        ui.end_row();

        ui.label("Energy");
        let mut energy = egui::RichText::new(assessment.energy_text())
            .strong()
            .color(energy_color(class));
        if class.is_some_and(|c| c.glows()) {
            energy = energy.background_color(energy_color(class).gamma_multiply(0.25));
        }
        ui.label(energy);
        ui.end_row();

        ui.label("Class");
        ui.label(class.map_or(NOT_AVAILABLE, |c| c.label()));
        ui.end_row();

        ui.label("Severity");
        ui.label(assessment.tier_text());
        ui.end_row();

        ui.label("Danger");
        let danger = match &assessment.danger {
            Some(d) => format!("{} ({})", d.level.label(), d.description),
            None => NOT_AVAILABLE.to_string(),
        };
        ui.label(danger);
        ui.end_row();
    });
}

fn render_outlook(ui: &mut egui::Ui, assessment: &BodyAssessment) {
    let flag_tier = tier_from_hazard_flag(assessment.is_pha);
    let outlook = impact_outlook(assessment.hazard_tier);
    let pct = outlook
        .probability_pct
        .map_or(NOT_AVAILABLE.to_string(), |p| format!("{}%", p));
    let torino = outlook
        .torino
        .map_or(NOT_AVAILABLE.to_string(), |t| t.to_string());

    egui::Grid::new("outlook").num_columns(2).show(ui, |ui| {
        ui.label("Hazard flag");
        let color = if assessment.is_pha {
            colors::DANGER
        } else {
            colors::SUCCESS
        };
        ui.label(egui::RichText::new(flag_tier.label()).color(color));
        ui.end_row();

        ui.label("Probability");
        ui.label(pct);
        ui.end_row();

        ui.label("Torino");
        ui.label(torino);
        ui.end_row();

        ui.label("Risk");
        ui.label(outlook.risk_label);
        ui.end_row();
    });
    ui.label(egui::RichText::new(format!("{} {}", icons::INFO, outlook.advice)).italics());
}

fn render_orbit(ui: &mut egui::Ui, body: &Body) {
    let e = &body.elements;
    let d = &body.details;
    let text_or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    ui.label(egui::RichText::new(format!("{} Orbit", icons::ORBIT)).strong());
    egui::Grid::new("orbit").num_columns(2).show(ui, |ui| {
        ui.label("Class");
        ui.label(text_or_na(d.orbit_class.clone()));
        ui.end_row();

        ui.label("a / e / i");
        ui.label(format!(
            "{:.3} AU / {:.3} / {:.1}°",
            e.semi_major_axis_au, e.eccentricity, e.inclination_deg
        ));
        ui.end_row();

        ui.label("Perihelion");
        ui.label(format!("{:.3} AU", d.perihelion_au(e)));
        ui.end_row();

        ui.label("Aphelion");
        ui.label(format!("{:.3} AU", d.aphelion_au(e)));
        ui.end_row();

        ui.label("Period");
        ui.label(format!("{:.0} d", d.period_days(e)));
        ui.end_row();

        ui.label("MOID");
        ui.label(text_or_na(d.moid_au.map(|au| format!("{:.6} AU", au))));
        ui.end_row();

        ui.label("Uncertainty");
        ui.label(text_or_na(d.uncertainty.clone()));
        ui.end_row();

        ui.label("Data arc");
        ui.label(text_or_na(d.data_arc_days.map(|days| format!("{:.0} d", days))));
        ui.end_row();

        ui.label("Epoch");
        ui.label(text_or_na(d.epoch_osculation.clone()));
        ui.end_row();
    });
}

fn render_next_approach(ui: &mut egui::Ui, body: &Body, model: &ImpactModel) {
    ui.label(egui::RichText::new(format!("{} Next approach", icons::CLOCK)).strong());
    match next_approach(&body.profile.approaches, &model.preferred_body, now_ms()) {
        Some(approach) => {
            let date = approach.date.as_deref().unwrap_or(NOT_AVAILABLE);
            let miss = approach
                .miss_distance_km
                .map_or(NOT_AVAILABLE.to_string(), |km| format!("{:.0} km", km));
            ui.label(format!("{} · {} · miss {}", approach.orbiting_body, date, miss));
        }
        None => {
            ui.label(egui::RichText::new(NOT_AVAILABLE).color(colors::MUTED));
        }
    }
}

fn render_outcome(ui: &mut egui::Ui, outcome: &ImpactOutcome) {
    let Some(report) = &outcome.last else {
        return;
    };
    ui.separator();
    let class = report.assessment.energy_class();
    ui.label(
        egui::RichText::new(format!("{} Impact: {}", icons::FIRE, report.name))
            .strong()
            .color(energy_color(class)),
    );
    ui.label(format!(
        "{} · {}",
        report.assessment.energy_text(),
        report.assessment.danger_text()
    ));
}
