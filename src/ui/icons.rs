//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const HELP: &str = egui_phosphor::regular::QUESTION;
pub const ADD: &str = egui_phosphor::regular::PLUS;
pub const CLOSE: &str = egui_phosphor::regular::X;
pub const SEARCH: &str = egui_phosphor::regular::MAGNIFYING_GLASS;

/// Feed snapshot loading
pub const DOWNLOAD: &str = egui_phosphor::regular::DOWNLOAD_SIMPLE;
pub const SPINNER: &str = egui_phosphor::regular::SPINNER;

pub const ASTEROID: &str = egui_phosphor::regular::ASTERISK;
pub const ORBIT: &str = egui_phosphor::regular::PATH;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Start impact simulation
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;

pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const INFO: &str = egui_phosphor::regular::INFO;
pub const FIRE: &str = egui_phosphor::regular::FIRE;
