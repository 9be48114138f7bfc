//! UI module providing egui-based interface.
//!
//! A catalog list on the left, the selected body's assessment on the right,
//! a dock along the bottom and a floating what-if form.

mod catalog_panel;
mod details_panel;
mod dock;
pub mod icons;
mod what_if;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;
use bevy_egui::egui::Color32;

use crate::config::ImpactConfig;
use crate::impact::EnergyClass;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<crate::neo::ManualForm>()
            .init_resource::<icons::FontsInitialized>()
            .add_systems(Startup, seed_feed_path)
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dock::dock_system,
                    catalog_panel::catalog_panel_system,
                    details_panel::details_panel_system,
                    what_if::what_if_system,
                )
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Global UI state.
#[derive(Resource, Default)]
pub struct UiState {
    /// Snapshot path typed in the catalog panel.
    pub feed_path: String,
    pub what_if_open: bool,
    pub help_open: bool,
}

fn seed_feed_path(config: Res<ImpactConfig>, mut state: ResMut<UiState>) {
    if let Some(path) = &config.feed.path {
        state.feed_path = path.display().to_string();
    }
}

/// Colors shared by the panels.
mod colors {
    use bevy_egui::egui::Color32;

    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
    pub const MUTED: Color32 = Color32::from_rgb(140, 140, 150);
    pub const DANGER: Color32 = Color32::from_rgb(224, 85, 85);
    pub const SUCCESS: Color32 = Color32::from_rgb(85, 176, 85);
    pub const ACCENT: Color32 = Color32::from_rgb(85, 153, 221);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
}

/// egui colour for an energy class; muted when unknown.
fn energy_color(class: Option<EnergyClass>) -> Color32 {
    match class {
        Some(class) => {
            let [r, g, b] = class.rgb();
            Color32::from_rgb(r, g, b)
        }
        None => colors::MUTED,
    }
}
