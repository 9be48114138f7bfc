//! NEO Impact - near-Earth object impact viewer
//!
//! A desktop application that animates near-Earth objects on their orbits
//! and estimates what their impact on Earth would release.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;

use neo_impact::camera::CameraPlugin;
use neo_impact::config::{CliArgs, ImpactConfig};
use neo_impact::input::InputPlugin;
use neo_impact::neo::FeedLoaderPlugin;
use neo_impact::render::RenderPlugin;
use neo_impact::simulation::SimulationPlugin;
use neo_impact::ui::UiPlugin;

fn main() {
    let args = CliArgs::parse();
    let config_path = args.config_path();

    // Logging is not up yet; problems are reported once the app starts.
    let (mut config, load_error) = match ImpactConfig::load_or_default(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (ImpactConfig::default(), Some(err)),
    };
    let rejected = config.apply_cli_overrides(&args);
    let (level, level_error) = match config.parsed_log_level() {
        Ok(level) => (level, None),
        Err(err) => (Level::INFO, Some(err)),
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                level,
                filter: "wgpu=error,naga=warn".to_string(),
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "NEO Impact".to_string(),
                    ..default()
                }),
                ..default()
            }),
    )
    .add_plugins(EguiPlugin::default());

    if let Some(err) = load_error {
        warn!("Using default config, {} unusable: {}", config_path.display(), err);
    }
    for err in rejected {
        warn!("Ignoring command-line override: {}", err);
    }
    if let Some(err) = level_error {
        warn!("{}; logging at info", err);
    }

    app
        // Insert resources before plugins that depend on them
        .insert_resource(config)
        .add_plugins((
            SimulationPlugin,
            FeedLoaderPlugin,
            CameraPlugin,
            InputPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
