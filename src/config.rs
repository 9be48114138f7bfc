//! Runtime configuration persisted as RON, with command-line overrides.

use std::path::{Path, PathBuf};

use bevy::log::{Level, info};
use bevy::prelude::Resource;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::animator::AnimatorSettings;
use crate::impact::approach::DEFAULT_PREFERRED_BODY;
use crate::impact::size::DEFAULT_ALBEDO;
use crate::impact::{DENSITY_DENSE_ROCK, DENSITY_ROCKY_ICY, DensityPreset, DiameterConvention, ImpactModel};
use crate::orbit::DEFAULT_SEGMENTS;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level configuration.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImpactConfig {
    pub model: ModelConfig,
    pub orbit: OrbitConfig,
    pub animation: AnimationConfig,
    pub feed: FeedConfig,
    /// Log filter level (error, warn, info, debug, trace).
    pub log_level: String,
}

/// Physical assumptions of the impact model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub density: DensityPreset,
    pub diameter_convention: DiameterConvention,
    /// Geometric albedo for magnitude-based size estimates.
    pub albedo: f64,
    /// Body whose close approaches are preferred for velocity selection.
    pub preferred_body: String,
}

/// Orbit sampling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Render units per AU.
    pub scale: f64,
    pub segments: usize,
}

/// Tick-based animation rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub orbit_step: f64,
    pub impact_step: f64,
    pub transition_ticks: u32,
}

/// Feed snapshot source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// JSON snapshot loaded at startup.
    pub path: Option<PathBuf>,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            orbit: OrbitConfig::default(),
            animation: AnimationConfig::default(),
            feed: FeedConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            density: DensityPreset::RockyIcy,
            diameter_convention: DiameterConvention::GeometricMean,
            albedo: DEFAULT_ALBEDO,
            preferred_body: DEFAULT_PREFERRED_BODY.to_string(),
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            scale: 40.0,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            orbit_step: 0.2,
            impact_step: 0.005,
            transition_ticks: 100,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl ImpactConfig {
    /// Load config from `path`, or return defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: ImpactConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to `path` as pretty RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values the model or the animator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let density = self.model.density.kg_per_m3();
        if !density.is_finite() || density <= 0.0 {
            return Err(invalid("model.density", format!("{density} kg/m³ is not positive")));
        }
        if !self.model.albedo.is_finite() || self.model.albedo <= 0.0 {
            return Err(invalid("model.albedo", "must be positive"));
        }
        if !self.orbit.scale.is_finite() || self.orbit.scale <= 0.0 {
            return Err(invalid("orbit.scale", "must be positive"));
        }
        if self.orbit.segments == 0 {
            return Err(invalid("orbit.segments", "must be at least 1"));
        }
        if !self.animation.orbit_step.is_finite() || self.animation.orbit_step < 0.0 {
            return Err(invalid("animation.orbit_step", "must be zero or positive"));
        }
        if !self.animation.impact_step.is_finite() || self.animation.impact_step <= 0.0 {
            return Err(invalid("animation.impact_step", "must be positive"));
        }
        Ok(())
    }

    /// The configured log level.
    pub fn parsed_log_level(&self) -> Result<Level, ConfigError> {
        parse_log_level(&self.log_level)
    }

    pub fn impact_model(&self) -> ImpactModel {
        ImpactModel {
            density: self.model.density,
            convention: self.model.diameter_convention,
            albedo: self.model.albedo,
            preferred_body: self.model.preferred_body.clone(),
        }
    }

    pub fn animator_settings(&self) -> AnimatorSettings {
        AnimatorSettings {
            orbit_step: self.animation.orbit_step,
            impact_step: self.animation.impact_step,
            transition_ticks: self.animation.transition_ticks,
            orbit_scale: self.orbit.scale,
            segments: self.orbit.segments,
        }
    }
}

fn parse_log_level(level: &str) -> Result<Level, ConfigError> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| invalid("log_level", format!("unknown level {level:?}")))
}

/// Map a density onto its named preset when it matches one.
pub fn density_preset(kg_per_m3: f64) -> DensityPreset {
    if kg_per_m3 == DENSITY_ROCKY_ICY {
        DensityPreset::RockyIcy
    } else if kg_per_m3 == DENSITY_DENSE_ROCK {
        DensityPreset::DenseRock
    } else {
        DensityPreset::Custom(kg_per_m3)
    }
}

/// NEO impact viewer command-line arguments.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "neo-impact", about = "Near-Earth object orbit and impact viewer")]
pub struct CliArgs {
    /// Path to the RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// NEO feed JSON snapshot to load.
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Impactor bulk density in kg/m³ (2500 rocky/icy, 3000 dense rock).
    #[arg(long)]
    pub density: Option<f64>,

    /// Merge diameter bounds with the arithmetic instead of the geometric mean.
    #[arg(long)]
    pub arithmetic_mean: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Config file location: `--config`, else `neo-impact.ron` in the working directory.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("neo-impact.ron"))
    }
}

impl ImpactConfig {
    /// Apply CLI overrides to a loaded config.
    ///
    /// An unusable override is skipped and returned; the loaded value for
    /// that field stays in place.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Vec<ConfigError> {
        let mut rejected = Vec::new();
        if let Some(ref feed) = args.feed {
            self.feed.path = Some(feed.clone());
        }
        if let Some(density) = args.density {
            if density.is_finite() && density > 0.0 {
                self.model.density = density_preset(density);
            } else {
                rejected.push(invalid("--density", format!("{density} kg/m³ is not positive")));
            }
        }
        if args.arithmetic_mean {
            self.model.diameter_convention = DiameterConvention::ArithmeticMean;
        }
        if let Some(ref level) = args.log_level {
            match parse_log_level(level) {
                Ok(_) => self.log_level = level.clone(),
                Err(err) => rejected.push(err),
            }
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = ImpactConfig::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("scale: 40.0"));
        assert!(ron_str.contains("RockyIcy"));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: ImpactConfig = ron::from_str("(model: (density: DenseRock))").unwrap();
        assert_eq!(config.model.density, DensityPreset::DenseRock);
        assert_eq!(config.model.albedo, DEFAULT_ALBEDO);
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<ImpactConfig, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_custom_density_parses() {
        let config: ImpactConfig = ron::from_str("(model: (density: Custom(1800.0)))").unwrap();
        assert_eq!(config.model.density.kg_per_m3(), 1800.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("neo-impact.ron");
        let mut config = ImpactConfig::default();
        config.model.diameter_convention = DiameterConvention::ArithmeticMean;
        config.orbit.scale = 25.0;
        config.feed.path = Some(PathBuf::from("feed.json"));

        config.save(&path).unwrap();
        let loaded = ImpactConfig::load_or_default(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ImpactConfig::load_or_default(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(loaded, ImpactConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        std::fs::write(&path, "(animation: (impact_step: 0.0))").unwrap();
        let err = ImpactConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "animation.impact_step", .. }));

        std::fs::write(&path, "{{not valid}}").unwrap();
        assert!(matches!(
            ImpactConfig::load_or_default(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_cli_override() {
        let mut config = ImpactConfig::default();
        let args = CliArgs {
            feed: Some(PathBuf::from("snapshot.json")),
            density: Some(3000.0),
            arithmetic_mean: true,
            log_level: Some("debug".into()),
            ..Default::default()
        };
        assert!(config.apply_cli_overrides(&args).is_empty());
        assert_eq!(config.feed.path, Some(PathBuf::from("snapshot.json")));
        assert_eq!(config.model.density, DensityPreset::DenseRock);
        assert_eq!(config.model.diameter_convention, DiameterConvention::ArithmeticMean);
        assert_eq!(config.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.orbit, OrbitConfig::default());
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = ImpactConfig::default();
        assert!(config.apply_cli_overrides(&CliArgs::default()).is_empty());
        assert_eq!(config, ImpactConfig::default());
    }

    #[test]
    fn test_bad_cli_override_keeps_loaded_value() {
        let mut config = ImpactConfig::default();
        config.model.density = DensityPreset::DenseRock;
        config.orbit.scale = 25.0;
        config.log_level = "warn".into();
        let args = CliArgs {
            feed: Some(PathBuf::from("snapshot.json")),
            density: Some(-5.0),
            log_level: Some("loud".into()),
            ..Default::default()
        };

        let rejected = config.apply_cli_overrides(&args);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(rejected[0], ConfigError::Invalid { field: "--density", .. }));
        assert!(matches!(rejected[1], ConfigError::Invalid { field: "log_level", .. }));

        // Good overrides still apply, bad ones leave the loaded values
        assert_eq!(config.feed.path, Some(PathBuf::from("snapshot.json")));
        assert_eq!(config.model.density, DensityPreset::DenseRock);
        assert_eq!(config.orbit.scale, 25.0);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = ImpactConfig::default();
        assert_eq!(config.parsed_log_level().unwrap(), Level::INFO);
        config.log_level = "DEBUG".into();
        assert_eq!(config.parsed_log_level().unwrap(), Level::DEBUG);
        config.log_level = "chatty".into();
        assert!(matches!(
            config.parsed_log_level(),
            Err(ConfigError::Invalid { field: "log_level", .. })
        ));
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["neo-impact", "--density", "1800", "--arithmetic-mean"]);
        assert_eq!(args.density, Some(1800.0));
        assert!(args.arithmetic_mean);
        assert_eq!(args.config_path(), PathBuf::from("neo-impact.ron"));
    }

    #[test]
    fn test_derived_settings() {
        let config = ImpactConfig::default();
        assert_eq!(config.animator_settings(), AnimatorSettings::default());
        assert_eq!(config.impact_model(), ImpactModel::default());
    }
}
