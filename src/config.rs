//! Game configuration
//!
//! JSON config with every field defaulted, so a file only needs the values it
//! changes:
//!
//! ```json
//! { "variant": "shapes", "round": { "duration_ms": 60000 } }
//! ```
//!
//! Lookup order is: explicit `--config` path, then
//! `<config dir>/falling-catch/config.json`, then built-in defaults.

use crate::matcher::ClickScoring;
use crate::round::RoundRules;
use crate::spawner::SpawnSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "falling-catch";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Which of the two games to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Images from the asset directory, plain click scoring
    #[default]
    Sprites,
    /// Procedural shapes that expire, combo click scoring
    Shapes,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sprites => "sprites",
            Variant::Shapes => "shapes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1000,
            height: 800,
            title: "Falling Catch".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub duration_ms: u64,
    pub spawn_interval_ms: u64,
    /// Pixels per frame
    pub fall_speed: f32,
    pub target_fps: u32,
    /// Redraw rate of the menu and game-over screens
    pub menu_fps: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            duration_ms: 30_000,
            spawn_interval_ms: 1000,
            fall_speed: 3.0,
            target_fps: 60,
            menu_fps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub radius_min: u32,
    pub radius_max: u32,
    pub lifespan_ms: u64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig {
            radius_min: 30,
            radius_max: 100,
            lifespan_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    pub double_click_ms: u64,
    pub double_click_distance_sq: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        ClickConfig {
            double_click_ms: 300,
            double_click_distance_sq: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub round: RoundConfig,
    pub variant: Variant,
    pub assets_dir: PathBuf,
    pub shapes: ShapeConfig,
    pub clicks: ClickConfig,
    /// RNG seed; `None` picks a fresh one each launch
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            window: WindowConfig::default(),
            round: RoundConfig::default(),
            variant: Variant::default(),
            assets_dir: PathBuf::from("pokemon_dataset/images"),
            shapes: ShapeConfig::default(),
            clicks: ClickConfig::default(),
            seed: None,
        }
    }
}

/// Errors loading or validating a config
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

impl GameConfig {
    /// Reads and validates a config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config the game should run with.
    ///
    /// An explicit path must exist and be valid. The default location is
    /// optional: if it's missing or broken the built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Ok(Self::default())
                }
            },
            _ => Ok(Self::default()),
        }
    }

    /// Rejects configs the game can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if self.round.duration_ms == 0 {
            return Err(ConfigError::Invalid("round duration must be non-zero".into()));
        }
        if self.round.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("spawn interval must be non-zero".into()));
        }
        if self.round.target_fps == 0 || self.round.menu_fps == 0 {
            return Err(ConfigError::Invalid("frame rates must be non-zero".into()));
        }
        if !(self.round.fall_speed > 0.0) {
            return Err(ConfigError::Invalid("fall speed must be positive".into()));
        }
        if self.shapes.radius_min > self.shapes.radius_max {
            return Err(ConfigError::Invalid(format!(
                "shape radius_min {} exceeds radius_max {}",
                self.shapes.radius_min, self.shapes.radius_max
            )));
        }
        if self.shapes.radius_max > self.window.width / 2 {
            return Err(ConfigError::Invalid(format!(
                "shapes of radius {} don't fit a {}px wide window",
                self.shapes.radius_max, self.window.width
            )));
        }
        Ok(())
    }

    /// Spawner settings for this config
    pub fn spawn_settings(&self) -> SpawnSettings {
        SpawnSettings {
            spawn_interval_ms: self.round.spawn_interval_ms,
            fall_speed: self.round.fall_speed,
            width: self.window.width,
            shape_radius: (self.shapes.radius_min, self.shapes.radius_max),
        }
    }

    /// Round rules for this config's variant
    pub fn round_rules(&self) -> RoundRules {
        let (lifespan_ms, click_scoring, show_elapsed) = match self.variant {
            Variant::Sprites => (None, ClickScoring::Single, false),
            Variant::Shapes => (
                Some(self.shapes.lifespan_ms),
                ClickScoring::Combo {
                    window_ms: self.clicks.double_click_ms,
                    max_distance_sq: self.clicks.double_click_distance_sq,
                },
                true,
            ),
        };

        RoundRules {
            duration_ms: self.round.duration_ms,
            width: self.window.width,
            height: self.window.height,
            lifespan_ms,
            click_scoring,
            show_elapsed,
        }
    }
}
