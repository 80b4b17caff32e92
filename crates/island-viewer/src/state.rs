//! State management for the island viewer.
//!
//! Contains resource types, runtime configuration and the marker components
//! used by the UI systems.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use island_core::engine::GameEngine;
use island_logic::audio::{MUSIC_VOLUME, SFX_VOLUME};
use island_logic::difficulty::Difficulty;
use serde::Deserialize;

// ============================================================================
// RESOURCES
// ============================================================================

/// The running round
#[derive(Resource)]
pub struct GameWrapper {
    pub engine: GameEngine,
}

/// Runtime settings assembled from the command line and an optional JSON file
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub seed: u64,
    pub config_path: Option<PathBuf>,
    pub muted: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub start_difficulty: Difficulty,
    pub save_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            config_path: None,
            muted: false,
            music_volume: MUSIC_VOLUME,
            sfx_volume: SFX_VOLUME,
            start_difficulty: Difficulty::Survivor,
            save_path: PathBuf::from("island.sav"),
        }
    }
}

/// Optional overrides read from `--config <file>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    seed: Option<u64>,
    muted: Option<bool>,
    music_volume: Option<f32>,
    sfx_volume: Option<f32>,
    difficulty: Option<Difficulty>,
    save_path: Option<PathBuf>,
}

impl ViewerConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args)
    }

    /// Parse a full argument list, program name first.
    ///
    /// Flags given on the command line win over the config file.
    pub fn from_arg_list(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut seed = None;
        let mut muted = false;
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" if i + 1 < args.len() => {
                    let value = &args[i + 1];
                    seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| ConfigError::BadValue(format!("--seed {}", value)))?,
                    );
                    i += 2;
                }
                "--config" | "-c" if i + 1 < args.len() => {
                    config.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                }
                "--mute" => {
                    muted = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        if let Some(path) = config.config_path.clone() {
            config.apply_file(&path)?;
        }
        if let Some(seed) = seed {
            config.seed = seed;
        }
        config.muted |= muted;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path)?;
        self.apply_json(&text)
    }

    fn apply_json(&mut self, text: &str) -> Result<(), ConfigError> {
        let file: FileConfig = serde_json::from_str(text)?;
        if let Some(seed) = file.seed {
            self.seed = seed;
        }
        if let Some(muted) = file.muted {
            self.muted = muted;
        }
        if let Some(v) = file.music_volume {
            self.music_volume = v.clamp(0.0, 1.0);
        }
        if let Some(v) = file.sfx_volume {
            self.sfx_volume = v.clamp(0.0, 1.0);
        }
        if let Some(difficulty) = file.difficulty {
            self.start_difficulty = difficulty;
        }
        if let Some(path) = file.save_path {
            self.save_path = path;
        }
        Ok(())
    }
}

/// Errors from assembling the viewer configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    BadValue(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::BadValue(arg) => write!(f, "Bad value for {}", arg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// COMPONENTS
// ============================================================================

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct TaskPanel;

#[derive(Component)]
pub struct MessageBanner;

/// Victory and game-over headline
#[derive(Component)]
pub struct EndBanner;

#[derive(Component)]
pub struct MenuText;

/// Glyph floating above a pickup, respawned every frame
#[derive(Component)]
pub struct ItemMarker;

/// Full-screen tint for zone gloom and the hit flicker
#[derive(Component)]
pub struct GloomOverlay;

#[derive(Component)]
pub struct DamageOverlay;

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("island-viewer")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = ViewerConfig::from_arg_list(&args(&[])).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.start_difficulty, Difficulty::Survivor);
        assert_eq!(config.save_path, PathBuf::from("island.sav"));
    }

    #[test]
    fn test_seed_and_mute_flags() {
        let config = ViewerConfig::from_arg_list(&args(&["--seed", "7", "--mute"])).unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.muted);
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        let result = ViewerConfig::from_arg_list(&args(&["--seed", "lots"]));
        assert!(matches!(result, Err(ConfigError::BadValue(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ViewerConfig::from_arg_list(&args(&["--config", "/no/such/island.json"]));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_json_overrides() {
        let mut config = ViewerConfig::default();
        config
            .apply_json(r#"{ "music_volume": 2.0, "sfx_volume": 0.25, "difficulty": "Nightmare" }"#)
            .unwrap();
        assert_eq!(config.music_volume, 1.0);
        assert_eq!(config.sfx_volume, 0.25);
        assert_eq!(config.start_difficulty, Difficulty::Nightmare);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_malformed_json() {
        let mut config = ViewerConfig::default();
        assert!(matches!(
            config.apply_json("{ music_volume: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
