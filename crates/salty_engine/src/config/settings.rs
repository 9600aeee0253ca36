//! Scene and engine settings

use super::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gravity acceleration a fresh scene starts with
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Friction coefficient a fresh scene starts with
pub const DEFAULT_FRICTION: f32 = 0.5;

/// Initial simulation parameters of a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Gravity magnitude
    pub gravity: f32,

    /// Friction coefficient
    pub friction: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl Config for SceneConfig {}

/// Driver settings for the fixed-tick and render loops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one simulation tick in milliseconds
    pub fixed_tick_millis: u64,

    /// Upper bound of catch-up ticks run back to back before backlog is dropped
    pub max_ticks_per_frame: u32,

    /// Minimum frame length in milliseconds; 0 renders as fast as possible
    pub frame_millis: u64,

    /// Run ticks on a dedicated thread instead of between frames
    pub threaded_ticks: bool,

    /// Initial scene parameters
    pub scene: SceneConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_tick_millis: 1,
            max_ticks_per_frame: 5,
            frame_millis: 16,
            threaded_ticks: false,
            scene: SceneConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Length of one simulation tick
    pub fn fixed_tick(&self) -> Duration {
        Duration::from_millis(self.fixed_tick_millis.max(1))
    }

    /// Minimum frame length, `None` when uncapped
    pub fn frame_time(&self) -> Option<Duration> {
        (self.frame_millis > 0).then(|| Duration::from_millis(self.frame_millis))
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("salty_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str("fixed_tick_millis = 16\n").unwrap();
        assert_eq!(config.fixed_tick_millis, 16);
        assert_eq!(config.max_ticks_per_frame, 5);
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.fixed_tick(), Duration::from_millis(16));
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = temp_path("engine.ron");
        let config = EngineConfig {
            fixed_tick_millis: 10,
            max_ticks_per_frame: 3,
            frame_millis: 0,
            threaded_ticks: true,
            scene: SceneConfig {
                gravity: 1.5,
                friction: 0.25,
            },
        };

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::default().save_to_file(temp_path("scene.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let config = EngineConfig {
            fixed_tick_millis: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.fixed_tick(), Duration::from_millis(1));
    }

    #[test]
    fn test_uncapped_frames() {
        let config: EngineConfig = toml::from_str("frame_millis = 0\nthreaded_ticks = true\n").unwrap();
        assert!(config.threaded_ticks);
        assert_eq!(config.frame_time(), None);
        assert_eq!(EngineConfig::default().frame_time(), Some(Duration::from_millis(16)));
    }
}
