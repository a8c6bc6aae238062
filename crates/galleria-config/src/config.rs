//! Configuration sections, their defaults, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level gallery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Ring geometry of the gallery.
    pub layout: LayoutConfig,
    /// Camera controls and timing.
    pub interaction: InteractionConfig,
    pub lighting: LightingConfig,
    /// Governor thresholds and sampling.
    pub performance: PerformanceConfig,
    /// Scripted tour run by the binary.
    pub tour: TourConfig,
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    pub title: String,
}

/// Gallery ring geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_radius: f32,
    /// Arc length reserved per frame, in meters.
    pub spacing_per_item: f32,
    pub max_per_layer: usize,
    pub wall_height: f32,
    /// Height of the first ring.
    pub frame_height: f32,
    pub layer_spacing: f32,
    pub wall_segments: u32,
    pub spotlight_count: usize,
}

/// Camera interaction settings. Angles are in degrees unless suffixed `_rad`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians per pixel of drag.
    pub rotation_speed_rad: f32,
    pub key_yaw_step_rad: f32,
    pub key_pitch_step_rad: f32,
    pub pitch_limit_deg: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    pub home_fov_deg: f32,
    /// Field-of-view change per wheel line.
    pub wheel_fov_step_deg: f32,
    /// Seconds.
    pub double_tap_window: f64,
    /// Seconds of inactivity before auto-rotation.
    pub auto_rotate_delay: f64,
    /// Radians per second.
    pub auto_rotate_speed: f32,
    /// Seconds.
    pub animation_duration: f64,
    /// Meters in front of a frame when focused.
    pub focus_distance: f32,
    /// Pixels of travel still treated as a click.
    pub click_slop: f32,
}

/// Light rig configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Theme name: `default`, `gallery`, `dramatic` or `soft`.
    pub theme: String,
    /// Spotlight focus transition, seconds.
    pub focus_duration: f64,
    /// Focused spotlight intensity relative to its baseline.
    pub focus_intensity_gain: f32,
    /// Focused cone angle relative to its baseline.
    pub focus_angle_scale: f32,
}

/// Performance thresholds and sampling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    pub min_fps: f32,
    pub max_frame_time_ms: f32,
    /// Used over available memory.
    pub max_memory_ratio: f32,
    pub max_draw_calls: u32,
    /// Seconds between threshold checks.
    pub sample_interval: f64,
    /// Frame-time figures kept for averaging.
    pub history_length: usize,
}

/// Headless tour run by the `galleria` binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TourConfig {
    /// Placeholder items generated when no manifest is given.
    pub items: usize,
    /// RON manifest listing the exhibited items.
    pub manifest: Option<PathBuf>,
    /// Simulated seconds.
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Galleria".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_radius: 8.0,
            spacing_per_item: 2.0,
            max_per_layer: 16,
            wall_height: 8.0,
            frame_height: 1.6,
            layer_spacing: 2.0,
            wall_segments: 64,
            spotlight_count: 6,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rotation_speed_rad: 0.005,
            key_yaw_step_rad: 0.1,
            key_pitch_step_rad: 0.05,
            pitch_limit_deg: 30.0,
            fov_min_deg: 30.0,
            fov_max_deg: 90.0,
            home_fov_deg: 75.0,
            wheel_fov_step_deg: 2.0,
            double_tap_window: 0.3,
            auto_rotate_delay: 10.0,
            auto_rotate_speed: 0.06,
            animation_duration: 1.0,
            focus_distance: 3.0,
            click_slop: 4.0,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            focus_duration: 0.5,
            focus_intensity_gain: 1.75,
            focus_angle_scale: 0.6,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            min_fps: 30.0,
            max_frame_time_ms: 33.0,
            max_memory_ratio: 0.8,
            max_draw_calls: 1000,
            sample_interval: 1.0,
            history_length: 10,
        }
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            items: 12,
            manifest: None,
            duration: 30.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Per-user config directory, e.g. `~/.config/galleria` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("galleria"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
