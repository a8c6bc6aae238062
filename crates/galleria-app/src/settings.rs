//! Maps the persisted [`Config`] onto the settings each subsystem takes.

use glam::Vec3;

use galleria_camera::InteractionSettings;
use galleria_config::Config;
use galleria_input::Viewport;
use galleria_layout::LayoutOptions;
use galleria_lighting::{FocusSettings, LightTheme, ThemeParseError};
use galleria_perf::{PerformanceThresholds, SamplingSettings};

use crate::tour::TourSettings;

pub fn viewport(config: &Config) -> Viewport {
    Viewport::new(config.window.width as f32, config.window.height as f32)
}

pub fn layout_options(config: &Config) -> LayoutOptions {
    let layout = &config.layout;
    LayoutOptions {
        min_radius: layout.min_radius,
        spacing_per_item: layout.spacing_per_item,
        max_per_layer: layout.max_per_layer,
        wall_height: layout.wall_height,
        frame_height: layout.frame_height,
        layer_spacing: layout.layer_spacing,
        wall_segments: layout.wall_segments,
        spotlight_count: layout.spotlight_count,
    }
}

/// The home position stands at the gallery center at frame height.
pub fn interaction_settings(config: &Config) -> InteractionSettings {
    let i = &config.interaction;
    InteractionSettings {
        rotation_speed: i.rotation_speed_rad,
        key_yaw_step: i.key_yaw_step_rad,
        key_pitch_step: i.key_pitch_step_rad,
        pitch_limit: i.pitch_limit_deg.to_radians(),
        fov_min_deg: i.fov_min_deg,
        fov_max_deg: i.fov_max_deg,
        wheel_fov_step_deg: i.wheel_fov_step_deg,
        home_position: Vec3::new(0.0, config.layout.frame_height, 0.0),
        home_fov_deg: i.home_fov_deg,
        double_tap_window: i.double_tap_window,
        auto_rotate_delay: i.auto_rotate_delay,
        auto_rotate_speed: i.auto_rotate_speed,
        animation_duration: i.animation_duration,
        focus_distance: i.focus_distance,
        click_slop: i.click_slop,
        ..InteractionSettings::default()
    }
}

pub fn focus_settings(config: &Config) -> FocusSettings {
    FocusSettings {
        duration: config.lighting.focus_duration,
        intensity_gain: config.lighting.focus_intensity_gain,
        angle_scale: config.lighting.focus_angle_scale,
    }
}

pub fn theme(config: &Config) -> Result<LightTheme, ThemeParseError> {
    config.lighting.theme.parse()
}

pub fn thresholds(config: &Config) -> PerformanceThresholds {
    let p = &config.performance;
    PerformanceThresholds {
        min_fps: p.min_fps,
        max_frame_time_ms: p.max_frame_time_ms,
        max_memory_ratio: p.max_memory_ratio,
        max_draw_calls: p.max_draw_calls,
    }
}

pub fn sampling(config: &Config) -> SamplingSettings {
    SamplingSettings {
        interval: config.performance.sample_interval,
        history: config.performance.history_length,
        ..SamplingSettings::default()
    }
}

/// Everything a [`Tour`](crate::tour::Tour) needs. Fails only on an unknown theme name.
pub fn tour_settings(config: &Config) -> Result<TourSettings, ThemeParseError> {
    Ok(TourSettings {
        viewport: viewport(config),
        interaction: interaction_settings(config),
        focus: focus_settings(config),
        theme: theme(config)?,
        thresholds: thresholds(config),
        sampling: sampling(config),
        ..TourSettings::default()
    })
}
