//! Lighting presets. Every theme shares the default topology and overrides
//! ambient, directional, and spotlight parameters.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, FRAC_PI_8, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use galleria_layout::LightAnchor;
use serde::{Deserialize, Serialize};

use crate::light::{Light, ShadowSettings, SpotParams};

/// Named lighting preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightTheme {
    #[default]
    Default,
    Gallery,
    Dramatic,
    Soft,
}

impl LightTheme {
    pub const ALL: [LightTheme; 4] = [
        LightTheme::Default,
        LightTheme::Gallery,
        LightTheme::Dramatic,
        LightTheme::Soft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LightTheme::Default => "default",
            LightTheme::Gallery => "gallery",
            LightTheme::Dramatic => "dramatic",
            LightTheme::Soft => "soft",
        }
    }
}

impl fmt::Display for LightTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown lighting theme `{0}` (expected default, gallery, dramatic, or soft)")]
pub struct ThemeParseError(pub String);

impl FromStr for LightTheme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == lower)
            .ok_or_else(|| ThemeParseError(s.to_string()))
    }
}

/// The full light topology of one rig.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LightConfig {
    pub ambient: Light,
    pub directional: Light,
    pub spotlights: Vec<Light>,
    pub point_lights: Vec<Light>,
}

const WHITE: u32 = 0xffffff;
const SPOT_PENUMBRA: f32 = 0.4;
const SPOT_DISTANCE: f32 = 20.0;

/// Six spotlights on a 6 m ring near the ceiling, aimed at eye height.
/// Used when no layout has been computed yet.
pub fn default_spot_anchors() -> Vec<LightAnchor> {
    (0..6)
        .map(|i| {
            let angle = i as f32 / 6.0 * TAU;
            LightAnchor {
                position: Vec3::new(6.0 * angle.cos(), 7.5, 6.0 * angle.sin()),
                target: Vec3::new(0.0, 1.6, 0.0),
            }
        })
        .collect()
}

impl LightConfig {
    /// Build the topology for `theme` with one spotlight per anchor.
    pub fn themed(theme: LightTheme, anchors: &[LightAnchor]) -> Self {
        let mut config = Self::default_with_anchors(anchors);
        match theme {
            LightTheme::Default => {}
            LightTheme::Gallery => {
                config.ambient.intensity = 0.5;
                config.directional.intensity = 1.0;
                config.restyle_spots(2.0, FRAC_PI_6, None);
            }
            LightTheme::Dramatic => {
                config.ambient.intensity = 0.2;
                config.directional =
                    Light::directional(0xffcc99, 0.6, directional_position(), directional_shadow());
                config.restyle_spots(3.0, FRAC_PI_8, Some(0.2));
                config.point_lights = vec![Light::point(0xff6b6b, 0.8, Vec3::new(0.0, 6.0, 0.0))];
            }
            LightTheme::Soft => {
                config.ambient = Light::ambient(0xfff5e6, 0.6);
                config.directional =
                    Light::directional(0xfff5e6, 0.4, directional_position(), directional_shadow());
                config.restyle_spots(1.0, FRAC_PI_3, Some(0.8));
            }
        }
        config
    }

    fn default_with_anchors(anchors: &[LightAnchor]) -> Self {
        let spotlights = anchors
            .iter()
            .map(|anchor| {
                Light::spot(
                    WHITE,
                    1.5,
                    SpotParams {
                        position: anchor.position,
                        target: anchor.target,
                        angle: FRAC_PI_4,
                        penumbra: SPOT_PENUMBRA,
                        distance: SPOT_DISTANCE,
                        cast_shadow: true,
                    },
                )
            })
            .collect();
        Self {
            ambient: Light::ambient(WHITE, 0.4),
            directional: Light::directional(WHITE, 0.8, directional_position(), directional_shadow()),
            spotlights,
            point_lights: vec![
                Light::point(0xffd700, 0.5, Vec3::new(0.0, 6.0, 0.0)),
                Light::point(WHITE, 0.3, Vec3::new(5.0, 4.0, 5.0)),
                Light::point(WHITE, 0.3, Vec3::new(-5.0, 4.0, -5.0)),
            ],
        }
    }

    fn restyle_spots(&mut self, intensity: f32, angle: f32, penumbra: Option<f32>) {
        for spot in &mut self.spotlights {
            spot.intensity = intensity;
            if let Some(params) = spot.spot_params_mut() {
                params.angle = angle;
                if let Some(penumbra) = penumbra {
                    params.penumbra = penumbra;
                }
            }
        }
    }

    /// Number of lights in the topology.
    pub fn light_count(&self) -> usize {
        2 + self.spotlights.len() + self.point_lights.len()
    }
}

fn directional_position() -> Vec3 {
    Vec3::new(10.0, 10.0, 5.0)
}

fn directional_shadow() -> ShadowSettings {
    ShadowSettings {
        cast: true,
        map_size: 2048,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_names() {
        assert_eq!("gallery".parse::<LightTheme>(), Ok(LightTheme::Gallery));
        assert_eq!(" Dramatic ".parse::<LightTheme>(), Ok(LightTheme::Dramatic));
        assert_eq!(
            "neon".parse::<LightTheme>(),
            Err(ThemeParseError("neon".to_string()))
        );
    }

    #[test]
    fn test_default_topology() {
        let config = LightConfig::themed(LightTheme::Default, &default_spot_anchors());
        assert_eq!(config.spotlights.len(), 6);
        assert_eq!(config.point_lights.len(), 3);
        assert_eq!(config.light_count(), 11);
        let spot = config.spotlights[0].spot_params().unwrap();
        assert!((spot.angle - FRAC_PI_4).abs() < 1e-6);
        assert!((spot.position - Vec3::new(6.0, 7.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_dramatic_theme_overrides() {
        let config = LightConfig::themed(LightTheme::Dramatic, &default_spot_anchors());
        assert!((config.ambient.intensity - 0.2).abs() < 1e-6);
        assert!((config.directional.intensity - 0.6).abs() < 1e-6);
        assert_eq!(config.point_lights.len(), 1);
        let spot = config.spotlights[3].spot_params().unwrap();
        assert!((config.spotlights[3].intensity - 3.0).abs() < 1e-6);
        assert!((spot.angle - FRAC_PI_8).abs() < 1e-6);
        assert!((spot.penumbra - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_soft_theme_keeps_default_point_lights() {
        let config = LightConfig::themed(LightTheme::Soft, &default_spot_anchors());
        assert_eq!(config.point_lights.len(), 3);
        let spot = config.spotlights[0].spot_params().unwrap();
        assert!((spot.penumbra - 0.8).abs() < 1e-6);
        assert!((spot.angle - FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_spot_count_follows_anchors() {
        let anchors = &default_spot_anchors()[..2];
        let config = LightConfig::themed(LightTheme::Gallery, anchors);
        assert_eq!(config.spotlights.len(), 2);
    }
}
