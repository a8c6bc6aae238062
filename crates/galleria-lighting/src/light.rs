//! Light kinds as a tagged enum, so code branches on explicit variants
//! instead of inspecting light types at runtime.

use std::fmt;

use galleria_assets::rgb_from_hex;
use glam::Vec3;
use serde::Serialize;

/// Stable name of a light within a rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LightId {
    Ambient,
    Directional,
    Spot(usize),
    Point(usize),
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightId::Ambient => write!(f, "ambient"),
            LightId::Directional => write!(f, "directional"),
            LightId::Spot(i) => write!(f, "spotlight_{i}"),
            LightId::Point(i) => write!(f, "pointlight_{i}"),
        }
    }
}

/// Shadow configuration for shadow-casting lights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShadowSettings {
    pub cast: bool,
    /// Shadow map edge length in texels.
    pub map_size: u32,
}

/// Spotlight cone and placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpotParams {
    pub position: Vec3,
    pub target: Vec3,
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Fraction of the cone that is attenuated, 0..=1.
    pub penumbra: f32,
    /// Maximum range in meters; 0 means unlimited.
    pub distance: f32,
    pub cast_shadow: bool,
}

/// Kind-specific light data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional { position: Vec3, shadow: ShadowSettings },
    Spot(SpotParams),
    Point { position: Vec3 },
}

/// One light: color, intensity, and kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Light {
    /// RGB in `[0, 1]`.
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Self {
            color: rgb_from_hex(hex),
            intensity,
            kind: LightKind::Ambient,
        }
    }

    pub fn directional(hex: u32, intensity: f32, position: Vec3, shadow: ShadowSettings) -> Self {
        Self {
            color: rgb_from_hex(hex),
            intensity,
            kind: LightKind::Directional { position, shadow },
        }
    }

    pub fn spot(hex: u32, intensity: f32, params: SpotParams) -> Self {
        Self {
            color: rgb_from_hex(hex),
            intensity,
            kind: LightKind::Spot(params),
        }
    }

    pub fn point(hex: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            color: rgb_from_hex(hex),
            intensity,
            kind: LightKind::Point { position },
        }
    }

    /// Spotlight parameters, if this is a spotlight.
    pub fn spot_params(&self) -> Option<&SpotParams> {
        match &self.kind {
            LightKind::Spot(params) => Some(params),
            _ => None,
        }
    }

    pub fn spot_params_mut(&mut self) -> Option<&mut SpotParams> {
        match &mut self.kind {
            LightKind::Spot(params) => Some(params),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_color_from_hex() {
        let light = Light::ambient(0xffd700, 0.5);
        assert_eq!(light.color, rgb_from_hex(0xffd700));
        assert!((light.color.y - 215.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_light_id_names() {
        assert_eq!(LightId::Spot(3).to_string(), "spotlight_3");
        assert_eq!(LightId::Point(0).to_string(), "pointlight_0");
        assert_eq!(LightId::Ambient.to_string(), "ambient");
    }

    #[test]
    fn test_spot_params_only_on_spotlights() {
        assert!(Light::ambient(0xffffff, 0.4).spot_params().is_none());
        let spot = Light::spot(
            0xffffff,
            1.5,
            SpotParams {
                position: Vec3::new(0.0, 7.5, 0.0),
                target: Vec3::ZERO,
                angle: 0.5,
                penumbra: 0.4,
                distance: 20.0,
                cast_shadow: true,
            },
        );
        assert!((spot.spot_params().unwrap().angle - 0.5).abs() < f32::EPSILON);
    }
}
