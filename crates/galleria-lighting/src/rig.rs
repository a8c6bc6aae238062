//! The set of named lights for one gallery session.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::light::{Light, LightId};
use crate::theme::LightConfig;

/// Aggregate diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LightStats {
    pub count: usize,
    pub total_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SpotBaseline {
    intensity: f32,
    angle: f32,
}

/// Named lights plus the baseline spotlight settings focus transitions return to.
#[derive(Clone, Debug)]
pub struct LightRig {
    lights: BTreeMap<LightId, Light>,
    baselines: Vec<SpotBaseline>,
    dirty: BTreeSet<LightId>,
}

impl LightRig {
    pub fn from_config(config: &LightConfig) -> Self {
        let mut lights = BTreeMap::new();
        lights.insert(LightId::Ambient, config.ambient);
        lights.insert(LightId::Directional, config.directional);
        let mut baselines = Vec::with_capacity(config.spotlights.len());
        for (i, spot) in config.spotlights.iter().enumerate() {
            lights.insert(LightId::Spot(i), *spot);
            baselines.push(SpotBaseline {
                intensity: spot.intensity,
                angle: spot.spot_params().map_or(0.0, |p| p.angle),
            });
        }
        for (i, point) in config.point_lights.iter().enumerate() {
            lights.insert(LightId::Point(i), *point);
        }
        Self {
            lights,
            baselines,
            dirty: BTreeSet::new(),
        }
    }

    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.lights.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.lights.iter().map(|(id, light)| (*id, light))
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn spot_count(&self) -> usize {
        self.baselines.len()
    }

    /// Baseline (intensity, angle) of spotlight `index`.
    pub fn spot_baseline(&self, index: usize) -> Option<(f32, f32)> {
        self.baselines.get(index).map(|b| (b.intensity, b.angle))
    }

    /// Set a spotlight's intensity and cone angle, marking it dirty on change.
    pub fn set_spot(&mut self, index: usize, intensity: f32, angle: f32) {
        let id = LightId::Spot(index);
        let Some(light) = self.lights.get_mut(&id) else {
            return;
        };
        let current_intensity = light.intensity;
        let Some(params) = light.spot_params_mut() else {
            return;
        };
        if params.angle == angle && current_intensity == intensity {
            return;
        }
        params.angle = angle;
        light.intensity = intensity;
        self.dirty.insert(id);
    }

    /// Return every spotlight to its baseline.
    pub fn restore_spots(&mut self) {
        for index in 0..self.baselines.len() {
            let SpotBaseline { intensity, angle } = self.baselines[index];
            self.set_spot(index, intensity, angle);
        }
    }

    /// Drain the ids changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<LightId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn stats(&self) -> LightStats {
        LightStats {
            count: self.lights.len(),
            total_intensity: self.lights.values().map(|l| l.intensity).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{LightTheme, default_spot_anchors};

    fn rig() -> LightRig {
        LightRig::from_config(&LightConfig::themed(LightTheme::Default, &default_spot_anchors()))
    }

    #[test]
    fn test_stats_sum_intensities() {
        let stats = rig().stats();
        assert_eq!(stats.count, 11);
        // 0.4 + 0.8 + 6 * 1.5 + 0.5 + 0.3 + 0.3
        assert!((stats.total_intensity - 11.3).abs() < 1e-4);
    }

    #[test]
    fn test_set_spot_marks_dirty_once() {
        let mut rig = rig();
        rig.set_spot(2, 2.0, 0.3);
        rig.set_spot(2, 2.0, 0.3);
        assert_eq!(rig.take_dirty(), vec![LightId::Spot(2)]);
        assert!(rig.take_dirty().is_empty());
    }

    #[test]
    fn test_restore_spots_only_touches_changed() {
        let mut rig = rig();
        rig.set_spot(4, 3.0, 0.2);
        rig.take_dirty();
        rig.restore_spots();
        assert_eq!(rig.take_dirty(), vec![LightId::Spot(4)]);
        assert!((rig.get(LightId::Spot(4)).unwrap().intensity - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_set_spot_ignores_unknown_index() {
        let mut rig = rig();
        rig.set_spot(99, 1.0, 1.0);
        assert!(rig.take_dirty().is_empty());
    }
}
