//! Light sink that keeps a record of the attached lights and traces every
//! change. Stands in for a renderer scene in the headless tour.

use std::collections::BTreeMap;

use galleria_lighting::{Light, LightId, LightSink};
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct TracingLightSink {
    attached: BTreeMap<LightId, Light>,
    updates: u64,
}

impl TracingLightSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lights currently in the scene.
    pub fn attached(&self) -> usize {
        self.attached.len()
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.attached.get(&id)
    }

    /// Number of `update` calls received.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl LightSink for TracingLightSink {
    fn attach(&mut self, id: LightId, light: &Light) {
        debug!(light = %id, intensity = light.intensity, "light attached");
        self.attached.insert(id, *light);
    }

    fn update(&mut self, id: LightId, light: &Light) {
        trace!(light = %id, intensity = light.intensity, "light updated");
        self.updates += 1;
        self.attached.insert(id, *light);
    }

    fn detach(&mut self, id: LightId) {
        debug!(light = %id, "light detached");
        self.attached.remove(&id);
    }
}
