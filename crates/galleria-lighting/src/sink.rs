use crate::light::{Light, LightId};

/// Scene-side capability that mirrors the rig. The director calls `attach`
/// once per light on initialization, `update` whenever a light's parameters
/// change, and `detach` on teardown.
pub trait LightSink {
    fn attach(&mut self, id: LightId, light: &Light);
    fn update(&mut self, id: LightId, light: &Light);
    fn detach(&mut self, id: LightId);
}
