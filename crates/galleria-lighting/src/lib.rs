//! Gallery lighting: themed light topology, spotlight focus transitions, and
//! diagnostics.
//!
//! The [`LightRigDirector`] owns one [`LightRig`] per gallery session and
//! mirrors every change into a [`LightSink`], the scene-side capability that
//! actually adds, updates, and removes lights.

mod director;
mod light;
mod rig;
mod sink;
mod theme;

pub use director::{FocusSettings, LightRigDirector};
pub use galleria_assets::rgb_from_hex;
pub use light::{Light, LightId, LightKind, ShadowSettings, SpotParams};
pub use rig::{LightRig, LightStats};
pub use sink::LightSink;
pub use theme::{LightConfig, LightTheme, ThemeParseError, default_spot_anchors};
