//! Gallery camera navigation: the interaction state machine that turns pointer,
//! touch, and keyboard input into camera motion, hover, and selection.
//!
//! The [`InteractionController`] owns the camera. External code feeds it input
//! with [`InteractionController::push_input`], drives it with
//! [`InteractionController::tick`], and observes it through event
//! subscriptions or [`InteractionController::state`] snapshots.

mod controller;
mod events;
mod settings;
mod state;
mod transition;

pub use controller::InteractionController;
pub use events::{HoverChanged, SelectionChanged, SelectionSource};
pub use hit_test::{HitTarget, Ray, RayHit, nearest_hit};
pub use settings::InteractionSettings;
pub use state::{CameraPose, CameraState, NavigationMode};
pub use transition::CameraTransition;
