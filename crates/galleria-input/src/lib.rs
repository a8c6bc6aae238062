//! Input model for gallery navigation: pointer, touch, and keyboard events,
//! click-versus-drag detection, and multi-touch gesture sessions.

pub mod event;
pub mod gesture;
pub mod keyboard;
pub mod pointer;
pub mod viewport;

pub use event::InputEvent;
pub use gesture::{GestureEvent, GestureSession, GestureTracker, TouchPoint};
pub use keyboard::NavigationKey;
pub use pointer::{PointerButtonEvent, PointerState};
pub use viewport::Viewport;
