//! Single-threaded cooperative runtime primitives shared by the gallery subsystems:
//! the easing curve, tick-driven timers, cancellation tokens, a per-tick task scheduler,
//! completion signals, and event channels with drop-to-unsubscribe handles.

pub mod completion;
pub mod easing;
pub mod scheduler;
pub mod subscription;
pub mod timer;
pub mod token;

pub use completion::{Completion, CompletionState};
pub use easing::ease_in_out_cubic;
pub use scheduler::{TaskStatus, TickScheduler};
pub use subscription::{EventChannel, Subscription};
pub use timer::{Countdown, Interval};
pub use token::{CancellationSource, CancellationToken};
