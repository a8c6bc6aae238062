//! Generation-based cancellation.
//!
//! A [`CancellationSource`] hands out [`CancellationToken`]s. Issuing a new
//! token, or calling [`CancellationSource::cancel_all`], invalidates every
//! token issued before it, so at most one continuation per source is live.

use std::cell::Cell;
use std::rc::Rc;

/// Issues tokens for one logical activity (camera motion, light transition).
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    generation: Rc<Cell<u64>>,
}

impl CancellationSource {
    /// Create a source with no live tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token, cancelling every earlier one.
    pub fn issue(&self) -> CancellationToken {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        CancellationToken {
            generation: Rc::clone(&self.generation),
            issued: next,
        }
    }

    /// Cancel every outstanding token without issuing a new one.
    pub fn cancel_all(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Current generation counter.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

/// Proof that a continuation is still the most recent one for its source.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl CancellationToken {
    /// Returns `true` once the issuing source has moved past this token.
    pub fn is_cancelled(&self) -> bool {
        self.generation.get() != self.issued
    }
}
