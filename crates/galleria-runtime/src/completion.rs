//! Completion signals for fire-and-forget transitions.

use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of a transition that reports when it is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionState {
    /// Still running.
    Pending,
    /// Ran to the end (or had nothing to do).
    Completed,
    /// Cancelled because a newer transition took over.
    Superseded,
}

/// Shared handle observing one transition. Clones observe the same state.
///
/// The first settle wins; later calls to [`complete`](Self::complete) or
/// [`supersede`](Self::supersede) are ignored.
#[derive(Clone, Debug)]
pub struct Completion {
    state: Rc<Cell<CompletionState>>,
}

impl Completion {
    /// A handle for a transition that is still running.
    pub fn pending() -> Self {
        Self {
            state: Rc::new(Cell::new(CompletionState::Pending)),
        }
    }

    /// A handle that is already complete.
    pub fn completed() -> Self {
        Self {
            state: Rc::new(Cell::new(CompletionState::Completed)),
        }
    }

    /// Current state.
    pub fn state(&self) -> CompletionState {
        self.state.get()
    }

    /// `true` once the transition ran to completion.
    pub fn is_complete(&self) -> bool {
        self.state.get() == CompletionState::Completed
    }

    /// `true` once the transition is no longer pending, for any reason.
    pub fn is_settled(&self) -> bool {
        self.state.get() != CompletionState::Pending
    }

    /// Mark as completed if still pending.
    pub fn complete(&self) {
        if self.state.get() == CompletionState::Pending {
            self.state.set(CompletionState::Completed);
        }
    }

    /// Mark as superseded if still pending.
    pub fn supersede(&self) {
        if self.state.get() == CompletionState::Pending {
            self.state.set(CompletionState::Superseded);
        }
    }
}
