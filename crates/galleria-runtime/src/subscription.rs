//! Event channels with explicit subscription handles.
//!
//! [`EventChannel::subscribe`] returns a [`Subscription`]; dropping or
//! releasing the handle unregisters the listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct ChannelInner<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// A single-threaded broadcast channel for events of type `E`.
pub struct EventChannel<E> {
    inner: Rc<RefCell<ChannelInner<E>>>,
}

impl<E: 'static> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

impl<E: 'static> EventChannel<E> {
    /// Create a channel with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered while the returned handle lives.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let listener: Listener<E> = Rc::new(RefCell::new(listener));
            inner.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<ChannelInner<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    pub fn emit(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())(event);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle keeping a listener registered. Unregisters on drop.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Subscription {
    /// Unregister now.
    pub fn release(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Keep the listener registered for the lifetime of the channel.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listener_receives_events() {
        let channel = EventChannel::<u32>::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _sub = channel.subscribe(move |v| sink.set(sink.get() + *v));
        channel.emit(&2);
        channel.emit(&3);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let channel = EventChannel::<u32>::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let sub = channel.subscribe(move |_| sink.set(sink.get() + 1));
        assert_eq!(channel.listener_count(), 1);
        drop(sub);
        assert_eq!(channel.listener_count(), 0);
        channel.emit(&1);
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_release_only_removes_its_own_listener() {
        let channel = EventChannel::<u32>::new();
        let a = channel.subscribe(|_| {});
        let _b = channel.subscribe(|_| {});
        a.release();
        assert_eq!(channel.listener_count(), 1);
    }

    #[test]
    fn test_detach_keeps_listener() {
        let channel = EventChannel::<u32>::new();
        channel.subscribe(|_| {}).detach();
        assert_eq!(channel.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_channel_is_harmless() {
        let channel = EventChannel::<u32>::new();
        let sub = channel.subscribe(|_| {});
        drop(channel);
        drop(sub);
    }
}
