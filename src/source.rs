//! Native event sources and the pending-event slot they write into.
//!
//! A source is handed one [`Recorder`] per subscribed event type. Recording is
//! the only thing a native handler is allowed to do; callbacks run later, from
//! the drain tick.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use std::cell::RefCell;
use std::rc::Rc;

/// Latest-wins storage for one event type. Shared between a listener group and
/// its native subscription.
pub(crate) struct PendingSlot<E> {
    latest: RefCell<Option<E>>,
}

impl<E> PendingSlot<E> {
    pub(crate) fn new() -> Self {
        Self { latest: RefCell::new(None) }
    }

    pub(crate) fn store(&self, payload: E) {
        *self.latest.borrow_mut() = Some(payload);
    }

    pub(crate) fn take(&self) -> Option<E> {
        self.latest.borrow_mut().take()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.latest.borrow().is_some()
    }
}

/// Write-only handle onto a listener group's pending slot.
pub struct Recorder<E> {
    slot: Rc<PendingSlot<E>>,
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<E> Recorder<E> {
    pub(crate) fn new(slot: Rc<PendingSlot<E>>) -> Self {
        Self { slot }
    }

    /// Store `payload` as the latest event, replacing any earlier one from the same frame.
    pub fn record(&self, payload: E) {
        self.slot.store(payload);
    }
}

/// The platform's event dispatch (e.g. `window`).
///
/// The coalescer calls `subscribe` exactly once when the first listener for a
/// type is added and `unsubscribe` when that type's group is removed.
pub trait EventSource<E> {
    fn subscribe(&mut self, event_type: &str, recorder: Recorder<E>);
    fn unsubscribe(&mut self, event_type: &str);
}

/// In-process event source for tests and headless hosts.
///
/// Cloning yields another handle onto the same subscriptions, so a caller can
/// keep one clone to emit events after handing the other to a coalescer.
pub struct ManualEventSource<E> {
    subscriptions: Rc<RefCell<Vec<(String, Recorder<E>)>>>,
}

impl<E> Clone for ManualEventSource<E> {
    fn clone(&self) -> Self {
        Self { subscriptions: Rc::clone(&self.subscriptions) }
    }
}

impl<E> Default for ManualEventSource<E> {
    fn default() -> Self {
        Self { subscriptions: Rc::new(RefCell::new(Vec::new())) }
    }
}

impl<E> ManualEventSource<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one native event. Returns `false` if nothing is subscribed to `event_type`.
    pub fn emit(&self, event_type: &str, payload: E) -> bool {
        let subscriptions = self.subscriptions.borrow();
        match subscriptions.iter().find(|(kind, _)| kind == event_type) {
            Some((_, recorder)) => {
                recorder.record(payload);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_subscribed(&self, event_type: &str) -> bool {
        self.subscriptions.borrow().iter().any(|(kind, _)| kind == event_type)
    }

    /// Subscribed event types in subscription order. Duplicates would indicate a double bind.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        self.subscriptions.borrow().iter().map(|(kind, _)| kind.clone()).collect()
    }
}

impl<E> EventSource<E> for ManualEventSource<E> {
    fn subscribe(&mut self, event_type: &str, recorder: Recorder<E>) {
        self.subscriptions.borrow_mut().push((event_type.to_owned(), recorder));
    }

    fn unsubscribe(&mut self, event_type: &str) {
        self.subscriptions.borrow_mut().retain(|(kind, _)| kind != event_type);
    }
}
