//! Listener groups and the registry that owns them.
//!
//! One [`ListenerGroup`] exists per event type. The registry keeps groups in
//! the order their event types were first registered, which is also the order
//! the drain tick visits them. [`Listeners`] is the read-only snapshot handed
//! out for inspection.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::rc::Rc;

use crate::source::PendingSlot;

/// A registered callback. Receives the latest payload recorded for its event type.
pub type Callback<E> = Rc<dyn Fn(&E)>;

/// Wrap a closure as a [`Callback`].
pub fn callback<E, F>(f: F) -> Callback<E>
where
    F: Fn(&E) + 'static,
{
    Rc::new(f)
}

/// Callbacks for one event type plus its pending-event slot.
pub(crate) struct ListenerGroup<E> {
    pub(crate) event_type: String,
    pub(crate) callbacks: Vec<Callback<E>>,
    pub(crate) pending: Rc<PendingSlot<E>>,
}

impl<E> ListenerGroup<E> {
    pub(crate) fn new(event_type: &str, callbacks: Vec<Callback<E>>) -> Self {
        Self { event_type: event_type.to_owned(), callbacks, pending: Rc::new(PendingSlot::new()) }
    }
}

/// Event type → listener group, iterated in first-registration order.
pub(crate) struct Registry<E> {
    groups: Vec<ListenerGroup<E>>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<E> Registry<E> {
    pub(crate) fn get_mut(&mut self, event_type: &str) -> Option<&mut ListenerGroup<E>> {
        self.groups.iter_mut().find(|g| g.event_type == event_type)
    }

    pub(crate) fn insert(&mut self, group: ListenerGroup<E>) {
        self.groups.push(group);
    }

    pub(crate) fn remove(&mut self, event_type: &str) -> Option<ListenerGroup<E>> {
        let index = self.groups.iter().position(|g| g.event_type == event_type)?;
        Some(self.groups.remove(index))
    }

    /// Remove every group, returning them in registry order.
    pub(crate) fn clear(&mut self) -> Vec<ListenerGroup<E>> {
        std::mem::take(&mut self.groups)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ListenerGroup<E>> {
        self.groups.iter()
    }

    pub(crate) fn snapshot(&self) -> Listeners<E> {
        Listeners {
            groups: self
                .groups
                .iter()
                .map(|g| GroupView {
                    event_type: g.event_type.clone(),
                    callbacks: g.callbacks.clone(),
                    pending: g.pending.is_pending(),
                })
                .collect(),
        }
    }
}

/// Read-only view of one listener group at the time of the snapshot.
pub struct GroupView<E> {
    event_type: String,
    callbacks: Vec<Callback<E>>,
    pending: bool,
}

impl<E> GroupView<E> {
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Callbacks in registration order.
    #[must_use]
    pub fn callbacks(&self) -> &[Callback<E>] {
        &self.callbacks
    }

    /// Whether an event was recorded and not yet drained.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Snapshot of the registry returned by `Coalescer::listeners`.
///
/// Changing the coalescer afterwards does not change an existing snapshot.
pub struct Listeners<E> {
    groups: Vec<GroupView<E>>,
}

impl<E> Listeners<E> {
    #[must_use]
    pub fn get(&self, event_type: &str) -> Option<&GroupView<E>> {
        self.groups.iter().find(|g| g.event_type == event_type)
    }

    #[must_use]
    pub fn contains(&self, event_type: &str) -> bool {
        self.get(event_type).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Event types in registry order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.event_type.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupView<E>> {
        self.groups.iter()
    }
}
