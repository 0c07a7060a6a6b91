//! Host-agnostic pieces of the JavaScript boundary.
//!
//! JS callers hand over callbacks as one function, an array of functions, or
//! something malformed. The browser layer classifies the raw value into a
//! [`CallbackArg`] and [`normalize_callbacks`] turns that into an ordered list
//! or an [`InvalidArgument`]. [`HandleTable`] keeps the caller's original
//! function handles per event type so `getListeners` can hand them back.

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;

use crate::error::InvalidArgument;

/// Shape of the callbacks argument as passed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackArg<T> {
    /// `undefined` / `null` / not passed.
    Missing,
    /// A single callable.
    Single(T),
    /// An array; `None` marks an entry that is not callable.
    List(Vec<Option<T>>),
    /// Anything else (string, number, plain object).
    Other,
}

/// Reduce a classified argument to an ordered, non-empty list of callables.
///
/// # Errors
///
/// [`InvalidArgument::NoCallbacks`] for a missing argument or an empty array,
/// [`InvalidArgument::CallbackShape`] for a non-callable value or array entry.
pub fn normalize_callbacks<T>(arg: CallbackArg<T>) -> Result<Vec<T>, InvalidArgument> {
    match arg {
        CallbackArg::Missing => Err(InvalidArgument::NoCallbacks),
        CallbackArg::Single(callable) => Ok(vec![callable]),
        CallbackArg::List(items) if items.is_empty() => Err(InvalidArgument::NoCallbacks),
        CallbackArg::List(items) => items.into_iter().map(|item| item.ok_or(InvalidArgument::CallbackShape)).collect(),
        CallbackArg::Other => Err(InvalidArgument::CallbackShape),
    }
}

/// Host callback handles per event type, in registration order.
///
/// Kept in step with the coalescer's registry by the caller: append after a
/// successful add, remove after a remove, clear on reset.
pub struct HandleTable<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> HandleTable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event_type: &str, handles: impl IntoIterator<Item = T>) {
        match self.entries.iter_mut().find(|(kind, _)| kind == event_type) {
            Some((_, existing)) => existing.extend(handles),
            None => self.entries.push((event_type.to_owned(), handles.into_iter().collect())),
        }
    }

    pub fn remove(&mut self, event_type: &str) {
        self.entries.retain(|(kind, _)| kind != event_type);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Handles for `event_type`; empty when none are registered.
    #[must_use]
    pub fn get(&self, event_type: &str) -> &[T] {
        self.entries
            .iter()
            .find(|(kind, _)| kind == event_type)
            .map_or(&[], |(_, handles)| handles.as_slice())
    }
}
