//! Error and warning types surfaced by the coalescer.
//!
//! `InvalidArgument` is fatal to the call that produced it. `Warning` is
//! non-fatal and is routed to a [`crate::diagnostics::DiagnosticSink`] instead
//! of being returned.

/// A malformed argument to `add_listener` / `remove_listener`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    /// The event type was missing, empty, not a string, or contained whitespace.
    #[error("event type must be a non-empty string without whitespace")]
    EventType,
    /// `add_listener` was called without any callbacks.
    #[error("at least one callback is required when adding a listener")]
    NoCallbacks,
    /// Callbacks were supplied in a shape other than one function or one array of functions.
    #[error("callbacks must be a single function or a single array of functions")]
    CallbackShape,
}

/// Non-fatal conditions reported through the diagnostic sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    /// `remove_listener` named an event type with no registered group.
    #[error("listener not found: tried to remove `{event_type}`, but no such listener is registered")]
    UnknownListener { event_type: String },
}

/// Error returned when a [`crate::config::Config`] cannot be parsed or is out of range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not valid JSON for a `Config`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// `fallbackIntervalMs` was zero.
    #[error("fallback interval must be greater than zero")]
    ZeroInterval,
}
