//! Frame-synchronized coalescing of high-frequency window events.
//!
//! Mouse movement, scrolling and resizing can fire many times between two
//! repaints. This crate binds one native listener per event type, remembers
//! only the latest event of each type, and once per animation frame runs the
//! callbacks of every type that fired, in registration order. When the host
//! has no `requestAnimationFrame` it falls back to a fixed-interval timer.
//!
//! The engine ([`coalescer::Coalescer`]) is independent of the browser: the
//! event source and the frame scheduler are injected, so native code and
//! tests drive it with [`source::ManualEventSource`] and
//! [`scheduler::ManualScheduler`]. The `browser` feature adds the `window`
//! bindings and the JavaScript-facing `Raft` class.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`coalescer`] | The engine: registry, lifecycle, drain tick |
//! | [`registry`] | Listener groups, callbacks, read-only snapshots |
//! | [`source`] | Native event source contract and pending-event slot |
//! | [`scheduler`] | Frame scheduling contract and manual scheduler |
//! | [`diagnostics`] | Warning sink for non-fatal conditions |
//! | [`boundary`] | Callback-argument normalization and host handle table |
//! | [`config`] | Scheduler configuration |
//! | [`error`] | Error and warning types |
//! | [`consts`] | Shared constants |
//! | `browser` | `window` bindings and the `Raft` JS class (feature `browser`) |

pub mod boundary;
#[cfg(feature = "browser")]
pub mod browser;
pub mod coalescer;
pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod error;
pub mod registry;
pub mod scheduler;
pub mod source;

pub use coalescer::Coalescer;
pub use error::{InvalidArgument, Warning};
pub use registry::{Callback, Listeners, callback};
