//! The event coalescer: registry, lifecycle, and the drain tick.
//!
//! ARCHITECTURE
//! ============
//! `Coalescer` is a cheap-clone handle over shared single-threaded state.
//! Native events never reach callbacks directly; a subscription only records
//! the latest payload into its group's pending slot. Once per frame the
//! scheduler runs a drain tick, which fires every group with a pending payload
//! exactly once and then hands the scheduler the next tick while any group is
//! still registered.
//!
//! Callbacks run with no registry borrow held, so they may add or remove
//! listeners on the same coalescer. The tick works from a snapshot of groups
//! and callbacks taken when it starts; registry changes apply from the next
//! tick on.

#[cfg(test)]
#[path = "coalescer_test.rs"]
mod coalescer_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{InvalidArgument, Warning};
use crate::registry::{Callback, ListenerGroup, Listeners, Registry};
use crate::scheduler::FrameScheduler;
use crate::source::{EventSource, PendingSlot, Recorder};

struct State<E> {
    registry: Registry<E>,
    /// True iff the registry is non-empty.
    running: bool,
    /// A tick has been handed to the scheduler and has not run yet.
    frame_in_flight: bool,
}

struct Inner<E> {
    state: RefCell<State<E>>,
    source: RefCell<Box<dyn EventSource<E>>>,
    scheduler: Box<dyn FrameScheduler>,
    diagnostics: Rc<dyn DiagnosticSink>,
}

/// Batches native events per type and fires callbacks at most once per frame.
pub struct Coalescer<E> {
    inner: Rc<Inner<E>>,
}

impl<E> Clone for Coalescer<E> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<E: 'static> Coalescer<E> {
    /// Create a stopped coalescer with an empty registry. Warnings go to the `log` facade.
    pub fn new<S, F>(source: S, scheduler: F) -> Self
    where
        S: EventSource<E> + 'static,
        F: FrameScheduler + 'static,
    {
        Self::with_diagnostics(source, scheduler, Rc::new(LogSink))
    }

    /// Like [`Coalescer::new`], with warnings routed to `diagnostics`.
    pub fn with_diagnostics<S, F>(source: S, scheduler: F, diagnostics: Rc<dyn DiagnosticSink>) -> Self
    where
        S: EventSource<E> + 'static,
        F: FrameScheduler + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State { registry: Registry::default(), running: false, frame_in_flight: false }),
                source: RefCell::new(Box::new(source)),
                scheduler: Box::new(scheduler),
                diagnostics,
            }),
        }
    }

    /// Register `callbacks` for `event_type`, appending to any already registered.
    ///
    /// The first registration for a type binds exactly one native listener.
    /// Starts the frame loop if it is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EventType`] for an empty or whitespace-bearing
    /// event type and [`InvalidArgument::NoCallbacks`] when `callbacks` is empty.
    pub fn add_listener<I>(&self, event_type: &str, callbacks: I) -> Result<&Self, InvalidArgument>
    where
        I: IntoIterator<Item = Callback<E>>,
    {
        validate_event_type(event_type)?;
        let callbacks: Vec<Callback<E>> = callbacks.into_iter().collect();
        if callbacks.is_empty() {
            return Err(InvalidArgument::NoCallbacks);
        }

        let new_binding = {
            let mut state = self.inner.state.borrow_mut();
            if let Some(group) = state.registry.get_mut(event_type) {
                group.callbacks.extend(callbacks);
                None
            } else {
                let group = ListenerGroup::new(event_type, callbacks);
                let recorder = Recorder::new(Rc::clone(&group.pending));
                state.registry.insert(group);
                Some(recorder)
            }
        };

        if let Some(recorder) = new_binding {
            log::debug!("raf-throttle: binding native `{event_type}` listener");
            self.inner.source.borrow_mut().subscribe(event_type, recorder);
        }

        self.inner.start();
        Ok(self)
    }

    /// Remove the group for `event_type` and unbind its native listener.
    ///
    /// Unknown types are reported to the diagnostic sink and otherwise ignored.
    /// Stops the frame loop when the last group goes away.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EventType`] when `event_type` is empty. Any
    /// other string that names no group only produces a warning.
    pub fn remove_listener(&self, event_type: &str) -> Result<&Self, InvalidArgument> {
        if event_type.is_empty() {
            return Err(InvalidArgument::EventType);
        }

        let (removed, now_empty) = {
            let mut state = self.inner.state.borrow_mut();
            let removed = state.registry.remove(event_type);
            let now_empty = state.registry.is_empty();
            if removed.is_some() && now_empty {
                state.running = false;
            }
            (removed, now_empty)
        };

        if removed.is_none() {
            self.inner.diagnostics.warn(&Warning::UnknownListener { event_type: event_type.to_owned() });
            return Ok(self);
        }

        log::debug!("raf-throttle: unbinding native `{event_type}` listener");
        self.inner.source.borrow_mut().unsubscribe(event_type);
        if now_empty {
            log::debug!("raf-throttle: registry empty, frame loop stopped");
        }
        Ok(self)
    }

    /// Drop every group, unbind every native listener, and stop the loop. Idempotent.
    pub fn reset(&self) -> &Self {
        let groups = {
            let mut state = self.inner.state.borrow_mut();
            state.running = false;
            state.registry.clear()
        };

        if !groups.is_empty() {
            let mut source = self.inner.source.borrow_mut();
            for group in &groups {
                source.unsubscribe(&group.event_type);
            }
            log::debug!("raf-throttle: reset, unbound {} listener(s)", groups.len());
        }
        self
    }

    /// Read-only snapshot of the registry, in registration order.
    #[must_use]
    pub fn listeners(&self) -> Listeners<E> {
        self.inner.state.borrow().registry.snapshot()
    }

    /// Whether the frame loop is active (equivalently, whether any group is registered).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.state.borrow().running
    }
}

impl<E: 'static> Inner<E> {
    fn start(self: &Rc<Self>) {
        let needs_frame = {
            let mut state = self.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
            let needs_frame = !state.frame_in_flight;
            state.frame_in_flight = true;
            needs_frame
        };

        log::debug!("raf-throttle: frame loop started");
        if needs_frame {
            self.request_frame();
        }
    }

    fn request_frame(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        self.scheduler.schedule(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.tick();
            }
        }));
    }

    fn tick(self: &Rc<Self>) {
        let plan: Vec<(Rc<PendingSlot<E>>, Vec<Callback<E>>)> = {
            let mut state = self.state.borrow_mut();
            state.frame_in_flight = false;
            if !state.running {
                return;
            }
            state
                .registry
                .iter()
                .map(|group| (Rc::clone(&group.pending), group.callbacks.clone()))
                .collect()
        };

        let mut fired = 0_usize;
        for (slot, callbacks) in &plan {
            let Some(payload) = slot.take() else {
                continue;
            };
            for callback in callbacks {
                callback(&payload);
            }
            fired += 1;
        }
        if fired > 0 {
            log::trace!("raf-throttle: drained {fired} of {} group(s)", plan.len());
        }

        let reschedule = {
            let mut state = self.state.borrow_mut();
            if state.running && !state.frame_in_flight {
                state.frame_in_flight = true;
                true
            } else {
                false
            }
        };
        if reschedule {
            self.request_frame();
        }
    }
}

fn validate_event_type(event_type: &str) -> Result<(), InvalidArgument> {
    if event_type.is_empty() || event_type.chars().any(char::is_whitespace) {
        return Err(InvalidArgument::EventType);
    }
    Ok(())
}
