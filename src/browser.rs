//! Browser bindings: `window` events, `requestAnimationFrame`, and the JS-facing `Raft` class.
//!
//! ARCHITECTURE
//! ============
//! The core [`Coalescer`] knows nothing about the DOM. This module supplies
//! the two collaborators it needs in a browser ([`WindowEventSource`] and
//! [`AnimationFrameScheduler`]) and wraps the result in [`Raft`], which is
//! what JavaScript sees. JS callers may pass one function or one array of
//! functions; the raw value is classified here and normalized by
//! [`crate::boundary`]. The original `Function` handles are mirrored in a
//! [`HandleTable`] so `getListeners` returns what the caller registered.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Map, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Event, Window};

use crate::boundary::{CallbackArg, HandleTable, normalize_callbacks};
use crate::coalescer::Coalescer;
use crate::config::Config;
use crate::error::InvalidArgument;
use crate::registry::{Callback, callback};
use crate::scheduler::{FrameCallback, FrameScheduler};
use crate::source::{EventSource, Recorder};

// =============================================================
// Event source
// =============================================================

/// Binds one listener per event type on `window`.
#[derive(Default)]
pub struct WindowEventSource {
    bindings: Vec<(String, Closure<dyn FnMut(Event)>)>,
}

impl WindowEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource<Event> for WindowEventSource {
    fn subscribe(&mut self, event_type: &str, recorder: Recorder<Event>) {
        let Some(window) = web_sys::window() else {
            log::warn!("raf-throttle: no window, `{event_type}` listener not bound");
            return;
        };
        let handler = Closure::wrap(Box::new(move |event: Event| recorder.record(event)) as Box<dyn FnMut(Event)>);
        if let Err(err) = window.add_event_listener_with_callback(event_type, handler.as_ref().unchecked_ref()) {
            log::warn!("raf-throttle: failed to bind `{event_type}`: {err:?}");
            return;
        }
        self.bindings.push((event_type.to_owned(), handler));
    }

    fn unsubscribe(&mut self, event_type: &str) {
        let Some(index) = self.bindings.iter().position(|(kind, _)| kind == event_type) else {
            return;
        };
        let (kind, handler) = self.bindings.remove(index);
        unbind(&kind, &handler);
    }
}

impl Drop for WindowEventSource {
    fn drop(&mut self) {
        for (kind, handler) in self.bindings.drain(..) {
            unbind(&kind, &handler);
        }
    }
}

fn unbind(event_type: &str, handler: &Closure<dyn FnMut(Event)>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.remove_event_listener_with_callback(event_type, handler.as_ref().unchecked_ref()) {
        log::warn!("raf-throttle: failed to unbind `{event_type}`: {err:?}");
    }
}

// =============================================================
// Frame scheduler
// =============================================================

/// Runs ticks on `requestAnimationFrame`, or on a timer when the host has none.
pub struct AnimationFrameScheduler {
    config: Config,
}

impl AnimationFrameScheduler {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule(&self, frame: FrameCallback) {
        let frame = Rc::new(RefCell::new(Some(frame)));

        if !self.config.force_timer_fallback
            && let Some(window) = web_sys::window().filter(has_animation_frame)
            && request_animation_frame(&window, Rc::clone(&frame))
        {
            return;
        }

        let holder: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let timeout = Timeout::new(self.config.fallback_interval_ms, move || {
            if let Some(frame) = frame.borrow_mut().take() {
                frame();
            }
            holder_for_cb.borrow_mut().take();
        });
        *holder.borrow_mut() = Some(timeout);
    }
}

fn has_animation_frame(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("requestAnimationFrame")).unwrap_or(false)
}

/// Hand `frame` to `requestAnimationFrame`. Returns `false` if the request was rejected,
/// in which case `frame` is still in its cell.
fn request_animation_frame(window: &Window, frame: Rc<RefCell<Option<FrameCallback>>>) -> bool {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(frame) = frame.borrow_mut().take() {
            frame();
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(_) => {
            *holder.borrow_mut() = Some(cb);
            true
        }
        Err(err) => {
            log::warn!("raf-throttle: requestAnimationFrame failed, using timer: {err:?}");
            false
        }
    }
}

// =============================================================
// JS boundary
// =============================================================

/// Window event coalescer, as exported to JavaScript.
///
/// Mutating methods return a handle so calls chain:
/// `raft.addListener("scroll", onScroll).addListener("resize", [a, b])`.
/// Each returned handle is a new JS wrapper onto the same coalescer, so
/// `raft.addListener(..) === raft` is `false`. Wrappers that are not kept can
/// be released with `.free()`; the coalescer lives until its last handle goes.
#[wasm_bindgen]
#[derive(Clone)]
pub struct Raft {
    core: Coalescer<Event>,
    handles: Rc<RefCell<HandleTable<Function>>>,
}

#[wasm_bindgen]
impl Raft {
    /// Create an independent instance. `config` may be `undefined` or a plain object.
    ///
    /// # Errors
    ///
    /// Throws a `TypeError` when `config` is not a valid config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Raft, JsValue> {
        let config = parse_config(&config)?;
        Ok(Self::with_config(config))
    }

    /// Register one function or an array of functions for `eventType`.
    ///
    /// # Errors
    ///
    /// Throws a `TypeError` when `eventType` is not a non-empty string or no
    /// usable callbacks were supplied.
    #[wasm_bindgen(js_name = addListener)]
    pub fn add_listener(&self, event_type: JsValue, callbacks: JsValue) -> Result<Raft, JsValue> {
        let event_type = event_type.as_string().ok_or_else(|| type_error(&InvalidArgument::EventType))?;
        let functions = normalize_callbacks(classify_callbacks(&callbacks)).map_err(|err| type_error(&err))?;
        let wrapped: Vec<Callback<Event>> = functions.iter().cloned().map(js_callback).collect();
        self.core.add_listener(&event_type, wrapped).map_err(|err| type_error(&err))?;
        self.handles.borrow_mut().append(&event_type, functions);
        Ok(self.clone())
    }

    /// Remove every callback for `eventType` and unbind its window listener.
    ///
    /// # Errors
    ///
    /// Throws a `TypeError` when `eventType` is missing, not a string, or empty.
    #[wasm_bindgen(js_name = removeListener)]
    pub fn remove_listener(&self, event_type: JsValue) -> Result<Raft, JsValue> {
        let event_type = event_type.as_string().ok_or_else(|| type_error(&InvalidArgument::EventType))?;
        self.core.remove_listener(&event_type).map_err(|err| type_error(&err))?;
        self.handles.borrow_mut().remove(&event_type);
        Ok(self.clone())
    }

    pub fn reset(&self) -> Raft {
        self.core.reset();
        self.handles.borrow_mut().clear();
        self.clone()
    }

    /// Snapshot as a `Map` of `eventType -> { callbacks: Function[], pending }`.
    #[wasm_bindgen(js_name = getListeners)]
    pub fn get_listeners(&self) -> Map {
        let handles = self.handles.borrow();
        let out = Map::new();
        for group in self.core.listeners().iter() {
            let callbacks: Array = handles.get(group.event_type()).iter().collect();
            let entry = Object::new();
            set_field(&entry, "callbacks", &callbacks);
            set_field(&entry, "pending", &JsValue::from_bool(group.is_pending()));
            out.set(&JsValue::from_str(group.event_type()), &entry);
        }
        out
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.core.is_running()
    }
}

impl Raft {
    /// Build an instance bound to `window` with the given config.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            core: Coalescer::new(WindowEventSource::new(), AnimationFrameScheduler::new(config)),
            handles: Rc::new(RefCell::new(HandleTable::new())),
        }
    }
}

thread_local! {
    static SHARED: Raft = Raft::with_config(Config::default());
}

/// Page-wide shared instance.
#[must_use]
pub fn shared() -> Raft {
    SHARED.with(Raft::clone)
}

/// Page-wide shared instance, for JavaScript.
#[wasm_bindgen]
pub fn raft() -> Raft {
    shared()
}

/// Install the console logger and panic hook when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Warn) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("raf-throttle: logger already set: {err}")));
    }
}

fn classify_callbacks(value: &JsValue) -> CallbackArg<Function> {
    if value.is_undefined() || value.is_null() {
        CallbackArg::Missing
    } else if let Some(function) = value.dyn_ref::<Function>() {
        CallbackArg::Single(function.clone())
    } else if Array::is_array(value) {
        let items: Array = value.clone().unchecked_into();
        CallbackArg::List(items.iter().map(|item| item.dyn_ref::<Function>().cloned()).collect())
    } else {
        CallbackArg::Other
    }
}

fn js_callback(function: Function) -> Callback<Event> {
    callback(move |event: &Event| {
        if let Err(err) = function.call1(&JsValue::NULL, event) {
            log::warn!("raf-throttle: callback threw: {err:?}");
        }
    })
}

fn parse_config(value: &JsValue) -> Result<Config, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Config::default());
    }
    let raw: String = js_sys::JSON::stringify(value)?.into();
    Config::from_json(&raw).map_err(|err| type_error(&err))
}

fn set_field(target: &Object, key: &str, value: &JsValue) {
    if let Err(err) = Reflect::set(target, &JsValue::from_str(key), value) {
        log::warn!("raf-throttle: failed to set `{key}`: {err:?}");
    }
}

fn type_error(err: &dyn std::error::Error) -> JsValue {
    js_sys::TypeError::new(&err.to_string()).into()
}
