//! Frame scheduling contract.
//!
//! The coalescer never loops on its own. Each drain tick is handed to a
//! [`FrameScheduler`] as a one-shot callback, and the tick hands over the next
//! one while the loop is running. Browsers back this with
//! `requestAnimationFrame`; tests and headless hosts use [`ManualScheduler`]
//! and advance frames explicitly.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One drain tick, to be run exactly once.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Runs frame callbacks before the next render.
pub trait FrameScheduler {
    /// Queue `frame` to run once, asynchronously. Must not run it inside this call.
    fn schedule(&self, frame: FrameCallback);
}

/// Scheduler that only runs frames when told to.
///
/// Cloning yields another handle onto the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call. Callbacks queued while
    /// running wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let ran = due.len();
        for frame in due {
            frame();
        }
        ran
    }

    /// Run `n` frames back to back.
    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.run_frame();
        }
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, frame: FrameCallback) {
        self.queue.borrow_mut().push_back(frame);
    }
}
