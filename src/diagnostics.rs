//! Warning-level channel for non-fatal conditions.

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod diagnostics_test;

use std::cell::RefCell;

use crate::error::Warning;

/// Receives non-fatal warnings. Implementations must not panic.
pub trait DiagnosticSink {
    fn warn(&self, warning: &Warning);
}

/// Default sink: forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, warning: &Warning) {
        log::warn!("raf-throttle: {warning}");
    }
}

/// Sink that keeps every warning it receives, for hosts that surface them in their own UI.
#[derive(Debug, Default)]
pub struct RecordingSink {
    warnings: RefCell<Vec<Warning>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, warning: &Warning) {
        self.warnings.borrow_mut().push(warning.clone());
    }
}
