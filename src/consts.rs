//! Shared constants for the raf-throttle crate.

/// Timer fallback period in milliseconds when `requestAnimationFrame` is unavailable (~60 Hz).
pub const DEFAULT_FALLBACK_INTERVAL_MS: u32 = 17;
