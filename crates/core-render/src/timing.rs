//! Render timing: duration of the last emitted (or skipped) frame.
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_RENDER_NS: AtomicU64 = AtomicU64::new(0);

pub fn record_last_render_ns(ns: u64) {
    LAST_RENDER_NS.store(ns.max(1), Ordering::Relaxed);
}

pub fn last_render_ns() -> u64 {
    LAST_RENDER_NS.load(Ordering::Relaxed)
}
