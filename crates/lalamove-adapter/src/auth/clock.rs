/*
[INPUT]:  Wall clock or a caller-pinned instant
[OUTPUT]: Millisecond timestamps embedded in request signatures
[POS]:    Auth layer - time source abstraction for signing
[UPDATE]: When adding clock sources or changing timestamp precision
*/

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of the millisecond timestamp that goes into each signature
///
/// The server checks the timestamp against a freshness window, so read it
/// immediately before dispatching the request.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_millis(&self) -> u64;
}

/// Reads the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Pre-epoch clocks are clamped to zero rather than wrapped.
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Clock pinned to a settable instant, for tests and replay
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicU64,
}

impl FixedClock {
    pub fn new(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_millis: u64) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}
