//! Token-bucket style rate limiting for API page requests.
//!
//! The site enforces a per-second request budget that depends on the account
//! tier, so every page task must take one slot from a shared [`RateLimiter`]
//! before touching the network. Admissions are spaced evenly across the
//! second, which keeps the steady-state rate at the configured bound no
//! matter how many tasks are waiting.
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Shared limiter admitting at most `per_second` operations per second.
///
/// Waiters block on `acquire` without busy-waiting. A slow consumer never
/// delays other tasks beyond its own admission slot.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / per_second,
            next_slot: Mutex::new(None),
        }
    }

    /// Take one admission slot, sleeping until it comes up.
    ///
    /// The first caller is admitted immediately; each subsequent caller is
    /// scheduled one interval after the previous admission.
    pub async fn acquire(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        sleep_until(slot).await;
    }
}
