// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter.
//!
//! Each key (typically `<action>_<client ip>`) owns a counter and the
//! instant its window opened. Within a window at most `max_requests` calls
//! are allowed; the first call after the window has elapsed opens a new one.
//!
//! Windows are fixed, not sliding: up to `2 * max_requests` calls can pass
//! in a short span straddling a window boundary.
//!
//! Records remember the window they were opened with, so [`RateLimiter::sweep`]
//! expires each one on its own schedule regardless of which action created it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the current window expires
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Counter for one key.
#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    /// Requests observed in the current window, always >= 1
    count: u32,
    /// When the current window began
    window_start: Instant,
    /// Window length supplied when the record was opened
    window: Duration,
}

impl RateLimitRecord {
    fn open(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_start: now,
            window,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }

    fn time_left(&self, now: Instant, window: Duration) -> Duration {
        window.saturating_sub(now.saturating_duration_since(self.window_start))
    }
}

/// Thread-safe fixed-window rate limiter.
///
/// Cloning is cheap and clones share the same records.
#[derive(Clone, Default)]
pub struct RateLimiter {
    records: Arc<RwLock<HashMap<String, RateLimitRecord>>>,
}

impl RateLimiter {
    /// Create a limiter with no tracked keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request against `key` and report whether it may proceed.
    ///
    /// The lookup, expiry check and increment happen under one write lock,
    /// so concurrent callers on the same key never exceed `max_requests`.
    pub async fn check(&self, key: &str, max_requests: u32, window: Duration) -> RateLimitResult {
        let now = Instant::now();
        let mut records = self.records.write().await;

        if let Some(record) = records.get_mut(key) {
            if !record.is_expired(now, window) {
                if record.count >= max_requests {
                    let retry_after = record.time_left(now, window);
                    debug!(key, count = record.count, ?retry_after, "Rate limit exceeded");
                    return RateLimitResult::Limited { retry_after };
                }

                record.count += 1;
                return RateLimitResult::Allowed {
                    remaining: max_requests - record.count,
                    reset_in: record.time_left(now, window),
                };
            }
        }

        // Absent or expired: start a new window rather than counting on.
        records.insert(key.to_string(), RateLimitRecord::open(now, window));
        debug!(key, ?window, "Opened rate limit window");
        RateLimitResult::Allowed {
            remaining: max_requests.saturating_sub(1),
            reset_in: window,
        }
    }

    /// Whether a request for `key` is allowed, counting it if so.
    pub async fn is_allowed(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        self.check(key, max_requests, window).await.is_allowed()
    }

    /// Remove every record whose window has expired. Returns how many were removed.
    ///
    /// Expired keys are collected under a read lock and removed under a
    /// short write lock, re-checking each one in case it was reopened in
    /// between.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();

        let expired: Vec<String> = {
            let records = self.records.read().await;
            records
                .iter()
                .filter(|(_, record)| record.is_expired(now, record.window))
                .map(|(key, _)| key.clone())
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }

        let mut records = self.records.write().await;
        let mut removed = 0;
        for key in expired {
            let still_expired = records
                .get(&key)
                .is_some_and(|record| record.is_expired(now, record.window));
            if still_expired {
                records.remove(&key);
                removed += 1;
            }
        }

        debug!(removed, remaining = records.len(), "Swept expired rate limit records");
        removed
    }

    /// Number of tracked keys.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Run [`sweep`](Self::sweep) every `interval` on a background task.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        info!(interval_secs = interval.as_secs(), "Starting rate limit sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limiter.sweep().await;
            }
        })
    }
}
