//! Sliding-window rate limiting keyed by client IP.
//!
//! # Design Decisions
//! - True sliding window: per-key hit timestamps pruned on every check, so
//!   the cap rolls continuously instead of resetting on bucket edges
//! - `check_and_increment` is the single atomic operation on the shared
//!   counters; everything runs under one lock acquisition
//! - Counters are process-wide and in-memory; nothing persists across
//!   restarts

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::response::ApiError;

/// Shared counter state, guarded by one lock.
struct Counters {
    hits: HashMap<IpAddr, VecDeque<Instant>>,
    last_sweep: Instant,
}

/// A sliding-window request counter keyed by client IP.
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    counters: Mutex<Counters>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: Mutex::new(Counters {
                hits: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Record one request for `key` if it fits in the window.
    ///
    /// Returns `false` when the key has already used its budget; the hit is
    /// not recorded in that case.
    pub fn check_and_increment(&self, key: IpAddr) -> bool {
        let now = Instant::now();
        let window = self.window;
        let mut counters = self.counters.lock().expect("rate limiter mutex poisoned");

        // Once per window, drop keys whose hits have all expired so the map
        // does not grow with every distinct client IP seen over the process
        // lifetime.
        if now.duration_since(counters.last_sweep) >= window {
            counters.hits.retain(|_, entry| {
                prune(entry, now, window);
                !entry.is_empty()
            });
            counters.last_sweep = now;
        }

        let entry = counters.hits.entry(key).or_default();
        prune(entry, now, window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push_back(now);
            true
        }
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.counters
            .lock()
            .expect("rate limiter mutex poisoned")
            .hits
            .len()
    }
}

/// Drop hits that have aged out of the window.
fn prune(entry: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while entry
        .front()
        .is_some_and(|t| now.duration_since(*t) >= window)
    {
        entry.pop_front();
    }
}

/// Middleware gating requests on a limiter instance.
///
/// Runs before any handler work, so a limited request never reaches
/// validation, the store, or the notifier.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<SlidingWindowLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if limiter.check_and_increment(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client = %addr.ip(), "Rate limit exceeded");
        ApiError::RateLimited.into_response()
    }
}
