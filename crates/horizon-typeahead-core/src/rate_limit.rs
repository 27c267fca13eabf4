//! Rate limiting for fetch requests.
//!
//! This module decides *when* a logical "fetch requested" signal is allowed
//! to reach the host, according to one of three temporal policies:
//!
//! - [`RateLimitPolicy::None`]: every request is admitted immediately.
//! - [`RateLimitPolicy::Throttle`]: the first request in a window is admitted
//!   immediately; further requests inside the window are dropped (not
//!   queued). The next request after the window elapses opens a new window.
//! - [`RateLimitPolicy::Debounce`]: a request arms a deadline `wait` in the
//!   future, replacing any previously armed one; only the final request of a
//!   quiescent burst matures, carrying that request's payload.
//!
//! The limiter owns at most one armed deadline at a time: arming always
//! cancels the predecessor first. [`RateLimiter::cancel_pending`] is the
//! canonical teardown/reconfiguration path and guarantees no stale delivery
//! afterward.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::timer::{TimerHandle, TimerQueue};

/// The temporal policy governing how often fetch requests are admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitPolicy {
    /// Admit every request immediately.
    #[default]
    None,
    /// Admit the first request per window, drop the rest.
    Throttle,
    /// Defer until the burst goes quiet, then admit the last request.
    Debounce,
}

impl RateLimitPolicy {
    /// The canonical lowercase name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Throttle => "throttle",
            Self::Debounce => "debounce",
        }
    }
}

impl fmt::Display for RateLimitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPolicy {
    /// The offending input.
    pub value: String,
}

impl fmt::Display for InvalidPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid rate limit policy `{}`: expected one of `none`, `throttle`, `debounce`",
            self.value
        )
    }
}

impl std::error::Error for InvalidPolicy {}

impl FromStr for RateLimitPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "throttle" => Ok(Self::Throttle),
            "debounce" => Ok(Self::Debounce),
            other => Err(InvalidPolicy {
                value: other.to_string(),
            }),
        }
    }
}

/// A pending debounced request.
#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    payload: T,
}

/// Gates a stream of requests behind a [`RateLimitPolicy`].
///
/// The limiter is payload-generic: the caller hands each request's payload
/// in (for the typeahead control, the query text at request time) and gets
/// it back when, and only when, the policy admits the request. Immediate
/// admissions come back from [`request`](Self::request); deferred debounce
/// admissions mature through [`poll`](Self::poll).
#[derive(Debug)]
pub struct RateLimiter<T> {
    policy: RateLimitPolicy,
    wait: Duration,
    timers: TimerQueue,
    /// The single outstanding debounced request, if any.
    pending: Option<Pending<T>>,
    /// Start of the current throttle window, if one is open.
    window_start: Option<Instant>,
}

impl<T> RateLimiter<T> {
    /// Create a new limiter with the given policy and wait duration.
    pub fn new(policy: RateLimitPolicy, wait: Duration) -> Self {
        Self {
            policy,
            wait,
            timers: TimerQueue::new(),
            pending: None,
            window_start: None,
        }
    }

    /// Get the active policy.
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Get the active wait duration.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Submit a request at time `now`.
    ///
    /// Returns the payload if the policy admits the request immediately.
    /// Under `Debounce` the payload is stored and the armed deadline
    /// replaced; the request matures through [`poll`](Self::poll) instead.
    pub fn request(&mut self, now: Instant, payload: T) -> Option<T> {
        match self.policy {
            RateLimitPolicy::None => Some(payload),
            RateLimitPolicy::Throttle => {
                let window_open = self
                    .window_start
                    .is_some_and(|start| now < start + self.wait);
                if window_open {
                    tracing::trace!(
                        target: "horizon_typeahead_core::rate_limit",
                        "request dropped inside throttle window"
                    );
                    None
                } else {
                    self.window_start = Some(now);
                    Some(payload)
                }
            }
            RateLimitPolicy::Debounce => {
                // At most one armed deadline: always cancel before arming.
                self.cancel_pending();
                let handle = self.timers.arm(now, self.wait);
                self.pending = Some(Pending { handle, payload });
                None
            }
        }
    }

    /// Deliver a matured debounced request, if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let expired = self.timers.poll(now);
        if expired.is_empty() {
            return None;
        }

        match self.pending.take() {
            Some(pending) if expired.contains(&pending.handle) => Some(pending.payload),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Whether a debounced request is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Duration until the outstanding request matures, if any.
    pub fn time_until_ready(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    /// Cancel the outstanding request, if any.
    ///
    /// Called on teardown and reconfiguration; afterwards no stale payload
    /// can be delivered by [`poll`](Self::poll).
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            // The handle may already have fired without being polled; either
            // way the payload is gone.
            let _ = self.timers.cancel(pending.handle);
            tracing::trace!(
                target: "horizon_typeahead_core::rate_limit",
                "pending request cancelled"
            );
        }
    }

    /// Replace the policy and wait duration.
    ///
    /// Any outstanding request is cancelled and the throttle window reset.
    pub fn reconfigure(&mut self, policy: RateLimitPolicy, wait: Duration) {
        self.cancel_pending();
        self.window_start = None;
        self.policy = policy;
        self.wait = wait;
    }
}
