//! Core systems for Horizon Typeahead.
//!
//! This crate provides the foundational components of the Horizon Typeahead
//! control:
//!
//! - **Signal/Slot System**: Type-safe notification for the outward callback
//!   contract (value changes, fetch requests, commits)
//! - **Timer Queue**: Poll-driven one-shot deadlines, the only source of
//!   deferred execution in the system
//! - **Rate Limiter**: none/throttle/debounce admission control for fetch
//!   requests, built on the timer queue
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_typeahead_core::Signal;
//!
//! // Create a signal that notifies when a query should be fetched
//! let fetch_requested = Signal::<String>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = fetch_requested.connect(|query| {
//!     println!("Fetching suggestions for: {}", query);
//! });
//!
//! // Emit the signal
//! fetch_requested.emit("valu".to_string());
//!
//! // Disconnect when done
//! fetch_requested.disconnect(conn_id);
//! ```
//!
//! # Rate Limiter Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_typeahead_core::{RateLimitPolicy, RateLimiter};
//!
//! let mut limiter = RateLimiter::new(RateLimitPolicy::Debounce, Duration::from_millis(300));
//! let start = Instant::now();
//!
//! // A burst of requests arms (and re-arms) a single deadline.
//! assert!(limiter.request(start, "v".to_string()).is_none());
//! assert!(limiter.request(start + Duration::from_millis(100), "va".to_string()).is_none());
//!
//! // Only the final request's payload matures, once the wait elapses.
//! assert_eq!(limiter.poll(start + Duration::from_millis(200)), None);
//! assert_eq!(
//!     limiter.poll(start + Duration::from_millis(400)),
//!     Some("va".to_string()),
//! );
//! ```

mod error;
mod rate_limit;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use rate_limit::{InvalidPolicy, RateLimitPolicy, RateLimiter};
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerHandle, TimerQueue};
