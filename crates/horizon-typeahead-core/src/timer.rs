//! Timer queue for Horizon Typeahead.
//!
//! Provides one-shot deadlines that the owning component polls for expiry.
//! This is the only source of deferred execution in the control: the rate
//! limiter arms a deadline for a debounced request and matures it on the
//! next poll after the wait elapses.
//!
//! Time is passed in explicitly (`now: Instant`) rather than sampled
//! internally, so timing behavior is deterministic under test and under
//! host-driven clocks.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for an armed deadline.
    pub struct TimerHandle;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this deadline expires.
    deadline: Instant,
    /// Whether this deadline is still armed.
    active: bool,
}

/// An entry in the timer queue (min-heap by deadline).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    handle: TimerHandle,
    deadline: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.deadline.cmp(&self.deadline)
    }
}

/// An owned, cancellable set of one-shot deadlines.
///
/// `arm` returns a handle, `cancel` invalidates it, and `poll` drains the
/// handles whose deadline has passed. A cancelled handle is never reported
/// by `poll`.
#[derive(Debug)]
pub struct TimerQueue {
    /// All armed deadlines.
    timers: SlotMap<TimerHandle, TimerData>,
    /// Priority queue of pending expiries (min-heap by deadline).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerQueue {
    /// Create a new, empty timer queue.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Arm a one-shot deadline that expires `delay` after `now`.
    ///
    /// Returns the handle that can be used to cancel the deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        let deadline = now + delay;

        let handle = self.timers.insert(TimerData {
            deadline,
            active: true,
        });
        self.queue.push(TimerQueueEntry { handle, deadline });

        tracing::trace!(target: "horizon_typeahead_core::timer", ?handle, ?delay, "deadline armed");
        handle
    }

    /// Cancel an armed deadline.
    ///
    /// Returns an error if the handle is unknown, already cancelled, or has
    /// already fired.
    pub fn cancel(&mut self, handle: TimerHandle) -> Result<()> {
        if let Some(timer) = self.timers.get_mut(handle) {
            timer.active = false;
            self.timers.remove(handle);
            tracing::trace!(target: "horizon_typeahead_core::timer", ?handle, "deadline cancelled");
            Ok(())
        } else {
            Err(TimerError::InvalidHandle.into())
        }
    }

    /// Check if a deadline is currently armed.
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.get(handle).is_some_and(|t| t.active)
    }

    /// Get the duration until the next deadline expires, if any.
    ///
    /// Returns `None` if nothing is armed; returns `Duration::ZERO` for a
    /// deadline that is already due.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        // Drop stale entries for cancelled handles from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if !self.timers.get(entry.handle).is_some_and(|t| t.active) {
                self.queue.pop();
            } else {
                break;
            }
        }

        self.queue.peek().map(|entry| {
            if entry.deadline > now {
                entry.deadline - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Drain every deadline that has expired as of `now`.
    ///
    /// Expired handles are returned in deadline order and removed from the
    /// queue; cancelled handles are skipped silently.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut expired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.deadline > now {
                break;
            }

            let entry = self.queue.pop().expect("peeked entry must exist");
            let handle = entry.handle;

            let Some(timer) = self.timers.get_mut(handle) else {
                continue;
            };
            if !timer.active {
                continue;
            }

            tracing::trace!(target: "horizon_typeahead_core::timer", ?handle, "deadline fired");
            timer.active = false;
            self.timers.remove(handle);
            expired.push(handle);
        }

        expired
    }

    /// Get the number of armed deadlines.
    pub fn armed_count(&self) -> usize {
        self.timers.iter().filter(|(_, t)| t.active).count()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_poll() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();

        let handle = queue.arm(start, Duration::from_millis(100));
        assert!(queue.is_armed(handle));
        assert_eq!(queue.armed_count(), 1);

        // Not yet due.
        assert!(queue.poll(start + Duration::from_millis(50)).is_empty());
        assert!(queue.is_armed(handle));

        // Due now.
        let expired = queue.poll(start + Duration::from_millis(100));
        assert_eq!(expired, vec![handle]);
        assert!(!queue.is_armed(handle));
        assert_eq!(queue.armed_count(), 0);

        // One-shot: never reported again.
        assert!(queue.poll(start + Duration::from_millis(500)).is_empty());
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();

        let handle = queue.arm(start, Duration::from_millis(10));
        queue.cancel(handle).unwrap();

        assert!(!queue.is_armed(handle));
        assert!(queue.poll(start + Duration::from_millis(20)).is_empty());
    }

    #[test]
    fn test_cancel_unknown_handle_errors() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();

        let handle = queue.arm(start, Duration::from_millis(10));
        queue.cancel(handle).unwrap();
        assert!(queue.cancel(handle).is_err());
    }

    #[test]
    fn test_poll_returns_in_deadline_order() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();

        let late = queue.arm(start, Duration::from_millis(200));
        let early = queue.arm(start, Duration::from_millis(50));

        let expired = queue.poll(start + Duration::from_millis(300));
        assert_eq!(expired, vec![early, late]);
    }

    #[test]
    fn test_time_until_next_skips_cancelled() {
        let mut queue = TimerQueue::new();
        let start = Instant::now();

        let soon = queue.arm(start, Duration::from_millis(10));
        queue.arm(start, Duration::from_millis(100));
        queue.cancel(soon).unwrap();

        assert_eq!(
            queue.time_until_next(start),
            Some(Duration::from_millis(100))
        );

        // An already-due deadline reports zero.
        assert_eq!(
            queue.time_until_next(start + Duration::from_millis(150)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_time_until_next_empty() {
        let mut queue = TimerQueue::new();
        assert_eq!(queue.time_until_next(Instant::now()), None);
    }
}
