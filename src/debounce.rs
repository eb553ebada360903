//! A cancellable delayed value with at most one pending at a time.
//!
//! Scheduling always replaces whatever was pending, so only the most recent value survives a
//! burst of events. Time is passed in rather than read, which keeps the event loop in charge of
//! waiting and lets tests step through time without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug)]
/// Holds the latest scheduled value until its quiet period has passed.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// A debouncer that waits `delay` after the last schedule.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Drops any pending value and schedules `value` to fire `delay` after `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// When the pending value is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Takes the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if now >= at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
