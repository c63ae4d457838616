//! Leading-edge press debouncing.
//!
//! The first raw press is accepted immediately and opens a quiet window;
//! further presses are dropped until the window has elapsed. There is no
//! settle delay, so a press is acted upon in the same call that delivers it.

use crate::config::DEFAULT_QUIET_INTERVAL_MS;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{LogicalToggleEvent, PressEvent};

/// Reduces a bouncing stream of raw presses to logical toggle events.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    quiet_interval: I::Duration,
    last_accepted: Option<I>,
}

impl<I: TimeInstant> Default for Debouncer<I> {
    fn default() -> Self {
        Self::new(I::Duration::from_millis(DEFAULT_QUIET_INTERVAL_MS))
    }
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer that has never accepted a press.
    pub fn new(quiet_interval: I::Duration) -> Self {
        Self {
            quiet_interval,
            last_accepted: None,
        }
    }

    /// Filters one raw press.
    ///
    /// Returns a logical event if no press has been accepted yet or at least
    /// the quiet interval has passed since the last accepted one. Otherwise
    /// the press is noise and `None` is returned.
    pub fn filter(&mut self, event: PressEvent<I>) -> Option<LogicalToggleEvent<I>> {
        if !self.would_accept(event.at) {
            #[cfg(feature = "defmt")]
            defmt::trace!("Press dropped by debounce");
            return None;
        }

        self.last_accepted = Some(event.at);
        Some(LogicalToggleEvent { at: event.at })
    }

    /// Returns true if a press at `at` would be accepted, without recording it.
    pub fn would_accept(&self, at: I) -> bool {
        match self.last_accepted {
            None => true,
            // duration_since saturates, so an out-of-order timestamp counts as no time
            Some(last) => at.duration_since(last).as_millis() >= self.quiet_interval.as_millis(),
        }
    }

    /// Timestamp of the last accepted press, if any.
    pub fn last_accepted(&self) -> Option<I> {
        self.last_accepted
    }

    /// The configured quiet interval.
    pub fn quiet_interval(&self) -> I::Duration {
        self.quiet_interval
    }

    /// Forgets the last accepted press so the next one is accepted.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
