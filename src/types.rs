//! Core event types shared by the debounce filter and the toggle machine.

use crate::time::TimeInstant;

/// A raw button activation as delivered by the input interrupt.
///
/// Raw events may bounce; several of them can arrive for one physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent<I: TimeInstant> {
    /// When the button transitioned to active.
    pub at: I,
}

impl<I: TimeInstant> PressEvent<I> {
    /// Creates a press event at the given instant.
    #[inline]
    pub fn new(at: I) -> Self {
        Self { at }
    }
}

/// A debounced button activation. Each one flips the toggle state exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicalToggleEvent<I: TimeInstant> {
    /// Timestamp of the raw press that was accepted.
    pub at: I,
}
