//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
///
/// The source must be monotonic. The debounce filter only ever compares
/// instants produced by the same source.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Must saturate to `Duration::ZERO` when `earlier` is actually later
    /// than `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
