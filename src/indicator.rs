//! Two-LED indicator that mirrors the toggle state.
//!
//! LED-A is lit while the state is true and LED-B while it is false, so
//! exactly one of the pair is on at any time.

/// Identifies one LED of the indicator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedId {
    /// Lit when the toggle state is true.
    A,
    /// Lit when the toggle state is false.
    B,
}

/// Trait for abstracting the indicator LED outputs.
///
/// Implement this for your GPIO hardware. Handle any hardware errors
/// internally - this method cannot fail.
pub trait IndicatorOutput {
    /// Drives `led` to its on level if `on` is true, off level otherwise.
    fn set_level(&mut self, led: LedId, on: bool);
}

/// On/off levels for both LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorPattern {
    pub led_a: bool,
    pub led_b: bool,
}

impl IndicatorPattern {
    /// The complementary pattern for a toggle state.
    #[inline]
    pub const fn for_state(state: bool) -> Self {
        Self {
            led_a: state,
            led_b: !state,
        }
    }

    /// Level of a single LED.
    #[inline]
    pub fn level(&self, led: LedId) -> bool {
        match led {
            LedId::A => self.led_a,
            LedId::B => self.led_b,
        }
    }
}

/// Applies toggle states to an [`IndicatorOutput`].
///
/// Holds no state besides the output itself; applying the same state twice
/// only repeats the same hardware writes.
pub struct IndicatorReflector<O: IndicatorOutput> {
    output: O,
}

impl<O: IndicatorOutput> IndicatorReflector<O> {
    /// Wraps an output. Nothing is written until the first [`apply`](Self::apply).
    pub fn new(output: O) -> Self {
        Self { output }
    }

    /// Drives both LEDs to the pattern for `state` and returns that pattern.
    pub fn apply(&mut self, state: bool) -> IndicatorPattern {
        let pattern = IndicatorPattern::for_state(state);
        self.output.set_level(LedId::A, pattern.led_a);
        self.output.set_level(LedId::B, pattern.led_b);
        pattern
    }

    /// Returns a reference to the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the reflector, returning the output.
    pub fn into_inner(self) -> O {
        self.output
    }
}
