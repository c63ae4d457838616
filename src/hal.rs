//! [`IndicatorOutput`] over two `embedded-hal` output pins.

use embedded_hal::digital::OutputPin;

use crate::indicator::{IndicatorOutput, LedId};

/// Electrical level that lights an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pin high turns the LED on.
    #[default]
    ActiveHigh,
    /// Pin low turns the LED on.
    ActiveLow,
}

/// Drives LED-A and LED-B from two GPIO output pins.
pub struct PinPairIndicator<A: OutputPin, B: OutputPin> {
    led_a: A,
    led_b: B,
    polarity: Polarity,
}

impl<A: OutputPin, B: OutputPin> PinPairIndicator<A, B> {
    /// Creates an indicator over already-configured output pins.
    pub fn new(led_a: A, led_b: B, polarity: Polarity) -> Self {
        Self {
            led_a,
            led_b,
            polarity,
        }
    }

    /// Releases the pins.
    pub fn release(self) -> (A, B) {
        (self.led_a, self.led_b)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high { pin.set_high() } else { pin.set_low() }
}

impl<A: OutputPin, B: OutputPin> IndicatorOutput for PinPairIndicator<A, B> {
    fn set_level(&mut self, led: LedId, on: bool) {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };

        let failed = match led {
            LedId::A => drive(&mut self.led_a, high).is_err(),
            LedId::B => drive(&mut self.led_b, high).is_err(),
        };

        if failed {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to set LED {} level", led);
        }
    }
}
