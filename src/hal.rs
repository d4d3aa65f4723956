//! Hardware collaborators that are not covered by embedded-hal 0.2.

/// Millisecond timestamp from a free-running 32-bit counter.
pub type Instant = fugit::Instant<u32, 1, 1000>;
/// Millisecond duration.
pub type Duration = fugit::MillisDurationU32;

/// Upper bound of a normalized analog reading.
pub const NORMALIZED_MAX: u16 = 1023;

/// Monotonic millisecond clock.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Milliseconds from `since` to `now`, modulo the 32-bit counter.
///
/// The counter is allowed to wrap, and gaps of any length up to a full
/// counter period are measured as such.
pub(crate) fn elapsed(since: Instant, now: Instant) -> Duration {
    Duration::from_ticks(now.ticks().wrapping_sub(since.ticks()))
}

/// Native bit depth of the ADC behind an analog input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcResolution {
    /// AVR style 0..=1023 converters.
    Bits10,
    /// RP2040 / ESP32 style 0..=4095 converters.
    Bits12,
}

impl AdcResolution {
    pub const fn bits(self) -> u8 {
        match self {
            AdcResolution::Bits10 => 10,
            AdcResolution::Bits12 => 12,
        }
    }

    /// Largest raw value the converter produces.
    pub const fn max_raw(self) -> u16 {
        (1u16 << self.bits()) - 1
    }

    /// Scales a raw reading into 0..=[`NORMALIZED_MAX`].
    pub const fn normalize(self, raw: u16) -> u16 {
        let value = raw >> (self.bits() - 10);
        if value > NORMALIZED_MAX {
            NORMALIZED_MAX
        } else {
            value
        }
    }
}

impl Default for AdcResolution {
    fn default() -> Self {
        AdcResolution::Bits10
    }
}
