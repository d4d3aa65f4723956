use embedded_hal::adc::{Channel, OneShot};

use crate::{
    error::Error,
    hal::{elapsed, Clock, Duration, Instant},
    notifier::{Action, Notifier},
};

pub(crate) const DEFAULT_TOLERANCE: u16 = 2;
pub(crate) const DEFAULT_READ_INTERVAL: Duration = Duration::from_ticks(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalogInputConfig {
    /// A new sample must differ from the last reported one by more than this.
    pub tolerance: u16,
    /// Minimum time between two samples.
    pub read_interval: Duration,
}

impl AnalogInputConfig {
    pub const fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            read_interval: DEFAULT_READ_INTERVAL,
        }
    }
}

impl Default for AnalogInputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One ADC channel sampled at a bounded rate.
///
/// The reported value only moves when a sample differs from it by more than
/// the tolerance, and the registered notifier fires exactly once per move.
/// Values are raw ADC counts; see [`Potentiometer`](crate::Potentiometer) for
/// normalized readings.
pub struct AnalogInput<P> {
    pin: P,
    value: u16,
    tolerance: u16,
    read_interval: Duration,
    last_read: Instant,
    on_change: Notifier<u16>,
}

impl<P> AnalogInput<P> {
    /// Creates the input without touching the hardware. Call
    /// [`prime`](Self::prime) before the first `tick`.
    pub fn new(pin: P, config: AnalogInputConfig) -> Self {
        Self {
            pin,
            value: 0,
            tolerance: config.tolerance,
            read_interval: config.read_interval,
            last_read: Instant::from_ticks(0),
            on_change: Notifier::None,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier<u16>) -> Self {
        self.on_change = notifier;
        self
    }

    /// Creates and primes the input.
    ///
    /// This samples the channel and fires the notifier with the initial value
    /// before returning.
    pub fn new_primed<A, O, C>(
        pin: P,
        config: AnalogInputConfig,
        notifier: Notifier<u16>,
        adc: &mut O,
        clock: &C,
    ) -> Result<Self, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
        C: Clock,
    {
        let mut input = Self::new(pin, config).with_notifier(notifier);
        input.prime(adc, clock)?;
        Ok(input)
    }

    /// Takes the initial sample unconditionally and notifies it.
    pub fn prime<A, O, C>(&mut self, adc: &mut O, clock: &C) -> Result<u16, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
        C: Clock,
    {
        self.value = self.sample(adc)?;
        self.last_read = clock.now();
        self.on_change.notify(self.value);
        Ok(self.value)
    }

    /// Samples the channel if the read interval has passed.
    ///
    /// Returns the new value when it moved beyond the tolerance, after the
    /// notifier has seen it. The read timestamp advances on every sample taken,
    /// whether or not the value moved.
    pub fn tick<A, O, C>(&mut self, adc: &mut O, clock: &C) -> Result<Option<u16>, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
        C: Clock,
    {
        let now = clock.now();
        if elapsed(self.last_read, now) < self.read_interval {
            return Ok(None);
        }
        self.last_read = now;

        let sample = self.sample(adc)?;
        if sample.abs_diff(self.value) > self.tolerance {
            self.value = sample;
            self.on_change.notify(sample);
            Ok(Some(sample))
        } else {
            Ok(None)
        }
    }

    fn sample<A, O>(&mut self, adc: &mut O) -> Result<u16, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
    {
        nb::block!(adc.read(&mut self.pin)).map_err(Error::Adc)
    }

    /// Last reported raw value.
    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn tolerance(&self) -> u16 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: u16) {
        self.tolerance = tolerance;
    }

    pub fn read_interval(&self) -> Duration {
        self.read_interval
    }

    pub fn set_read_interval(&mut self, interval: Duration) {
        self.read_interval = interval;
    }

    /// Time of the last sample taken.
    pub fn last_read(&self) -> Instant {
        self.last_read
    }

    pub fn set_action_value_changed(&mut self, action: impl Action<u16> + 'static) {
        self.on_change.set_action(action);
    }

    /// Ignored while an action object is registered.
    pub fn set_callback_value_changed(&mut self, callback: fn(u16)) {
        self.on_change.set_function(callback);
    }

    pub fn clear_value_changed(&mut self) {
        self.on_change.clear();
    }

    /// Gives the channel back.
    pub fn release(self) -> P {
        self.pin
    }
}
