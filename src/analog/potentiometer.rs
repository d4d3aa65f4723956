use embedded_hal::adc::{Channel, OneShot};

use crate::{
    error::Error,
    hal::{AdcResolution, Clock},
    notifier::{Action, Notifier},
};

use super::analog_input::{AnalogInput, AnalogInputConfig};

/// An [`AnalogInput`] that reports 0..=1023 whatever the ADC width.
///
/// Change detection still runs on raw counts; the notifier receives the
/// normalized value.
pub struct Potentiometer<P> {
    input: AnalogInput<P>,
    resolution: AdcResolution,
    on_change: Notifier<u16>,
}

impl<P> Potentiometer<P> {
    pub fn new(pin: P, resolution: AdcResolution, config: AnalogInputConfig) -> Self {
        Self {
            input: AnalogInput::new(pin, config),
            resolution,
            on_change: Notifier::None,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier<u16>) -> Self {
        self.on_change = notifier;
        self
    }

    /// Creates the potentiometer, samples it and notifies the initial value.
    pub fn new_primed<A, O, C>(
        pin: P,
        resolution: AdcResolution,
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
        let mut pot = Self::new(pin, resolution, config).with_notifier(notifier);
        pot.prime(adc, clock)?;
        Ok(pot)
    }

    pub fn prime<A, O, C>(&mut self, adc: &mut O, clock: &C) -> Result<u16, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
        C: Clock,
    {
        self.input.prime(adc, clock)?;
        let value = self.value();
        self.on_change.notify(value);
        Ok(value)
    }

    /// Same contract as [`AnalogInput::tick`], with normalized values.
    pub fn tick<A, O, C>(&mut self, adc: &mut O, clock: &C) -> Result<Option<u16>, Error<O::Error>>
    where
        O: OneShot<A, u16, P>,
        P: Channel<A>,
        C: Clock,
    {
        match self.input.tick(adc, clock)? {
            Some(_) => {
                let value = self.value();
                self.on_change.notify(value);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Last reported value in 0..=1023.
    pub fn value(&self) -> u16 {
        self.resolution.normalize(self.input.value())
    }

    pub fn raw_value(&self) -> u16 {
        self.input.value()
    }

    pub fn resolution(&self) -> AdcResolution {
        self.resolution
    }

    /// Tolerance in raw counts.
    pub fn tolerance(&self) -> u16 {
        self.input.tolerance()
    }

    pub fn set_tolerance(&mut self, tolerance: u16) {
        self.input.set_tolerance(tolerance);
    }

    pub fn set_action_value_changed(&mut self, action: impl Action<u16> + 'static) {
        self.on_change.set_action(action);
    }

    pub fn set_callback_value_changed(&mut self, callback: fn(u16)) {
        self.on_change.set_function(callback);
    }

    pub fn release(self) -> P {
        self.input.release()
    }
}
