use embedded_hal::digital::v2::InputPin;

use crate::{
    hal::{elapsed, Clock, Duration, Instant},
    notifier::{Action, Notifier},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushButtonConfig {
    /// Pressed reads low (button to ground, pull-up enabled).
    pub active_low: bool,
    /// How long a new level must hold before it is accepted.
    pub debounce: Duration,
}

impl PushButtonConfig {
    pub const fn new() -> Self {
        Self {
            active_low: true,
            debounce: Duration::from_ticks(50),
        }
    }
}

impl Default for PushButtonConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Debounced digital button.
pub struct PushButton<P> {
    pin: P,
    active_low: bool,
    debounce: Duration,
    pressed: bool,
    last_level: bool,
    last_change: Instant,
    on_pressed: Notifier<()>,
    on_released: Notifier<()>,
}

impl<P> PushButton<P> {
    pub fn new(pin: P, config: PushButtonConfig) -> Self {
        Self {
            pin,
            active_low: config.active_low,
            debounce: config.debounce,
            pressed: false,
            last_level: false,
            last_change: Instant::from_ticks(0),
            on_pressed: Notifier::None,
            on_released: Notifier::None,
        }
    }

    /// Debounced state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_on_pressed(&mut self, notifier: Notifier<()>) {
        self.on_pressed = notifier;
    }

    pub fn set_on_released(&mut self, notifier: Notifier<()>) {
        self.on_released = notifier;
    }

    pub fn set_action_pressed(&mut self, action: impl Action<()> + 'static) {
        self.on_pressed.set_action(action);
    }

    pub fn set_action_released(&mut self, action: impl Action<()> + 'static) {
        self.on_released.set_action(action);
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> PushButton<P>
where
    P: InputPin,
{
    /// Adopts the current pin level as the debounced state without notifying.
    pub fn prime<C: Clock>(&mut self, clock: &C) -> Result<bool, P::Error> {
        let level = self.read()?;
        self.pressed = level;
        self.last_level = level;
        self.last_change = clock.now();
        Ok(level)
    }

    pub fn tick<C: Clock>(&mut self, clock: &C) -> Result<Option<ButtonEvent>, P::Error> {
        let now = clock.now();
        let level = self.read()?;
        if level != self.last_level {
            self.last_level = level;
            self.last_change = now;
        }
        if level == self.pressed || elapsed(self.last_change, now) < self.debounce {
            return Ok(None);
        }

        self.pressed = level;
        if level {
            self.on_pressed.notify(());
            Ok(Some(ButtonEvent::Pressed))
        } else {
            self.on_released.notify(());
            Ok(Some(ButtonEvent::Released))
        }
    }

    fn read(&mut self) -> Result<bool, P::Error> {
        if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        }
    }
}
