//! Polled analog inputs for microcontrollers.
//!
//! Everything here is driven from the caller's main loop: each component has a
//! `tick` that may take a rate-limited sample and fire its notifier
//! synchronously before returning. Hardware is reached through embedded-hal 0.2
//! traits (`adc::OneShot`, `digital::v2::InputPin`) and a millisecond [`Clock`].
//!
//! - [`AnalogInput`]: one ADC channel with a change tolerance.
//! - [`Potentiometer`]: an [`AnalogInput`] reporting 0..=1023 on any ADC width.
//! - [`DualAxisJoystick`]: two axes and a push button, with calibration and
//!   per-axis inversion.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod analog;
pub mod digital;
pub mod error;
pub mod hal;
pub mod notifier;

#[cfg(test)]
pub(crate) mod testing;

pub use analog::{
    analog_input::{AnalogInput, AnalogInputConfig},
    calibration::{AxisCalibration, CalibrationState, CalibrationStatus, JoystickCalibration},
    joystick::{DualAxisJoystick, JoystickConfig},
    potentiometer::Potentiometer,
};
pub use digital::push_button::{ButtonEvent, PushButton, PushButtonConfig};
pub use error::{ArithmeticError, Error};
pub use hal::{AdcResolution, Clock, Duration, Instant, NORMALIZED_MAX};
pub use notifier::{Action, Notifier};
