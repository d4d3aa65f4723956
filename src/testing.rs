//! Fakes for exercising components without real hardware.

use core::{cell::Cell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::{
    adc::{Channel, OneShot},
    digital::v2::InputPin,
};

use crate::hal::{Clock, Instant};

/// Clock that is moved by hand and optionally advances on every read.
pub(crate) struct FakeClock {
    now: Cell<u32>,
    step: u32,
}

impl FakeClock {
    pub(crate) fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
            step: 0,
        }
    }

    /// Every call to `now` returns the current time and then moves it by `step` ms.
    pub(crate) fn auto_advancing(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub(crate) fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    pub(crate) fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub(crate) fn millis(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        Instant::from_ticks(now)
    }
}

pub(crate) struct TestAdc;

/// ADC channel `N` of [`FakeAdc`].
pub(crate) struct Chan<const N: u8>;

impl<const N: u8> Channel<TestAdc> for Chan<N> {
    type ID = u8;

    fn channel() -> u8 {
        N
    }
}

const CHANNELS: usize = 4;

/// ADC returning scripted samples per channel. The last sample of a script
/// repeats forever.
pub(crate) struct FakeAdc {
    scripts: [Vec<u16>; CHANNELS],
    cursor: [usize; CHANNELS],
    reads: [usize; CHANNELS],
}

impl FakeAdc {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Default::default(),
            cursor: [0; CHANNELS],
            reads: [0; CHANNELS],
        }
    }

    pub(crate) fn set(&mut self, channel: u8, value: u16) {
        self.script(channel, &[value]);
    }

    pub(crate) fn script(&mut self, channel: u8, samples: &[u16]) {
        let ch = channel as usize;
        self.scripts[ch] = samples.to_vec();
        self.cursor[ch] = 0;
    }

    pub(crate) fn reads(&self, channel: u8) -> usize {
        self.reads[channel as usize]
    }
}

impl<const N: u8> OneShot<TestAdc, u16, Chan<N>> for FakeAdc {
    type Error = Infallible;

    fn read(&mut self, _pin: &mut Chan<N>) -> nb::Result<u16, Self::Error> {
        let ch = N as usize;
        self.reads[ch] += 1;
        let script = &self.scripts[ch];
        let value = match script.len() {
            0 => 0,
            len => script[self.cursor[ch].min(len - 1)],
        };
        self.cursor[ch] += 1;
        Ok(value)
    }
}

/// Digital input whose level is driven through a shared handle.
#[derive(Clone)]
pub(crate) struct LevelPin(Rc<Cell<bool>>);

impl LevelPin {
    pub(crate) fn new(high: bool) -> Self {
        Self(Rc::new(Cell::new(high)))
    }

    pub(crate) fn set_high(&self, high: bool) {
        self.0.set(high);
    }
}

impl InputPin for LevelPin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}
