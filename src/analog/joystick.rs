use embedded_hal::{
    adc::{Channel, OneShot},
    digital::v2::InputPin,
};

use crate::{
    digital::push_button::{PushButton, PushButtonConfig},
    error::{ArithmeticError, Error},
    hal::{elapsed, AdcResolution, Clock, Duration, NORMALIZED_MAX},
    notifier::{Action, Notifier},
};

use super::{
    analog_input::{AnalogInput, AnalogInputConfig, DEFAULT_READ_INTERVAL},
    calibration::{CalibrationState, CalibrationStatus, JoystickCalibration},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoystickConfig {
    pub resolution: AdcResolution,
    /// Raw-count tolerance of both axis inputs.
    pub axis_tolerance: u16,
    pub read_interval: Duration,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Length of a calibration run.
    pub calibration_duration: Duration,
    pub button: PushButtonConfig,
}

impl JoystickConfig {
    pub const fn new() -> Self {
        Self {
            resolution: AdcResolution::Bits10,
            axis_tolerance: 1,
            read_interval: DEFAULT_READ_INTERVAL,
            invert_x: false,
            invert_y: false,
            calibration_duration: Duration::from_ticks(10_000),
            button: PushButtonConfig::new(),
        }
    }

    fn axis(&self) -> AnalogInputConfig {
        AnalogInputConfig {
            tolerance: self.axis_tolerance,
            read_interval: self.read_interval,
        }
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Two analog axes and a push button.
///
/// Axis values are signed floats relative to the calibrated center, roughly in
/// -1.0..=1.0. Raw changes on an axis are forwarded to that axis' notifier as
/// the new normalized value, except while a calibration run is active.
///
/// Calibration can run cooperatively ([`begin_calibration`] followed by
/// [`step_calibration`] from the main loop) or blocking via [`calibrate`].
///
/// [`begin_calibration`]: Self::begin_calibration
/// [`step_calibration`]: Self::step_calibration
/// [`calibrate`]: Self::calibrate
pub struct DualAxisJoystick<PX, PY, B> {
    x: AnalogInput<PX>,
    y: AnalogInput<PY>,
    button: PushButton<B>,
    resolution: AdcResolution,
    calibration: JoystickCalibration,
    invert_x: bool,
    invert_y: bool,
    calibration_duration: Duration,
    state: CalibrationState,
    on_calibrated: Notifier<()>,
    on_x_changed: Notifier<f32>,
    on_y_changed: Notifier<f32>,
}

impl<PX, PY, B> DualAxisJoystick<PX, PY, B>
where
    B: InputPin,
{
    /// Samples both axes and the button once. Nothing is notified.
    pub fn new<A, O, E, C>(
        x_pin: PX,
        y_pin: PY,
        button_pin: B,
        config: JoystickConfig,
        adc: &mut O,
        clock: &C,
    ) -> Result<Self, Error<E, B::Error>>
    where
        O: OneShot<A, u16, PX, Error = E> + OneShot<A, u16, PY, Error = E>,
        PX: Channel<A>,
        PY: Channel<A>,
        C: Clock,
    {
        let mut x = AnalogInput::new(x_pin, config.axis());
        let mut y = AnalogInput::new(y_pin, config.axis());
        let mut button = PushButton::new(button_pin, config.button);
        x.prime(adc, clock).map_err(Error::widen::<B::Error>)?;
        y.prime(adc, clock).map_err(Error::widen::<B::Error>)?;
        button.prime(clock).map_err(Error::<E, B::Error>::Pin)?;
        debug!("joystick ready, raw x={} y={}", x.value(), y.value());

        Ok(Self {
            x,
            y,
            button,
            resolution: config.resolution,
            calibration: JoystickCalibration::full_scale(),
            invert_x: config.invert_x,
            invert_y: config.invert_y,
            calibration_duration: config.calibration_duration,
            state: CalibrationState::Idle,
            on_calibrated: Notifier::None,
            on_x_changed: Notifier::None,
            on_y_changed: Notifier::None,
        })
    }

    /// Polls X, then Y, then the button. Notifications go out in that order
    /// before this returns.
    pub fn tick<A, O, E, C>(&mut self, adc: &mut O, clock: &C) -> Result<(), Error<E, B::Error>>
    where
        O: OneShot<A, u16, PX, Error = E> + OneShot<A, u16, PY, Error = E>,
        PX: Channel<A>,
        PY: Channel<A>,
        C: Clock,
    {
        if self.x.tick(adc, clock).map_err(Error::widen::<B::Error>)?.is_some() {
            self.x_changed();
        }
        if self.y.tick(adc, clock).map_err(Error::widen::<B::Error>)?.is_some() {
            self.y_changed();
        }
        self.button.tick(clock).map_err(Error::<E, B::Error>::Pin)?;
        Ok(())
    }

    /// Runs a whole calibration, blocking for the configured duration.
    ///
    /// `on_start` fires before the run and `on_done` after it. If the ADC fails
    /// the run is abandoned, `on_done` is dropped and the error returned.
    pub fn calibrate<A, O, E, C>(
        &mut self,
        adc: &mut O,
        clock: &C,
        on_start: Notifier<()>,
        on_done: Notifier<()>,
    ) -> Result<(), Error<E, B::Error>>
    where
        O: OneShot<A, u16, PX, Error = E> + OneShot<A, u16, PY, Error = E>,
        PX: Channel<A>,
        PY: Channel<A>,
        C: Clock,
    {
        self.begin_calibration(clock, on_start, on_done);
        loop {
            match self.step_calibration(adc, clock) {
                Ok(CalibrationStatus::Done) => return Ok(()),
                Ok(CalibrationStatus::InProgress) => {}
                Err(e) => {
                    warn!("joystick calibration aborted");
                    self.state = CalibrationState::Idle;
                    self.on_calibrated.clear();
                    return Err(e);
                }
            }
        }
    }

    /// One iteration of an active calibration run.
    ///
    /// Ticks both axes and widens the calibrated ranges with the readings. Once
    /// the duration has passed the run ends, the summary is logged and the
    /// completion notifier fires. Returns `Done` when no run is active.
    pub fn step_calibration<A, O, E, C>(
        &mut self,
        adc: &mut O,
        clock: &C,
    ) -> Result<CalibrationStatus, Error<E, B::Error>>
    where
        O: OneShot<A, u16, PX, Error = E> + OneShot<A, u16, PY, Error = E>,
        PX: Channel<A>,
        PY: Channel<A>,
        C: Clock,
    {
        let started = match self.state {
            CalibrationState::Idle => return Ok(CalibrationStatus::Done),
            CalibrationState::Calibrating { started } => started,
        };
        if elapsed(started, clock.now()) >= self.calibration_duration {
            self.finish_calibration();
            return Ok(CalibrationStatus::Done);
        }

        self.x.tick(adc, clock).map_err(Error::widen::<B::Error>)?;
        self.y.tick(adc, clock).map_err(Error::widen::<B::Error>)?;

        // Y is sampled mirrored here while value_y() reads it unmirrored.
        // Joysticks calibrated this way depend on it, keep both sides as is.
        let x = self.reading_x();
        let y = NORMALIZED_MAX - self.reading_y();
        self.calibration.x.expand(x);
        self.calibration.y.expand(y);

        Ok(CalibrationStatus::InProgress)
    }
}

impl<PX, PY, B> DualAxisJoystick<PX, PY, B> {
    /// Enters the calibrating state.
    ///
    /// Fires `on_start`, then seeds each axis with a zero-width range at its
    /// current reading. Forwarding of axis changes stays off until the run
    /// ends. Starting again while a run is active restarts it.
    pub fn begin_calibration<C: Clock>(
        &mut self,
        clock: &C,
        mut on_start: Notifier<()>,
        on_done: Notifier<()>,
    ) {
        on_start.notify(());

        let (x, y) = (self.reading_x(), self.reading_y());
        self.calibration = JoystickCalibration::centered_at(x, y);
        self.on_calibrated = on_done;
        self.state = CalibrationState::Calibrating {
            started: clock.now(),
        };
        debug!("joystick calibration started, center x={} y={}", x, y);
    }

    fn finish_calibration(&mut self) {
        self.state = CalibrationState::Idle;

        let JoystickCalibration { x, y } = self.calibration;
        info!(
            "joystick calibrated: center x={} y={}, x {}..={}, y {}..={}",
            x.center,
            y.center,
            x.min,
            x.max,
            y.min,
            y.max
        );
        if x.is_degenerate() || y.is_degenerate() {
            warn!("joystick was not moved to all extremes during calibration");
        }

        core::mem::take(&mut self.on_calibrated).notify(());
    }

    fn x_changed(&mut self) {
        if self.is_calibrating() {
            return;
        }
        let value = self.value_x();
        self.on_x_changed.notify(value);
    }

    fn y_changed(&mut self) {
        if self.is_calibrating() {
            return;
        }
        let value = self.value_y();
        self.on_y_changed.notify(value);
    }

    /// Normalized X reading in 0..=1023.
    pub fn reading_x(&self) -> u16 {
        self.resolution.normalize(self.x.value())
    }

    /// Normalized Y reading in 0..=1023.
    pub fn reading_y(&self) -> u16 {
        self.resolution.normalize(self.y.value())
    }

    /// X relative to the calibrated range, failing on a zero-width side.
    pub fn try_value_x(&self) -> Result<f32, ArithmeticError> {
        let value = self.calibration.x.normalize(self.reading_x())?;
        Ok(if self.invert_x { -value } else { value })
    }

    pub fn try_value_y(&self) -> Result<f32, ArithmeticError> {
        let value = self.calibration.y.normalize(self.reading_y())?;
        Ok(if self.invert_y { -value } else { value })
    }

    /// X relative to the calibrated range. A zero-width side reads as 0.0.
    pub fn value_x(&self) -> f32 {
        self.try_value_x().unwrap_or(0.0)
    }

    /// Y relative to the calibrated range. A zero-width side reads as 0.0.
    pub fn value_y(&self) -> f32 {
        self.try_value_y().unwrap_or(0.0)
    }

    /// Negates X at read time; the calibration is unaffected.
    pub fn invert_x(&mut self, invert: bool) {
        self.invert_x = invert;
    }

    pub fn invert_y(&mut self, invert: bool) {
        self.invert_y = invert;
    }

    pub fn is_x_inverted(&self) -> bool {
        self.invert_x
    }

    pub fn is_y_inverted(&self) -> bool {
        self.invert_y
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrating { .. })
    }

    pub fn calibration_state(&self) -> CalibrationState {
        self.state
    }

    pub fn calibration(&self) -> &JoystickCalibration {
        &self.calibration
    }

    /// Installs a previously recorded calibration.
    pub fn set_calibration(&mut self, calibration: JoystickCalibration) {
        self.calibration = calibration;
    }

    pub fn calibration_duration(&self) -> Duration {
        self.calibration_duration
    }

    pub fn button_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn set_on_x_changed(&mut self, notifier: Notifier<f32>) {
        self.on_x_changed = notifier;
    }

    pub fn set_on_y_changed(&mut self, notifier: Notifier<f32>) {
        self.on_y_changed = notifier;
    }

    pub fn set_action_x_changed(&mut self, action: impl Action<f32> + 'static) {
        self.on_x_changed.set_action(action);
    }

    pub fn set_action_y_changed(&mut self, action: impl Action<f32> + 'static) {
        self.on_y_changed.set_action(action);
    }

    /// Ignored while an action object is registered for X.
    pub fn set_callback_x_changed(&mut self, callback: fn(f32)) {
        self.on_x_changed.set_function(callback);
    }

    /// Ignored while an action object is registered for Y.
    pub fn set_callback_y_changed(&mut self, callback: fn(f32)) {
        self.on_y_changed.set_function(callback);
    }

    pub fn set_on_button_pressed(&mut self, notifier: Notifier<()>) {
        self.button.set_on_pressed(notifier);
    }

    pub fn set_on_button_released(&mut self, notifier: Notifier<()>) {
        self.button.set_on_released(notifier);
    }

    pub fn release(self) -> (PX, PY, B) {
        (self.x.release(), self.y.release(), self.button.release())
    }
}
