use std::{cell::Cell, cell::RefCell, io::ErrorKind, rc::Rc};

use embedded_hal_mock::{
    adc::{Mock as AdcMock, MockChan0, MockChan1, Transaction as AdcTransaction},
    pin::{Mock as PinMock, State, Transaction as PinTransaction},
    MockError,
};
use utilify_analog::{
    AxisCalibration, Clock, DualAxisJoystick, Error, Instant, JoystickCalibration, JoystickConfig,
    Notifier,
};

/// Millisecond clock that moves `step` ms every time it is read.
struct SteppingClock {
    now: Cell<u32>,
    step: u32,
}

impl SteppingClock {
    fn manual() -> Self {
        Self {
            now: Cell::new(0),
            step: 0,
        }
    }

    fn stepping(step: u32) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }

    fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now + self.step);
        Instant::from_ticks(now)
    }
}

#[derive(Debug, PartialEq)]
enum Event {
    X(f32),
    Y(f32),
    Pressed,
}

#[test]
fn polls_axes_and_button_through_embedded_hal() {
    let adc_expectations: [AdcTransaction<u16>; 6] = [
        AdcTransaction::read(0, 512),
        AdcTransaction::read(1, 512),
        AdcTransaction::read(0, 762),
        AdcTransaction::read(1, 262),
        AdcTransaction::read(0, 762),
        AdcTransaction::read(1, 262),
    ];
    let pin_expectations = [
        PinTransaction::get(State::High),
        PinTransaction::get(State::Low),
        PinTransaction::get(State::Low),
    ];
    let mut adc = AdcMock::new(&adc_expectations);
    let clock = SteppingClock::manual();
    let config = JoystickConfig {
        invert_y: true,
        ..JoystickConfig::default()
    };

    let mut stick = DualAxisJoystick::new(
        MockChan0 {},
        MockChan1 {},
        PinMock::new(&pin_expectations),
        config,
        &mut adc,
        &clock,
    )
    .unwrap();
    let axis = AxisCalibration::new(512, 12, 1012).unwrap();
    stick.set_calibration(JoystickCalibration { x: axis, y: axis });

    let events = Rc::new(RefCell::new(Vec::new()));
    let (x, y, pressed) = (events.clone(), events.clone(), events.clone());
    stick.set_on_x_changed(Notifier::action(move |v: f32| x.borrow_mut().push(Event::X(v))));
    stick.set_on_y_changed(Notifier::action(move |v: f32| y.borrow_mut().push(Event::Y(v))));
    stick.set_on_button_pressed(Notifier::action(move |_: ()| {
        pressed.borrow_mut().push(Event::Pressed)
    }));

    clock.set(5);
    stick.tick(&mut adc, &clock).unwrap();
    assert_eq!(*events.borrow(), [Event::X(0.5), Event::Y(0.5)]);
    assert!(!stick.button_pressed());

    clock.set(60);
    stick.tick(&mut adc, &clock).unwrap();
    assert_eq!(*events.borrow(), [Event::X(0.5), Event::Y(0.5), Event::Pressed]);
    assert!(stick.button_pressed());

    adc.done();
    let (_, _, mut pin) = stick.release();
    pin.done();
}

#[test]
fn adc_failure_abandons_calibration() {
    let adc_expectations: [AdcTransaction<u16>; 3] = [
        AdcTransaction::read(0, 512),
        AdcTransaction::read(1, 512),
        AdcTransaction::read(0, 0).with_error(MockError::Io(ErrorKind::Other)),
    ];
    let pin_expectations = [PinTransaction::get(State::High)];
    let mut adc = AdcMock::new(&adc_expectations);
    let clock = SteppingClock::stepping(5);

    let mut stick = DualAxisJoystick::new(
        MockChan0 {},
        MockChan1 {},
        PinMock::new(&pin_expectations),
        JoystickConfig::default(),
        &mut adc,
        &clock,
    )
    .unwrap();

    let done = Rc::new(Cell::new(false));
    let flag = done.clone();
    let result = stick.calibrate(
        &mut adc,
        &clock,
        Notifier::None,
        Notifier::action(move |_: ()| flag.set(true)),
    );

    assert_eq!(result, Err(Error::Adc(MockError::Io(ErrorKind::Other))));
    assert!(!stick.is_calibrating());
    assert!(!done.get());
    assert_eq!(
        *stick.calibration(),
        JoystickCalibration::centered_at(512, 512)
    );

    adc.done();
    let (_, _, mut pin) = stick.release();
    pin.done();
}
