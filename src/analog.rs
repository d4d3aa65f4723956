pub mod analog_input;
pub mod calibration;
pub mod joystick;
pub mod potentiometer;
