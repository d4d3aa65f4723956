//! Reads a dual-axis joystick and a potentiometer on a Pico
//!
//! X is on GP26 (ADC0), Y on GP27 (ADC1) and the stick's push button pulls GP22
//! to ground. The stick is calibrated once at start-up: move it to all four
//! extremes during the ten seconds after "Calibrating joystick..." shows up.
//! A potentiometer wiper on GP28 (ADC2) is reported whenever it moves by more
//! than 5 raw counts.
#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embedded_alloc::Heap;
use panic_probe as _;

use rp2040_hal::{
    adc::{Adc, AdcPin},
    clocks::init_clocks_and_plls,
    entry,
    gpio::Pins,
    pac,
    watchdog::Watchdog,
    Sio, Timer,
};

use utilify_analog::{
    AdcResolution, AnalogInputConfig, Clock, DualAxisJoystick, Instant, JoystickConfig, Notifier,
    Potentiometer,
};

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 1024;

/// Millisecond view of the 1 MHz RP2040 timer.
struct TimerClock(Timer);

impl Clock for TimerClock {
    fn now(&self) -> Instant {
        Instant::from_ticks((self.0.get_counter().ticks() / 1_000) as u32)
    }
}

fn log_x(value: f32) {
    info!("Joystick X value: {}", value);
}

fn log_y(value: f32) {
    info!("Joystick Y value: {}", value);
}

fn log_pot(value: u16) {
    info!("Potentiometer value: {}", value);
}

#[entry]
fn main() -> ! {
    info!("Program start");
    {
        use core::mem::MaybeUninit;
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE) }
    }

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    // External high-speed crystal on the pico board is 12Mhz
    let external_xtal_freq_hz = 12_000_000u32;
    let clocks = init_clocks_and_plls(
        external_xtal_freq_hz,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let clock = TimerClock(Timer::new(pac.TIMER, &mut pac.RESETS, &clocks));
    let mut adc = Adc::new(pac.ADC, &mut pac.RESETS);

    let x_pin = AdcPin::new(pins.gpio26.into_floating_input());
    let y_pin = AdcPin::new(pins.gpio27.into_floating_input());
    let button_pin = pins.gpio22.into_pull_up_input();
    let pot_pin = AdcPin::new(pins.gpio28.into_floating_input());

    info!("Initializing potentiometer...");
    let pot_config = AnalogInputConfig {
        tolerance: 5,
        ..AnalogInputConfig::default()
    };
    let mut pot = Potentiometer::new_primed(
        pot_pin,
        AdcResolution::Bits12,
        pot_config,
        Notifier::function(log_pot),
        &mut adc,
        &clock,
    )
    .ok()
    .unwrap();

    info!("Initializing joystick...");
    let config = JoystickConfig {
        resolution: AdcResolution::Bits12,
        invert_x: true,
        ..JoystickConfig::default()
    };
    let mut joystick =
        DualAxisJoystick::new(x_pin, y_pin, button_pin, config, &mut adc, &clock)
            .ok()
            .unwrap();
    joystick.set_on_x_changed(Notifier::function(log_x));
    joystick.set_on_y_changed(Notifier::function(log_y));
    joystick.set_on_button_pressed(Notifier::function(|_| info!("Joystick button pressed")));
    joystick.set_on_button_released(Notifier::function(|_| info!("Joystick button released")));

    if joystick
        .calibrate(
            &mut adc,
            &clock,
            Notifier::function(|_| info!("Calibrating joystick...")),
            Notifier::function(|_| info!("Joystick calibration complete.")),
        )
        .is_err()
    {
        warn!("Joystick calibration failed, keeping full-scale range");
    }

    loop {
        if joystick.tick(&mut adc, &clock).is_err() {
            warn!("Joystick read failed");
        }
        if pot.tick(&mut adc, &clock).is_err() {
            warn!("Potentiometer read failed");
        }
    }
}

// End of file
