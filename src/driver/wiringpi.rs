//! Native wiringPi bindings.
//!
//! Requires `libwiringPi.so` at link time and root (or gpio group) access at
//! run time. Pins are addressed in wiringPi numbering.

use std::os::raw::c_int;
use std::sync::OnceLock;

use super::PinDriver;
use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinNaming, PinValue, PullMode};

#[link(name = "wiringPi")]
extern "C" {
    fn wiringPiSetup() -> c_int;
    fn pinMode(pin: c_int, mode: c_int);
    fn digitalRead(pin: c_int) -> c_int;
    fn digitalWrite(pin: c_int, value: c_int);
    fn pullUpDnControl(pin: c_int, pud: c_int);
}

/// Outcome of `wiringPiSetup`, shared by every driver in the process.
static SETUP: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// [`PinDriver`] over the native wiringPi library.
#[derive(Debug, Default, Clone, Copy)]
pub struct WiringPiDriver;

impl WiringPiDriver {
    pub fn new() -> Self {
        Self
    }
}

impl PinDriver for WiringPiDriver {
    fn native_naming(&self) -> PinNaming {
        PinNaming::WiringPi
    }

    fn initialize(&self) -> Result<()> {
        SETUP
            .get_or_init(|| {
                tracing::info!("Initializing Raspberry Pi GPIO");
                // SAFETY: wiringPiSetup takes no arguments and is called once per process.
                if unsafe { wiringPiSetup() } == -1 {
                    let message = "wiringPiSetup returned -1".to_string();
                    tracing::error!("Failed to initialize Raspberry Pi GPIO: {}", message);
                    Err(message)
                } else {
                    tracing::info!("Raspberry Pi GPIO initialized");
                    Ok(())
                }
            })
            .clone()
            .map_err(GpioError::HardwareInitialization)
    }

    fn set_direction(&self, pin: u8, direction: Direction) {
        // SAFETY: plain integer arguments; wiringPi ignores unknown pins.
        unsafe { pinMode(c_int::from(pin), direction as c_int) }
    }

    fn read(&self, pin: u8) -> PinValue {
        // SAFETY: see set_direction.
        let level = unsafe { digitalRead(c_int::from(pin)) };
        PinValue::from(level != 0)
    }

    fn write(&self, pin: u8, value: PinValue) {
        // SAFETY: see set_direction.
        unsafe { digitalWrite(c_int::from(pin), value as c_int) }
    }

    fn set_pull_mode(&self, pin: u8, mode: PullMode) {
        // SAFETY: see set_direction. PUD_OFF/DOWN/UP are 0/1/2, same as PullMode.
        unsafe { pullUpDnControl(c_int::from(pin), mode as c_int) }
    }
}
