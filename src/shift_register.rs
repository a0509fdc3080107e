//! SN74HC595 serial-in/parallel-out shift register.
//!
//! Three output pins drive the chip: serial data (DS), shift clock (SH_CP)
//! and storage (latch) clock (ST_CP). Works over any [`GpioBackend`], so
//! the register can hang off a local header or a remote connector.

use crate::error::Result;
use crate::gpio::GpioBackend;
use crate::pin::{Direction, PinValue};

/// Driver for one SN74HC595.
///
/// Pin numbers are in the naming convention of the wrapped GPIO handle.
pub struct ShiftRegister<G: GpioBackend> {
    gpio: G,
    data_pin: i32,
    shift_clock_pin: i32,
    storage_clock_pin: i32,
}

impl<G: GpioBackend> ShiftRegister<G> {
    /// Configure the three pins as outputs and drive them low.
    pub fn new(gpio: G, data_pin: i32, shift_clock_pin: i32, storage_clock_pin: i32) -> Result<Self> {
        for pin in [data_pin, storage_clock_pin, shift_clock_pin] {
            gpio.set_direction(pin, Direction::Output)?;
        }
        for pin in [data_pin, storage_clock_pin, shift_clock_pin] {
            gpio.write(pin, PinValue::Low)?;
        }

        Ok(Self {
            gpio,
            data_pin,
            shift_clock_pin,
            storage_clock_pin,
        })
    }

    /// Shift `data` out MSB first, then latch it onto the outputs.
    pub fn send(&self, data: u8) -> Result<()> {
        for bit in (0..8).rev() {
            let high = data & (1 << bit) != 0;
            self.gpio.write(self.data_pin, PinValue::from(high))?;
            self.pulse(self.shift_clock_pin)?;
        }
        self.pulse(self.storage_clock_pin)
    }

    /// The wrapped GPIO handle.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn into_inner(self) -> G {
        self.gpio
    }

    fn pulse(&self, pin: i32) -> Result<()> {
        self.gpio.write(pin, PinValue::Low)?;
        self.gpio.write(pin, PinValue::High)
    }
}
