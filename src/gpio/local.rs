//! Local backend: pins on this machine.

use std::sync::Arc;

use super::{translate_pin, GpioBackend};
use crate::driver::PinDriver;
use crate::error::Result;
use crate::pin::{Direction, PinNaming, PinValue, PullMode, Translator};

/// Backend that drives pins through a [`PinDriver`].
///
/// Caller pins are translated to the driver's native numbering on every
/// call.
pub struct LocalGpio {
    naming: PinNaming,
    driver: Arc<dyn PinDriver>,
    translator: Arc<Translator>,
}

impl LocalGpio {
    /// Create a local backend, initializing the driver first.
    ///
    /// # Errors
    ///
    /// [`GpioError::HardwareInitialization`](crate::GpioError::HardwareInitialization)
    /// if the driver cannot be brought up.
    pub fn new(
        naming: PinNaming,
        driver: Arc<dyn PinDriver>,
        translator: Arc<Translator>,
    ) -> Result<Self> {
        driver.initialize()?;
        tracing::debug!(
            "Local GPIO ready, caller naming {}, native naming {}",
            naming,
            driver.native_naming()
        );
        Ok(Self {
            naming,
            driver,
            translator,
        })
    }

    fn native_pin(&self, pin: i32) -> Result<u8> {
        translate_pin(&self.translator, self.naming, self.driver.native_naming(), pin)
    }
}

impl GpioBackend for LocalGpio {
    fn naming(&self) -> PinNaming {
        self.naming
    }

    fn set_direction(&self, pin: i32, direction: Direction) -> Result<()> {
        let native = self.native_pin(pin)?;
        self.driver.set_direction(native, direction);
        Ok(())
    }

    fn read(&self, pin: i32) -> Result<PinValue> {
        let native = self.native_pin(pin)?;
        Ok(self.driver.read(native))
    }

    fn write(&self, pin: i32, value: PinValue) -> Result<()> {
        let native = self.native_pin(pin)?;
        self.driver.write(native, value);
        Ok(())
    }

    fn set_pull_mode(&self, pin: i32, mode: PullMode) -> Result<()> {
        let native = self.native_pin(pin)?;
        self.driver.set_pull_mode(native, mode);
        Ok(())
    }

    fn close(&self) -> Result<()> {
        // The hardware session lives as long as the process.
        Ok(())
    }
}
