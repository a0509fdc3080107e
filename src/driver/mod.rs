//! Driver module - the hardware register access boundary.
//!
//! A [`PinDriver`] addresses pins in its own native numbering and knows
//! nothing about naming conventions. Backends translate before calling it.
//!
//! - [`MemoryDriver`] - simulated pin bank, for tests and hardware-less peers
//! - `WiringPiDriver` - native `libwiringPi` bindings (feature `wiringpi`)

mod memory;
#[cfg(feature = "wiringpi")]
mod wiringpi;

pub use memory::{DriverOp, MemoryDriver};
#[cfg(feature = "wiringpi")]
pub use wiringpi::WiringPiDriver;

use std::sync::Arc;

use crate::error::Result;
use crate::pin::{Direction, PinNaming, PinValue, PullMode};

/// Native GPIO capability.
///
/// All pin numbers are in [`native_naming`](PinDriver::native_naming).
pub trait PinDriver: Send + Sync {
    /// Numbering convention the driver expects.
    fn native_naming(&self) -> PinNaming;

    /// One-time hardware setup.
    ///
    /// May be called more than once; implementations set up the hardware on
    /// the first call only and replay that outcome afterwards.
    fn initialize(&self) -> Result<()>;

    fn set_direction(&self, pin: u8, direction: Direction);

    fn read(&self, pin: u8) -> PinValue;

    fn write(&self, pin: u8, value: PinValue);

    fn set_pull_mode(&self, pin: u8, mode: PullMode);
}

impl<D: PinDriver + ?Sized> PinDriver for Arc<D> {
    fn native_naming(&self) -> PinNaming {
        (**self).native_naming()
    }

    fn initialize(&self) -> Result<()> {
        (**self).initialize()
    }

    fn set_direction(&self, pin: u8, direction: Direction) {
        (**self).set_direction(pin, direction)
    }

    fn read(&self, pin: u8) -> PinValue {
        (**self).read(pin)
    }

    fn write(&self, pin: u8, value: PinValue) {
        (**self).write(pin, value)
    }

    fn set_pull_mode(&self, pin: u8, mode: PullMode) {
        (**self).set_pull_mode(pin, mode)
    }
}

/// Driver used when none is configured explicitly.
///
/// `None` without the `wiringpi` feature: there is no real hardware to fall
/// back to.
pub fn default_driver() -> Option<Arc<dyn PinDriver>> {
    #[cfg(feature = "wiringpi")]
    {
        Some(Arc::new(WiringPiDriver::new()))
    }

    #[cfg(not(feature = "wiringpi"))]
    {
        None
    }
}
