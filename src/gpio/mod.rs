//! GPIO module - the backend trait, both backends and the facade.
//!
//! - [`GpioBackend`] - capability set shared by every backend
//! - [`LocalGpio`] - pins attached to this machine, through a [`PinDriver`](crate::driver::PinDriver)
//! - [`RemoteGpio`] - pins exposed by a connector over TCP
//! - [`Gpio`] - owns one backend chosen at construction
//!
//! Pin numbers passed in are always in the handle's own
//! [`naming`](GpioBackend::naming); each backend translates them itself.
//!
//! # Example
//!
//! ```ignore
//! use pinbridge::gpio::{Gpio, GpioBackend};
//! use pinbridge::pin::{Direction, PinNaming, PinValue};
//!
//! let gpio = Gpio::builder()
//!     .naming(PinNaming::Bcm)
//!     .remote("raspberrypi.local", 5555)
//!     .build()?;
//!
//! gpio.set_direction(17, Direction::Output)?;
//! gpio.write(17, PinValue::High)?;
//! gpio.close()?;
//! ```

mod facade;
mod local;
mod remote;

pub use facade::{Gpio, GpioBuilder};
pub use local::LocalGpio;
pub use remote::RemoteGpio;

use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinNaming, PinValue, PullMode, Translator};

/// GPIO capability set.
///
/// Every call blocks until the hardware call returns or, for a remote
/// read, until the reply arrives.
pub trait GpioBackend: Send + Sync {
    /// Naming convention callers use for pins on this handle.
    fn naming(&self) -> PinNaming;

    fn set_direction(&self, pin: i32, direction: Direction) -> Result<()>;

    fn read(&self, pin: i32) -> Result<PinValue>;

    fn write(&self, pin: i32, value: PinValue) -> Result<()>;

    /// Set the pull resistor ("button mode").
    fn set_pull_mode(&self, pin: i32, mode: PullMode) -> Result<()>;

    /// Release the backend. Calling it again is a no-op.
    fn close(&self) -> Result<()>;
}

impl<B: GpioBackend + ?Sized> GpioBackend for Box<B> {
    fn naming(&self) -> PinNaming {
        (**self).naming()
    }

    fn set_direction(&self, pin: i32, direction: Direction) -> Result<()> {
        (**self).set_direction(pin, direction)
    }

    fn read(&self, pin: i32) -> Result<PinValue> {
        (**self).read(pin)
    }

    fn write(&self, pin: i32, value: PinValue) -> Result<()> {
        (**self).write(pin, value)
    }

    fn set_pull_mode(&self, pin: i32, mode: PullMode) -> Result<()> {
        (**self).set_pull_mode(pin, mode)
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }
}

/// Translate `pin` and narrow it to the byte used by drivers and the wire.
fn translate_pin(
    translator: &Translator,
    source: PinNaming,
    target: PinNaming,
    pin: i32,
) -> Result<u8> {
    let translated = translator.map_pin(source, target, pin)?;
    u8::try_from(translated).map_err(|_| GpioError::InvalidPinNumber {
        pin,
        source_naming: source,
        target_naming: target,
    })
}
