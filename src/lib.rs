//! # pinbridge
//!
//! Raspberry Pi GPIO access that works the same whether the pins are on
//! this machine or on a remote one.
//!
//! Callers pick one of three pin naming conventions (Physical, wiringPi,
//! BCM) and one backend:
//!
//! - **Local**: pins driven through a [`PinDriver`](driver::PinDriver)
//! - **Remote**: pins driven by a [`connector`] process over TCP, using a
//!   tiny fixed-size binary protocol
//!
//! ## Example
//!
//! ```ignore
//! use pinbridge::{Gpio, GpioBackend};
//! use pinbridge::pin::{Direction, PinNaming, PinValue};
//!
//! fn main() -> pinbridge::Result<()> {
//!     let gpio = Gpio::builder()
//!         .naming(PinNaming::Physical)
//!         .remote("raspberrypi.local", 5555)
//!         .build()?;
//!
//!     gpio.set_direction(11, Direction::Output)?;
//!     gpio.write(11, PinValue::High)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connector;
pub mod driver;
pub mod error;
pub mod gpio;
pub mod joystick;
pub mod pin;
pub mod protocol;
pub mod shift_register;
pub mod transport;

pub use config::{BackendConfig, GpioConfig, RemoteConfig};
pub use error::{ErrorKind, GpioError, Result};
pub use gpio::{Gpio, GpioBackend, GpioBuilder};
pub use pin::{Direction, PinNaming, PinValue, PullMode, Translator};
pub use shift_register::ShiftRegister;
