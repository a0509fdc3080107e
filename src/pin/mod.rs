//! Pin module - naming conventions, the pin table and the translator.
//!
//! A Raspberry Pi header pin has three common names:
//! - **Physical**: position on the 40-pin connector
//! - **WiringPi**: the sequential numbering used by the wiringPi library
//! - **BCM**: the Broadcom SoC GPIO number
//!
//! [`Translator`] converts between any two of them in O(1).

mod naming;
mod table;
mod translator;

pub use naming::{Direction, PinNaming, PinValue, PullMode};
pub use table::{PIN_COLUMNS, PIN_TABLE};
pub use translator::{Translator, UNMAPPED};
