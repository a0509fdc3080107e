//! Naming conventions and the small value enums shared by every backend.
//!
//! Byte values are fixed by the wire protocol and by the native driver ABI.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GpioError, Result};

/// Pin numbering convention.
///
/// The discriminant is the row index into the pin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinNaming {
    /// Connector position (1-40).
    Physical = 0,
    /// wiringPi sequential numbering.
    #[serde(alias = "wiring_pi", alias = "ordinal")]
    WiringPi = 1,
    /// Broadcom SoC GPIO numbering.
    #[default]
    #[serde(alias = "soc")]
    Bcm = 2,
}

impl PinNaming {
    /// All conventions, in table row order.
    pub const ALL: [PinNaming; 3] = [PinNaming::Physical, PinNaming::WiringPi, PinNaming::Bcm];

    /// Row index of this convention in the pin table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PinNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinNaming::Physical => "Physical",
            PinNaming::WiringPi => "WiringPi",
            PinNaming::Bcm => "BCM",
        };
        f.write_str(name)
    }
}

/// Pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Input = 0,
    Output = 1,
}

impl Direction {
    /// Decode a wire byte. Any nonzero value means output.
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        if byte == 0 {
            Direction::Input
        } else {
            Direction::Output
        }
    }
}

/// Logic level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinValue {
    Low = 0,
    High = 1,
}

impl PinValue {
    /// Decode a level reported by hardware. Any nonzero value is high.
    #[inline]
    pub fn from_level(level: u8) -> Self {
        if level == 0 {
            PinValue::Low
        } else {
            PinValue::High
        }
    }
}

impl From<bool> for PinValue {
    fn from(high: bool) -> Self {
        if high {
            PinValue::High
        } else {
            PinValue::Low
        }
    }
}

impl TryFrom<u8> for PinValue {
    type Error = GpioError;

    /// Strict decoding, used for response bytes from a remote peer.
    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(PinValue::Low),
            1 => Ok(PinValue::High),
            other => Err(GpioError::Protocol(format!("Invalid pin value byte {}", other))),
        }
    }
}

/// Pull resistor mode ("button mode").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PullMode {
    Off = 0,
    PullDown = 1,
    /// Pull up to 3.3V, gives an open button a stable level.
    PullUp = 2,
}

impl TryFrom<u8> for PullMode {
    type Error = GpioError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(PullMode::Off),
            1 => Ok(PullMode::PullDown),
            2 => Ok(PullMode::PullUp),
            other => Err(GpioError::Protocol(format!("Invalid pull mode byte {}", other))),
        }
    }
}
