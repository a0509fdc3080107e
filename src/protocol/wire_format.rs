//! Wire format encoding and decoding.
//!
//! Every command is a flat run of bytes with no length prefix; the opcode
//! alone fixes the frame size:
//! ```text
//! ┌─────────────────┬────────┬──────────────────────────┬──────────┐
//! │ Command         │ Opcode │ Request                  │ Response │
//! ├─────────────────┼────────┼──────────────────────────┼──────────┤
//! │ End             │ 0      │ [opcode]                 │ -        │
//! │ SetPinDirection │ 1      │ [opcode, pin, direction] │ -        │
//! │ SetPinValue     │ 2      │ [opcode, pin, value]     │ -        │
//! │ GetPinValue     │ 3      │ [opcode, pin]            │ [value]  │
//! │ SetButtonMode   │ 4      │ [opcode, pin, mode]      │ -        │
//! └─────────────────┴────────┴──────────────────────────┴──────────┘
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinValue, PullMode};

/// Default TCP port of the connector.
pub const DEFAULT_PORT: u16 = 5555;

/// Largest request frame in bytes.
pub const MAX_REQUEST_SIZE: usize = 3;

/// Size of the `GetPinValue` response.
pub const PIN_VALUE_RESPONSE_SIZE: usize = 1;

/// Command opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    End = 0,
    SetPinDirection = 1,
    SetPinValue = 2,
    GetPinValue = 3,
    SetButtonMode = 4,
}

impl Opcode {
    /// Total request size for this opcode, opcode byte included.
    #[inline]
    pub fn request_size(self) -> usize {
        match self {
            Opcode::End => 1,
            Opcode::GetPinValue => 2,
            Opcode::SetPinDirection | Opcode::SetPinValue | Opcode::SetButtonMode => 3,
        }
    }

    /// Response size the peer sends back for this opcode.
    #[inline]
    pub fn response_size(self) -> usize {
        match self {
            Opcode::GetPinValue => PIN_VALUE_RESPONSE_SIZE,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = GpioError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Opcode::End),
            1 => Ok(Opcode::SetPinDirection),
            2 => Ok(Opcode::SetPinValue),
            3 => Ok(Opcode::GetPinValue),
            4 => Ok(Opcode::SetButtonMode),
            other => Err(GpioError::Protocol(format!("Bad command id {}", other))),
        }
    }
}

/// A decoded request. Pin numbers are already in the wire convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    End,
    SetPinDirection { pin: u8, direction: Direction },
    SetPinValue { pin: u8, value: PinValue },
    GetPinValue { pin: u8 },
    SetButtonMode { pin: u8, mode: PullMode },
}

impl Request {
    #[inline]
    pub fn opcode(&self) -> Opcode {
        match self {
            Request::End => Opcode::End,
            Request::SetPinDirection { .. } => Opcode::SetPinDirection,
            Request::SetPinValue { .. } => Opcode::SetPinValue,
            Request::GetPinValue { .. } => Opcode::GetPinValue,
            Request::SetButtonMode { .. } => Opcode::SetButtonMode,
        }
    }

    /// Encode to wire bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use pinbridge::pin::PinValue;
    /// use pinbridge::protocol::Request;
    ///
    /// let bytes = Request::SetPinValue { pin: 2, value: PinValue::High }.encode();
    /// assert_eq!(&bytes[..], &[2, 2, 1]);
    /// ```
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.opcode().request_size());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Append the wire bytes to `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(self.opcode() as u8);
        match *self {
            Request::End => {}
            Request::SetPinDirection { pin, direction } => {
                buf.put_u8(pin);
                buf.put_u8(direction as u8);
            }
            Request::SetPinValue { pin, value } => {
                buf.put_u8(pin);
                buf.put_u8(value as u8);
            }
            Request::GetPinValue { pin } => buf.put_u8(pin),
            Request::SetButtonMode { pin, mode } => {
                buf.put_u8(pin);
                buf.put_u8(mode as u8);
            }
        }
    }

    /// Decode one request from the front of `buf`.
    ///
    /// Returns `Ok(None)` if `buf` does not yet hold the whole frame, or the
    /// request together with the number of bytes it occupied.
    ///
    /// # Errors
    ///
    /// Unknown opcode or a pull mode byte outside 0..=2.
    pub fn decode(buf: &[u8]) -> Result<Option<(Request, usize)>> {
        let Some(&first) = buf.first() else {
            return Ok(None);
        };
        let opcode = Opcode::try_from(first)?;
        let size = opcode.request_size();
        if buf.len() < size {
            return Ok(None);
        }

        let request = match opcode {
            Opcode::End => Request::End,
            Opcode::SetPinDirection => Request::SetPinDirection {
                pin: buf[1],
                direction: Direction::from_byte(buf[2]),
            },
            Opcode::SetPinValue => Request::SetPinValue {
                pin: buf[1],
                value: PinValue::from_level(buf[2]),
            },
            Opcode::GetPinValue => Request::GetPinValue { pin: buf[1] },
            Opcode::SetButtonMode => Request::SetButtonMode {
                pin: buf[1],
                mode: PullMode::try_from(buf[2])?,
            },
        };
        Ok(Some((request, size)))
    }
}
