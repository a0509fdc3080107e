//! Linux joystick (`/dev/input/jsN`) event records.
//!
//! Each record is 8 bytes, little endian:
//! ```text
//! ┌───────────┬────────┬──────┬────────┐
//! │ Timestamp │ Value  │ Type │ Number │
//! │ u32 ms    │ i16    │ u8   │ u8     │
//! └───────────┴────────┴──────┴────────┘
//! ```

/// Size of one event record in bytes.
pub const EVENT_SIZE: usize = 8;

/// Event type bits.
pub mod event_type {
    /// Button pressed or released.
    pub const BUTTON: u8 = 0x01;
    /// Axis moved.
    pub const AXIS: u8 = 0x02;
    /// Synthetic event describing initial state.
    pub const INIT: u8 = 0x80;

    /// Bits this crate understands.
    pub const KNOWN_MASK: u8 = BUTTON | AXIS | INIT;

    #[inline]
    pub fn has_flag(kind: u8, flag: u8) -> bool {
        kind & flag != 0
    }
}

/// One joystick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickEvent {
    /// Milliseconds, driver clock.
    pub timestamp: u32,
    /// Axis position or button state (0/1).
    pub value: i16,
    /// Type bits (see [`event_type`]); unknown bits are cleared.
    pub kind: u8,
    /// Axis or button number.
    pub number: u8,
}

impl JoystickEvent {
    pub fn new(timestamp: u32, value: i16, kind: u8, number: u8) -> Self {
        Self {
            timestamp,
            value,
            kind: kind & event_type::KNOWN_MASK,
            number,
        }
    }

    /// Decode one record.
    pub fn decode(record: &[u8; EVENT_SIZE]) -> Self {
        Self::new(
            u32::from_le_bytes([record[0], record[1], record[2], record[3]]),
            i16::from_le_bytes([record[4], record[5]]),
            record[6],
            record[7],
        )
    }

    /// Encode back to the kernel layout.
    pub fn encode(&self) -> [u8; EVENT_SIZE] {
        let mut record = [0u8; EVENT_SIZE];
        record[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        record[4..6].copy_from_slice(&self.value.to_le_bytes());
        record[6] = self.kind;
        record[7] = self.number;
        record
    }

    #[inline]
    pub fn is_button(&self) -> bool {
        event_type::has_flag(self.kind, event_type::BUTTON)
    }

    #[inline]
    pub fn is_axis(&self) -> bool {
        event_type::has_flag(self.kind, event_type::AXIS)
    }

    #[inline]
    pub fn is_init(&self) -> bool {
        event_type::has_flag(self.kind, event_type::INIT)
    }
}
