//! Protocol module - wire format and command framing.
//!
//! This module implements the binary protocol between a remote backend and
//! the connector:
//! - Fixed-size command frames, opcode first, no length prefix
//! - Command buffer for accumulating partial reads

mod command_buffer;
mod wire_format;

pub use command_buffer::CommandBuffer;
pub use wire_format::{
    Opcode, Request, DEFAULT_PORT, MAX_REQUEST_SIZE, PIN_VALUE_RESPONSE_SIZE,
};
