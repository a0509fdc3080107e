//! Command buffer for accumulating partial reads on the connector side.
//!
//! TCP gives no frame boundaries, so a read may end halfway through a
//! command or carry several. The buffer keeps leftovers in a `BytesMut` and
//! hands out complete [`Request`]s one at a time, so everything before a
//! malformed byte can still run.
//!
//! # Example
//!
//! ```
//! use pinbridge::protocol::{CommandBuffer, Request};
//!
//! let mut buffer = CommandBuffer::new();
//! buffer.push(&[2, 4]);
//! assert_eq!(buffer.next_request().unwrap(), None);
//!
//! buffer.push(&[1, 3, 9]);
//! assert!(buffer.next_request().unwrap().is_some());
//! assert_eq!(buffer.next_request().unwrap(), Some(Request::GetPinValue { pin: 9 }));
//! assert_eq!(buffer.next_request().unwrap(), None);
//! ```

use bytes::{Buf, BytesMut};

use super::wire_format::{Request, MAX_REQUEST_SIZE};
use crate::error::Result;

/// Buffer for incoming bytes that extracts complete requests.
#[derive(Debug)]
pub struct CommandBuffer {
    buffer: BytesMut,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity.max(MAX_REQUEST_SIZE)),
        }
    }

    /// Append received bytes.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the next complete request off the front of the buffer.
    ///
    /// `Ok(None)` if only part of a request is buffered; the bytes stay for
    /// the next [`push`](Self::push).
    ///
    /// # Errors
    ///
    /// Returns a protocol error on an unknown opcode or bad argument byte.
    /// The stream cannot be resynchronized after that; drop the connection.
    pub fn next_request(&mut self) -> Result<Option<Request>> {
        match Request::decode(&self.buffer)? {
            Some((request, used)) => {
                self.buffer.advance(used);
                Ok(Some(request))
            }
            None => Ok(None),
        }
    }

    /// Number of buffered bytes not yet forming a full request.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{Direction, PinValue, PullMode};

    fn push_all(buffer: &mut CommandBuffer, data: &[u8]) -> Result<Vec<Request>> {
        buffer.push(data);
        let mut requests = Vec::new();
        while let Some(request) = buffer.next_request()? {
            requests.push(request);
        }
        Ok(requests)
    }

    #[test]
    fn test_multiple_requests_in_one_push() {
        let mut buffer = CommandBuffer::new();
        let requests = push_all(&mut buffer, &[1, 4, 1, 2, 4, 1, 3, 4, 0]).unwrap();

        assert_eq!(
            requests,
            vec![
                Request::SetPinDirection {
                    pin: 4,
                    direction: Direction::Output
                },
                Request::SetPinValue {
                    pin: 4,
                    value: PinValue::High
                },
                Request::GetPinValue { pin: 4 },
                Request::End,
            ]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buffer = CommandBuffer::new();
        let bytes = [4u8, 6, 2, 3, 6];
        let mut all = Vec::new();

        for b in bytes {
            all.extend(push_all(&mut buffer, &[b]).unwrap());
        }

        assert_eq!(
            all,
            vec![
                Request::SetButtonMode {
                    pin: 6,
                    mode: PullMode::PullUp
                },
                Request::GetPinValue { pin: 6 },
            ]
        );
    }

    #[test]
    fn test_partial_frame_kept() {
        let mut buffer = CommandBuffer::new();
        assert!(push_all(&mut buffer, &[2, 1]).unwrap().is_empty());
        assert_eq!(buffer.len(), 2);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_bad_opcode_is_error() {
        let mut buffer = CommandBuffer::new();
        assert!(push_all(&mut buffer, &[3, 1, 42]).is_err());
    }

    #[test]
    fn test_requests_before_bad_byte_still_come_out() {
        let mut buffer = CommandBuffer::new();
        buffer.push(&[2, 9, 1, 77]);

        assert_eq!(
            buffer.next_request().unwrap(),
            Some(Request::SetPinValue {
                pin: 9,
                value: PinValue::High
            })
        );
        assert!(buffer.next_request().is_err());
    }
}
