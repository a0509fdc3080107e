//! Remote backend: pins behind a connector, reached over one TCP stream.
//!
//! Each call becomes one fixed-size command (see [`crate::protocol`]).
//! Only `read` waits for a reply. The stream sits behind a mutex, so a
//! request and its reply are never interleaved with another command.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{translate_pin, GpioBackend};
use crate::config::RemoteConfig;
use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinNaming, PinValue, PullMode, Translator};
use crate::protocol::{Request, PIN_VALUE_RESPONSE_SIZE};
use crate::transport;

/// Backend that forwards every call to a connector.
///
/// Generic over the stream so tests can run it against in-memory buffers.
pub struct RemoteGpio<S: Read + Write + Send = TcpStream> {
    naming: PinNaming,
    wire_naming: PinNaming,
    translator: Arc<Translator>,
    /// `None` once closed.
    stream: Mutex<Option<S>>,
}

impl RemoteGpio<TcpStream> {
    /// Resolve the configured address and connect.
    ///
    /// # Errors
    ///
    /// [`GpioError::InvalidAddress`] if the address does not resolve,
    /// [`GpioError::Io`] if the connection is refused.
    pub fn connect(
        naming: PinNaming,
        config: &RemoteConfig,
        translator: Arc<Translator>,
    ) -> Result<Self> {
        let stream = transport::connect(config.address.as_deref(), config.port)?;
        Ok(Self::with_stream(
            naming,
            config.wire_naming,
            translator,
            stream,
        ))
    }
}

impl<S: Read + Write + Send> RemoteGpio<S> {
    /// Wrap an already connected stream.
    pub fn with_stream(
        naming: PinNaming,
        wire_naming: PinNaming,
        translator: Arc<Translator>,
        stream: S,
    ) -> Self {
        Self {
            naming,
            wire_naming,
            translator,
            stream: Mutex::new(Some(stream)),
        }
    }

    /// Naming convention of pin numbers on the wire.
    pub fn wire_naming(&self) -> PinNaming {
        self.wire_naming
    }

    /// Whether [`close`](GpioBackend::close) already ran.
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    fn wire_pin(&self, pin: i32) -> Result<u8> {
        translate_pin(&self.translator, self.naming, self.wire_naming, pin)
    }

    fn lock(&self) -> MutexGuard<'_, Option<S>> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send one command and, if it has one, wait for its reply.
    ///
    /// Any failure leaves the stream out of step with the peer, so it is
    /// dropped without `End` and the backend counts as closed.
    fn transact(&self, request: Request, context: &'static str) -> Result<Option<PinValue>> {
        let mut guard = self.lock();
        let stream = guard.as_mut().ok_or_else(|| {
            GpioError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "remote GPIO is closed",
            ))
        })?;

        let result = exchange(stream, request, context);
        if result.is_err() {
            guard.take();
            tracing::warn!("Remote GPIO connection dropped after failed exchange");
        }
        result
    }

    /// Send `End` (best effort) and drop the stream. Runs at most once.
    fn shutdown(&self) {
        let mut guard = self.lock();
        if let Some(mut stream) = guard.take() {
            if let Err(e) = send_frame(&mut stream, Request::End, "ending session") {
                tracing::debug!("Ignoring error while closing remote GPIO: {}", e);
            }
            tracing::info!("Remote GPIO disconnected");
        }
    }
}

impl<S: Read + Write + Send> GpioBackend for RemoteGpio<S> {
    fn naming(&self) -> PinNaming {
        self.naming
    }

    fn set_direction(&self, pin: i32, direction: Direction) -> Result<()> {
        let pin = self.wire_pin(pin)?;
        self.transact(
            Request::SetPinDirection { pin, direction },
            "setting pin direction",
        )?;
        Ok(())
    }

    fn read(&self, pin: i32) -> Result<PinValue> {
        let pin = self.wire_pin(pin)?;
        let context = "reading pin value";
        self.transact(Request::GetPinValue { pin }, context)?
            .ok_or_else(|| violation(context, 0, PIN_VALUE_RESPONSE_SIZE))
    }

    fn write(&self, pin: i32, value: PinValue) -> Result<()> {
        let pin = self.wire_pin(pin)?;
        self.transact(Request::SetPinValue { pin, value }, "setting pin value")?;
        Ok(())
    }

    fn set_pull_mode(&self, pin: i32, mode: PullMode) -> Result<()> {
        let pin = self.wire_pin(pin)?;
        self.transact(
            Request::SetButtonMode { pin, mode },
            "setting button mode",
        )?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.shutdown();
        Ok(())
    }
}

impl<S: Read + Write + Send> Drop for RemoteGpio<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Write one frame and read its reply, if the opcode has one.
fn exchange<S: Read + Write>(
    stream: &mut S,
    request: Request,
    context: &'static str,
) -> Result<Option<PinValue>> {
    send_frame(stream, request, context)?;

    if request.opcode().response_size() == 0 {
        return Ok(None);
    }

    let mut response = [0u8; PIN_VALUE_RESPONSE_SIZE];
    let received = stream.read(&mut response)?;
    if received != response.len() {
        return Err(violation(context, received, response.len()));
    }
    PinValue::try_from(response[0]).map(Some)
}

/// Write a whole frame in a single call. A short write is fatal.
fn send_frame<S: Write>(stream: &mut S, request: Request, context: &'static str) -> Result<()> {
    let frame = request.encode();
    let sent = stream.write(&frame)?;
    if sent != frame.len() {
        return Err(violation(context, sent, frame.len()));
    }
    stream.flush()?;
    Ok(())
}

fn violation(context: &'static str, transferred: usize, expected: usize) -> GpioError {
    let err = GpioError::ProtocolViolation {
        context,
        transferred,
        expected,
    };
    tracing::error!("{}", err);
    err
}
