//! Joystick device readers.
//!
//! - [`BlockingJoystick`] - read one record per call on the caller's thread
//! - [`JoystickReader`] - background task feeding a bounded queue

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::event::{JoystickEvent, EVENT_SIZE};
use crate::error::{GpioError, Result};

/// Directory holding joystick device nodes.
pub const DEVICE_DIR: &str = "/dev/input";

/// Default capacity of the background event queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Whether `name` looks like a joystick node (`js` followed by a digit).
pub fn is_device_name(name: &str) -> bool {
    name.strip_prefix("js")
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| c.is_ascii_digit())
}

/// Joystick device names under [`DEVICE_DIR`], sorted.
pub fn device_names() -> Result<Vec<String>> {
    device_names_in(Path::new(DEVICE_DIR))
}

fn device_names_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if is_device_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Full path of device `name`, e.g. `js0` -> `/dev/input/js0`.
pub fn device_path(name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if !is_device_name(name) {
        return Err(GpioError::Configuration(format!(
            "Invalid joystick device name: \"{}\"",
            name
        )));
    }
    Ok(Path::new(DEVICE_DIR).join(name))
}

/// Joystick read synchronously, one record per call.
pub struct BlockingJoystick<R: Read = File> {
    source: R,
}

impl BlockingJoystick<File> {
    /// Open `/dev/input/<name>`.
    pub fn open(name: &str) -> Result<Self> {
        let path = device_path(name)?;
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> BlockingJoystick<R> {
    pub fn from_reader(source: R) -> Self {
        Self { source }
    }

    /// Block for the next event. `Ok(None)` once the device is exhausted.
    ///
    /// # Errors
    ///
    /// A partial record is a protocol violation.
    pub fn next_event(&mut self) -> Result<Option<JoystickEvent>> {
        let mut record = [0u8; EVENT_SIZE];
        let n = self.source.read(&mut record)?;
        match n {
            0 => Ok(None),
            EVENT_SIZE => Ok(Some(JoystickEvent::decode(&record))),
            short => Err(GpioError::ProtocolViolation {
                context: "reading joystick event",
                transferred: short,
                expected: EVENT_SIZE,
            }),
        }
    }
}

/// Joystick read by a background task.
///
/// Events queue up to the configured capacity; when the queue is full the
/// task stops reading until the consumer catches up.
pub struct JoystickReader {
    events: mpsc::Receiver<JoystickEvent>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<()>>>,
}

impl JoystickReader {
    /// Open `/dev/input/<name>` and start reading it.
    pub async fn open(name: &str, capacity: usize) -> Result<Self> {
        let path = device_path(name)?;
        let file = tokio::fs::File::open(&path).await?;
        tracing::info!("Reading joystick {}", path.display());
        Ok(Self::spawn(file, capacity))
    }

    /// Start reading records from `source`. Must run inside a tokio runtime.
    pub fn spawn<R>(source: R, capacity: usize) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (events_tx, events) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let result = read_loop(source, events_tx, shutdown_rx).await;
            if let Err(e) = &result {
                tracing::error!("Joystick reader stopped: {}", e);
            }
            result
        });

        Self {
            events,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Next queued event, without waiting.
    pub fn try_event(&mut self) -> Option<JoystickEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. `None` once the reader has stopped and the
    /// queue is drained.
    pub async fn next_event(&mut self) -> Option<JoystickEvent> {
        self.events.recv().await
    }

    /// Stop the background task and wait for it.
    ///
    /// Returns the error that stopped the task early, if any.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| GpioError::Io(io::Error::new(io::ErrorKind::Other, e)))?,
            None => Ok(()),
        }
    }
}

async fn read_loop<R>(
    mut source: R,
    events: mpsc::Sender<JoystickEvent>,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut record = [0u8; EVENT_SIZE];

    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            read = source.read_exact(&mut record) => match read {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("Joystick device closed");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            },
        }

        let event = JoystickEvent::decode(&record);
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            sent = events.send(event) => {
                if sent.is_err() {
                    // Receiver gone.
                    return Ok(());
                }
            }
        }
    }
}
