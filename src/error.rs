//! Error types for pinbridge.

use thiserror::Error;

use crate::pin::PinNaming;

/// Main error type for all GPIO operations.
#[derive(Debug, Error)]
pub enum GpioError {
    /// Static inconsistency (pin table vs naming conventions, missing driver, bad config).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pin number could not be translated between two naming conventions.
    #[error("Cannot convert pin number {pin} from {source_naming} to {target_naming}")]
    InvalidPinNumber {
        pin: i32,
        source_naming: PinNaming,
        target_naming: PinNaming,
    },

    /// Remote address did not resolve to any socket address.
    #[error("Bad address: {0} to operate GPIO on remote")]
    InvalidAddress(String),

    /// A frame was sent or received with the wrong byte count, or carried a bad value.
    #[error("Protocol violation while {context}: transferred {transferred} of {expected} bytes")]
    ProtocolViolation {
        context: &'static str,
        transferred: usize,
        expected: usize,
    },

    /// Malformed byte content on the wire.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// One-time hardware initialization failed.
    #[error("Failed to initialize GPIO hardware: {0}")]
    HardwareInitialization(String),

    /// I/O error during socket or device operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`GpioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inconsistent pin table, missing driver or bad config document.
    Configuration,
    /// Malformed input: untranslatable pin or unresolvable address.
    InvalidPinNumber,
    /// Short transfer or bad byte on the wire.
    ProtocolViolation,
    /// Driver setup failed.
    HardwareInitialization,
    /// Socket or device I/O failed.
    Io,
}

impl GpioError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GpioError::Configuration(_) | GpioError::Json(_) => ErrorKind::Configuration,
            GpioError::InvalidPinNumber { .. } | GpioError::InvalidAddress(_) => {
                ErrorKind::InvalidPinNumber
            }
            GpioError::ProtocolViolation { .. } | GpioError::Protocol(_) => {
                ErrorKind::ProtocolViolation
            }
            GpioError::HardwareInitialization(_) => ErrorKind::HardwareInitialization,
            GpioError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias using GpioError.
pub type Result<T> = std::result::Result<T, GpioError>;
