//! Facade and builder.
//!
//! [`GpioBuilder`] collects the naming convention and the backend choice,
//! then [`build`](GpioBuilder::build) opens exactly one backend. The
//! resulting [`Gpio`] forwards every call to it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pinbridge::driver::MemoryDriver;
//! use pinbridge::gpio::{Gpio, GpioBackend};
//! use pinbridge::pin::{Direction, PinNaming, PinValue};
//!
//! let gpio = Gpio::builder()
//!     .naming(PinNaming::Physical)
//!     .driver(Arc::new(MemoryDriver::new()))
//!     .build()
//!     .unwrap();
//!
//! gpio.set_direction(11, Direction::Output).unwrap();
//! gpio.write(11, PinValue::High).unwrap();
//! assert_eq!(gpio.read(11).unwrap(), PinValue::High);
//! ```

use std::sync::Arc;

use super::{GpioBackend, LocalGpio, RemoteGpio};
use crate::config::{BackendConfig, GpioConfig, RemoteConfig};
use crate::driver::{default_driver, PinDriver};
use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinNaming, PinValue, PullMode, Translator};

/// Builder for a [`Gpio`] handle.
pub struct GpioBuilder {
    config: GpioConfig,
    driver: Option<Arc<dyn PinDriver>>,
    translator: Option<Arc<Translator>>,
}

impl GpioBuilder {
    /// Create a builder with default settings (BCM naming, local backend).
    pub fn new() -> Self {
        Self::from_config(GpioConfig::default())
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: GpioConfig) -> Self {
        Self {
            config,
            driver: None,
            translator: None,
        }
    }

    /// Naming convention callers will use.
    pub fn naming(mut self, naming: PinNaming) -> Self {
        self.config.naming = naming;
        self
    }

    /// Use the local backend with the default driver.
    pub fn local(mut self) -> Self {
        self.config.backend = BackendConfig::Local;
        self
    }

    /// Use the local backend with `driver`.
    pub fn driver(mut self, driver: Arc<dyn PinDriver>) -> Self {
        self.config.backend = BackendConfig::Local;
        self.driver = Some(driver);
        self
    }

    /// Use the remote backend at `address:port`.
    ///
    /// Keeps a previously set wire naming.
    pub fn remote(mut self, address: &str, port: u16) -> Self {
        let mut remote = self.remote_config();
        remote.address = Some(address.to_string());
        remote.port = port;
        self.config.backend = BackendConfig::Remote(remote);
        self
    }

    /// Numbering used on the wire; switches to the remote backend.
    pub fn wire_naming(mut self, naming: PinNaming) -> Self {
        let mut remote = self.remote_config();
        remote.wire_naming = naming;
        self.config.backend = BackendConfig::Remote(remote);
        self
    }

    /// Use a custom translator instead of the shared built-in one.
    pub fn translator(mut self, translator: Arc<Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Open the configured backend.
    ///
    /// # Errors
    ///
    /// - [`GpioError::Configuration`] for a local backend with no driver
    /// - [`GpioError::HardwareInitialization`] if the driver fails to start
    /// - [`GpioError::InvalidAddress`] / [`GpioError::Io`] if the connector
    ///   cannot be reached
    pub fn build(self) -> Result<Gpio> {
        let translator = match self.translator {
            Some(translator) => translator,
            None => Translator::shared()?,
        };
        let naming = self.config.naming;

        let backend: Box<dyn GpioBackend> = match self.config.backend {
            BackendConfig::Local => {
                let driver = self.driver.or_else(default_driver).ok_or_else(|| {
                    GpioError::Configuration(
                        "local backend needs a driver (enable the `wiringpi` feature or pass one)"
                            .to_string(),
                    )
                })?;
                Box::new(LocalGpio::new(naming, driver, translator)?)
            }
            BackendConfig::Remote(remote) => {
                Box::new(RemoteGpio::connect(naming, &remote, translator)?)
            }
        };

        Ok(Gpio::from_backend(backend))
    }

    fn remote_config(&self) -> RemoteConfig {
        match &self.config.backend {
            BackendConfig::Remote(remote) => remote.clone(),
            BackendConfig::Local => RemoteConfig::default(),
        }
    }
}

impl Default for GpioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// GPIO handle over a local or remote backend.
///
/// Translation happens inside the backend; the facade only forwards.
/// Dropping the handle releases the backend.
pub struct Gpio {
    backend: Box<dyn GpioBackend>,
}

impl Gpio {
    /// Create a new builder.
    pub fn builder() -> GpioBuilder {
        GpioBuilder::new()
    }

    /// Wrap an existing backend.
    pub fn from_backend(backend: Box<dyn GpioBackend>) -> Self {
        Self { backend }
    }

    /// Local handle over `driver` with the shared translator.
    pub fn local(naming: PinNaming, driver: Arc<dyn PinDriver>) -> Result<Self> {
        Self::builder().naming(naming).driver(driver).build()
    }

    /// Remote handle; an empty address means `localhost`.
    pub fn remote(naming: PinNaming, address: &str, port: u16) -> Result<Self> {
        Self::builder().naming(naming).remote(address, port).build()
    }
}

impl GpioBackend for Gpio {
    fn naming(&self) -> PinNaming {
        self.backend.naming()
    }

    fn set_direction(&self, pin: i32, direction: Direction) -> Result<()> {
        self.backend.set_direction(pin, direction)
    }

    fn read(&self, pin: i32) -> Result<PinValue> {
        self.backend.read(pin)
    }

    fn write(&self, pin: i32, value: PinValue) -> Result<()> {
        self.backend.write(pin, value)
    }

    fn set_pull_mode(&self, pin: i32, mode: PullMode) -> Result<()> {
        self.backend.set_pull_mode(pin, mode)
    }

    fn close(&self) -> Result<()> {
        self.backend.close()
    }
}
