//! Construction-time configuration.
//!
//! Configs are plain serde types so they can live in a JSON file:
//!
//! ```
//! use pinbridge::config::{BackendConfig, GpioConfig};
//! use pinbridge::pin::PinNaming;
//!
//! let config = GpioConfig::from_json(
//!     r#"{ "naming": "physical", "backend": { "type": "remote", "address": "pi4" } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.naming, PinNaming::Physical);
//! match config.backend {
//!     BackendConfig::Remote(remote) => assert_eq!(remote.port, 5555),
//!     BackendConfig::Local => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pin::PinNaming;
use crate::protocol::DEFAULT_PORT;

/// Settings for a [`Gpio`](crate::gpio::Gpio) handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    /// Naming convention callers use. Default: BCM.
    pub naming: PinNaming,
    /// Which backend to open. Default: local.
    pub backend: BackendConfig,
}

impl GpioConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Backend selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    #[default]
    Local,
    Remote(RemoteConfig),
}

/// Where the connector lives and how pins are numbered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Host name or IP; `None` means `localhost`.
    pub address: Option<String>,
    pub port: u16,
    /// Numbering the connector's driver expects. Default: wiringPi.
    pub wire_naming: PinNaming,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: DEFAULT_PORT,
            wire_naming: PinNaming::WiringPi,
        }
    }
}
