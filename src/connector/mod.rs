//! Connector - the peer process that exposes local pins over TCP.
//!
//! A [`RemoteGpio`](crate::gpio::RemoteGpio) on another machine connects
//! here. Each connection is served by its own task:
//! 1. Read whatever bytes arrived
//! 2. Cut them into commands with a [`CommandBuffer`](crate::protocol::CommandBuffer)
//! 3. Run each command against the [`PinDriver`](crate::driver::PinDriver)
//! 4. Reply with one byte for `GetPinValue`
//!
//! `End`, end of stream or a malformed command closes the connection; the
//! listener keeps accepting.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pinbridge::connector::{Connector, ConnectorConfig};
//! use pinbridge::driver::MemoryDriver;
//!
//! #[tokio::main]
//! async fn main() -> pinbridge::Result<()> {
//!     let connector = Connector::bind(&ConnectorConfig::default(), Arc::new(MemoryDriver::new())).await?;
//!     connector.run().await
//! }
//! ```

mod server;

pub use server::{serve_connection, Connector, ConnectorConfig};
