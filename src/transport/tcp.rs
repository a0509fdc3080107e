//! TCP transport for the remote GPIO link.
//!
//! - Client side: blocking [`std::net::TcpStream`], one per remote backend
//! - Connector side: [`tokio::net::TcpListener`]
//!
//! # Example
//!
//! ```ignore
//! use pinbridge::transport::connect;
//!
//! let stream = connect(Some("raspberrypi.local"), 5555)?;
//! ```

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use tokio::net::TcpListener;

use crate::error::{GpioError, Result};

/// Address used when none (or an empty one) is given.
pub const DEFAULT_ADDRESS: &str = "localhost";

/// Resolve `address:port` to the first socket address it names.
///
/// A missing or blank address means [`DEFAULT_ADDRESS`].
///
/// # Errors
///
/// [`GpioError::InvalidAddress`] if the lookup fails or yields nothing.
pub fn resolve(address: Option<&str>, port: u16) -> Result<SocketAddr> {
    let host = match address.map(str::trim) {
        Some(host) if !host.is_empty() => host,
        _ => DEFAULT_ADDRESS,
    };

    let first = match (host, port).to_socket_addrs() {
        Ok(mut addrs) => addrs.next(),
        Err(e) => {
            tracing::debug!("Lookup of {} failed: {}", host, e);
            None
        }
    };

    first.ok_or_else(|| {
        let err = GpioError::InvalidAddress(host.to_string());
        tracing::error!("{}", err);
        err
    })
}

/// Open the persistent stream to a connector.
///
/// Nagle is disabled: every frame is a few bytes and reads wait on replies.
pub fn connect(address: Option<&str>, port: u16) -> Result<TcpStream> {
    let endpoint = resolve(address, port)?;
    let stream = TcpStream::connect(endpoint)?;
    stream.set_nodelay(true)?;
    tracing::info!("Remote GPIO connected to {}", endpoint);
    Ok(stream)
}

/// Bind the connector listener.
pub async fn bind(address: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((address, port)).await?;
    tracing::debug!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}
