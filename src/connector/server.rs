//! Accept loop and per-connection command loop.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::driver::PinDriver;
use crate::error::{GpioError, Result};
use crate::protocol::{CommandBuffer, Request, DEFAULT_PORT};
use crate::transport;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Interface to bind. Default: all interfaces.
    pub address: String,
    pub port: u16,
}

impl ConnectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// A bound connector, ready to serve.
pub struct Connector {
    listener: TcpListener,
    driver: Arc<dyn PinDriver>,
}

impl Connector {
    /// Initialize the driver, then bind the listener.
    pub async fn bind(config: &ConnectorConfig, driver: Arc<dyn PinDriver>) -> Result<Self> {
        driver.initialize()?;
        let listener = transport::bind(&config.address, config.port).await?;
        Ok(Self { listener, driver })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` completes.
    ///
    /// Sessions already running are left to finish on their own.
    pub async fn run_until<F: Future<Output = ()>>(self, shutdown: F) -> Result<()> {
        tokio::pin!(shutdown);
        tracing::info!("Waiting for connection on {}", self.local_addr()?);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Connector shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(e) => {
                            tracing::warn!("Accept failed: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!("Could not disable Nagle for {}: {}", peer, e);
                    }
                    tracing::info!("Connected: {}", peer);

                    let driver = self.driver.clone();
                    tokio::spawn(async move {
                        match serve_connection(stream, driver).await {
                            Ok(()) => tracing::info!("Disconnected: {}", peer),
                            Err(e) => tracing::error!("Session with {} ended: {}", peer, e),
                        }
                    });
                }
            }
        }
    }
}

/// Serve one connection until `End`, end of stream or a protocol error.
pub async fn serve_connection<S>(mut stream: S, driver: Arc<dyn PinDriver>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut commands = CommandBuffer::new();
    let mut buf = [0u8; 256];

    loop {
        let n = match stream.read(&mut buf).await {
            Ok(0) => {
                if !commands.is_empty() {
                    return Err(GpioError::Protocol(format!(
                        "Connection closed inside a command ({} bytes pending)",
                        commands.len()
                    )));
                }
                return Ok(());
            }
            Ok(n) => n,
            Err(e) => return Err(GpioError::Io(e)),
        };

        commands.push(&buf[..n]);
        while let Some(request) = commands.next_request()? {
            if request == Request::End {
                tracing::debug!("Disconnecting...");
                return Ok(());
            }
            if let Some(reply) = execute(driver.as_ref(), request) {
                stream.write_all(&[reply]).await?;
                stream.flush().await?;
            }
        }
    }
}

/// Run one request against the driver; returns the reply byte, if any.
fn execute(driver: &dyn PinDriver, request: Request) -> Option<u8> {
    match request {
        Request::End => None,
        Request::SetPinDirection { pin, direction } => {
            tracing::debug!("Set mode. pin {}, dir: {:?}", pin, direction);
            driver.set_direction(pin, direction);
            None
        }
        Request::SetPinValue { pin, value } => {
            tracing::debug!("Set value. pin {}, value: {:?}", pin, value);
            driver.write(pin, value);
            None
        }
        Request::GetPinValue { pin } => {
            let value = driver.read(pin);
            tracing::debug!("Get value. pin {}, value: {:?}", pin, value);
            Some(value as u8)
        }
        Request::SetButtonMode { pin, mode } => {
            tracing::debug!("Set button mode. pin {}, mode: {:?}", pin, mode);
            driver.set_pull_mode(pin, mode);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverOp, MemoryDriver};
    use crate::pin::{Direction, PinValue, PullMode};
    use tokio::io::duplex;

    #[test]
    fn test_config_builder() {
        let config = ConnectorConfig::new().address("127.0.0.1").port(7000);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 7000);
        assert_eq!(ConnectorConfig::default().port, 5555);
    }

    #[tokio::test]
    async fn test_commands_reach_driver() {
        let driver = Arc::new(MemoryDriver::new());
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[1, 0, 1, 2, 0, 1, 4, 3, 2, 0]).await.unwrap();
        session.await.unwrap().unwrap();

        assert_eq!(
            driver.operations(),
            vec![
                DriverOp::SetDirection(0, Direction::Output),
                DriverOp::Write(0, PinValue::High),
                DriverOp::SetPullMode(3, PullMode::PullUp),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_pin_value_replies_one_byte() {
        let driver = Arc::new(MemoryDriver::new());
        driver.set_input_level(5, PinValue::High);
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[3, 5]).await.unwrap();
        let mut reply = [0u8; 1];
        client.read_exact(&mut reply).await.unwrap();
        assert_eq!(reply, [1]);

        client.write_all(&[3, 6]).await.unwrap();
        client.read_exact(&mut reply).await.unwrap();
        assert_eq!(reply, [0]);

        client.write_all(&[0]).await.unwrap();
        session.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_split_command_across_writes() {
        let driver = Arc::new(MemoryDriver::new());
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[2, 9]).await.unwrap();
        client.flush().await.unwrap();
        tokio::task::yield_now().await;
        client.write_all(&[1]).await.unwrap();
        drop(client);

        session.await.unwrap().unwrap();
        assert_eq!(driver.level(9), PinValue::High);
    }

    #[tokio::test]
    async fn test_bad_opcode_closes_session() {
        let driver = Arc::new(MemoryDriver::new());
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[77]).await.unwrap();
        let result = session.await.unwrap();
        assert!(matches!(result, Err(GpioError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_commands_before_bad_opcode_still_run() {
        let driver = Arc::new(MemoryDriver::new());
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[2, 9, 1, 77]).await.unwrap();
        let result = session.await.unwrap();

        assert!(matches!(result, Err(GpioError::Protocol(_))));
        assert_eq!(driver.operations(), vec![DriverOp::Write(9, PinValue::High)]);
        assert_eq!(driver.level(9), PinValue::High);
    }

    #[tokio::test]
    async fn test_truncated_command_on_close() {
        let driver = Arc::new(MemoryDriver::new());
        let (mut client, server) = duplex(64);
        let session = tokio::spawn(serve_connection(server, driver.clone()));

        client.write_all(&[1, 4]).await.unwrap();
        drop(client);

        assert!(session.await.unwrap().is_err());
        assert!(driver.operations().is_empty());
    }

    #[tokio::test]
    async fn test_bind_initializes_driver_once() {
        let driver = Arc::new(MemoryDriver::new());
        let config = ConnectorConfig::new().address("127.0.0.1").port(0);
        let connector = Connector::bind(&config, driver.clone()).await.unwrap();

        assert_eq!(driver.init_calls(), 1);
        assert_ne!(connector.local_addr().unwrap().port(), 0);
        connector.run_until(async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_fails_when_driver_fails() {
        let driver = Arc::new(MemoryDriver::failing("no hardware"));
        let config = ConnectorConfig::new().address("127.0.0.1").port(0);
        let result = Connector::bind(&config, driver).await;
        assert!(matches!(result, Err(GpioError::HardwareInitialization(_))));
    }
}
