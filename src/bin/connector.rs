//! Connector binary - exposes this machine's GPIO pins over TCP.
//!
//! ```text
//! pinbridge-connector [port]
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every command.
//! Without the `wiringpi` feature the pins are simulated in memory.

use std::sync::Arc;

use pinbridge::connector::{Connector, ConnectorConfig};
use pinbridge::driver::PinDriver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConnectorConfig::default();
    if let Some(port) = std::env::args().nth(1) {
        config.port = port.parse()?;
    }

    let connector = Connector::bind(&config, driver()).await?;

    connector
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Caught Ctrl-C, exiting");
        })
        .await?;

    Ok(())
}

#[cfg(feature = "wiringpi")]
fn driver() -> Arc<dyn PinDriver> {
    Arc::new(pinbridge::driver::WiringPiDriver::new())
}

#[cfg(not(feature = "wiringpi"))]
fn driver() -> Arc<dyn PinDriver> {
    tracing::warn!("Built without the `wiringpi` feature, pins are simulated");
    Arc::new(pinbridge::driver::MemoryDriver::new())
}
