//! Print joystick events; button 0 lights an LED on BCM 17.
//!
//! ```text
//! cargo run --example joystick -- js0 raspberrypi.local
//! ```

use pinbridge::joystick::{device_names, JoystickReader, DEFAULT_QUEUE_CAPACITY};
use pinbridge::pin::{Direction, PinNaming, PinValue};
use pinbridge::{Gpio, GpioBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let name = match args.next() {
        Some(name) => name,
        None => device_names()?.into_iter().next().ok_or("no joystick found")?,
    };
    let address = args.next().unwrap_or_default();

    let gpio = tokio::task::spawn_blocking(move || -> pinbridge::Result<Gpio> {
        let gpio = Gpio::remote(PinNaming::Bcm, &address, 5555)?;
        gpio.set_direction(17, Direction::Output)?;
        Ok(gpio)
    })
    .await??;

    let mut reader = JoystickReader::open(&name, DEFAULT_QUEUE_CAPACITY).await?;
    while let Some(event) = reader.next_event().await {
        println!("{:?}", event);
        if event.is_button() && event.number == 0 {
            gpio.write(17, PinValue::from(event.value != 0))?;
        }
    }

    reader.shutdown().await?;
    Ok(())
}
