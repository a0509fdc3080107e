//! Walk a single lit bit across an SN74HC595.
//!
//! DS on wiringPi 0, SH_CP on wiringPi 1, ST_CP on wiringPi 2. Pass the
//! connector address as the first argument.

use std::time::Duration;

use pinbridge::pin::PinNaming;
use pinbridge::{Gpio, ShiftRegister};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let address = std::env::args().nth(1).unwrap_or_default();
    let gpio = Gpio::remote(PinNaming::WiringPi, &address, 5555)?;
    let register = ShiftRegister::new(gpio, 0, 1, 2)?;

    for round in 0..4 {
        for bit in 0..8 {
            register.send(1 << bit)?;
            std::thread::sleep(Duration::from_millis(100));
        }
        tracing::info!("round {} done", round + 1);
    }

    register.send(0)?;
    Ok(())
}
