//! Blink two LEDs in alternation on a remote Pi.
//!
//! Start `pinbridge-connector` on the Pi, then:
//!
//! ```text
//! cargo run --example blink -- raspberrypi.local
//! ```
//!
//! LEDs on BCM 5 and BCM 17. Runs until killed.

use std::time::Duration;

use pinbridge::pin::{Direction, PinNaming, PinValue};
use pinbridge::{Gpio, GpioBackend};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let address = std::env::args().nth(1).unwrap_or_default();
    let gpio = Gpio::remote(PinNaming::Bcm, &address, 5555)?;

    let pins = [5, 17];
    for pin in pins {
        gpio.set_direction(pin, Direction::Output)?;
    }

    let mut first_on = true;
    loop {
        gpio.write(pins[0], PinValue::from(first_on))?;
        gpio.write(pins[1], PinValue::from(!first_on))?;
        first_on = !first_on;
        std::thread::sleep(Duration::from_millis(200));
    }
}
