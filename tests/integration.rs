//! Integration tests for pinbridge.
//!
//! These run a real connector on a loopback port and drive it through the
//! blocking remote backend, next to an equivalent local backend.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use pinbridge::connector::{Connector, ConnectorConfig};
use pinbridge::driver::{DriverOp, MemoryDriver};
use pinbridge::gpio::RemoteGpio;
use pinbridge::pin::{Direction, PinNaming, PinValue, PullMode, Translator, PIN_TABLE};
use pinbridge::{ErrorKind, Gpio, GpioBackend, GpioBuilder, GpioConfig, ShiftRegister};
use tokio::sync::oneshot;

/// Start a connector over `driver` on an ephemeral port.
async fn start_connector(driver: Arc<MemoryDriver>) -> (SocketAddr, oneshot::Sender<()>) {
    let config = ConnectorConfig::new().address("127.0.0.1").port(0);
    let connector = Connector::bind(&config, driver).await.unwrap();
    let addr = connector.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    tokio::spawn(connector.run_until(async move {
        let _ = stop_rx.await;
    }));
    (addr, stop_tx)
}

/// Remote pin operations land on the connector's driver in wiringPi numbering.
#[tokio::test(flavor = "multi_thread")]
async fn test_remote_round_trip_through_connector() {
    let driver = Arc::new(MemoryDriver::new());
    let (addr, stop) = start_connector(driver.clone()).await;

    let observed = tokio::task::spawn_blocking(move || {
        let gpio = Gpio::remote(PinNaming::Bcm, "127.0.0.1", addr.port()).unwrap();
        assert_eq!(gpio.naming(), PinNaming::Bcm);

        gpio.set_direction(17, Direction::Output).unwrap();
        gpio.write(17, PinValue::High).unwrap();
        gpio.set_pull_mode(22, PullMode::PullUp).unwrap();
        let level = gpio.read(17).unwrap();
        gpio.close().unwrap();
        level
    })
    .await
    .unwrap();

    assert_eq!(observed, PinValue::High);
    // Let the session see End before inspecting the log.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(
        driver.operations(),
        vec![
            DriverOp::SetDirection(0, Direction::Output),
            DriverOp::Write(0, PinValue::High),
            DriverOp::SetPullMode(3, PullMode::PullUp),
            DriverOp::Read(0),
        ]
    );

    let _ = stop.send(());
}

/// Local and remote backends behave the same for the same calls.
#[tokio::test(flavor = "multi_thread")]
async fn test_local_and_remote_agree() {
    let remote_driver = Arc::new(MemoryDriver::new());
    let (addr, stop) = start_connector(remote_driver.clone()).await;
    let local_driver = Arc::new(MemoryDriver::new());
    let local_for_thread = local_driver.clone();

    tokio::task::spawn_blocking(move || {
        let local = Gpio::local(PinNaming::Physical, local_for_thread).unwrap();
        let remote = Gpio::remote(PinNaming::Physical, "127.0.0.1", addr.port()).unwrap();

        for gpio in [&local, &remote] {
            for (i, pin) in [11, 13, 15, 40].into_iter().enumerate() {
                gpio.set_direction(pin, Direction::Output).unwrap();
                gpio.write(pin, PinValue::from(i % 2 == 0)).unwrap();
            }
            for (i, pin) in [11, 13, 15, 40].into_iter().enumerate() {
                assert_eq!(gpio.read(pin).unwrap(), PinValue::from(i % 2 == 0));
            }
            assert_eq!(
                gpio.write(1, PinValue::High).unwrap_err().kind(),
                ErrorKind::InvalidPinNumber
            );
        }
    })
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(local_driver.operations(), remote_driver.operations());

    let _ = stop.send(());
}

/// Bytes on the wire match the frame table exactly.
#[test]
fn test_wire_bytes_seen_by_raw_peer() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut seen = Vec::new();

        // SetPinValue (3 bytes) then GetPinValue (2 bytes).
        let mut frame = [0u8; 5];
        stream.read_exact(&mut frame).unwrap();
        seen.extend_from_slice(&frame);
        stream.write_all(&[0]).unwrap();

        // End, then EOF.
        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        seen.extend(rest);
        seen
    });

    let gpio = Gpio::builder()
        .naming(PinNaming::Bcm)
        .wire_naming(PinNaming::Bcm)
        .remote("127.0.0.1", port)
        .build()
        .unwrap();
    gpio.write(2, PinValue::High).unwrap();
    assert_eq!(gpio.read(2).unwrap(), PinValue::Low);
    drop(gpio);

    assert_eq!(peer.join().unwrap(), vec![2, 2, 1, 3, 2, 0]);
}

/// A peer that hangs up instead of answering yields a protocol violation.
#[test]
fn test_peer_closing_before_reply() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    // Read the request, then hang up without replying.
    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 2];
        stream.read_exact(&mut request).unwrap();
        request
    });

    let stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    let gpio = RemoteGpio::with_stream(
        PinNaming::Bcm,
        PinNaming::WiringPi,
        Translator::shared().unwrap(),
        stream,
    );

    let err = gpio.read(17).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    // BCM 17 is wiringPi 0.
    assert_eq!(peer.join().unwrap(), [3, 0]);
}

/// Config document -> builder -> remote handle -> shift register.
#[tokio::test(flavor = "multi_thread")]
async fn test_shift_register_over_remote_from_config() {
    let driver = Arc::new(MemoryDriver::new());
    let (addr, stop) = start_connector(driver.clone()).await;

    let json = format!(
        r#"{{ "naming": "wiringpi", "backend": {{ "type": "remote", "address": "127.0.0.1", "port": {} }} }}"#,
        addr.port()
    );

    tokio::task::spawn_blocking(move || {
        let config = GpioConfig::from_json(&json).unwrap();
        let gpio = GpioBuilder::from_config(config).build().unwrap();
        let register = ShiftRegister::new(gpio, 0, 1, 2).unwrap();
        register.send(0b1000_0001).unwrap();
        register.into_inner().close().unwrap();
    })
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let writes = driver
        .operations()
        .into_iter()
        .filter(|op| matches!(op, DriverOp::Write(..)))
        .count();
    // 3 initial lows + 8 bits x 3 writes + 2 latch writes.
    assert_eq!(writes, 3 + 24 + 2);
    assert_eq!(driver.level(2), PinValue::High);

    let _ = stop.send(());
}

/// Every column of the built-in table survives a trip through all conventions.
#[test]
fn test_table_columns_cycle_through_all_namings() {
    let t = Translator::shared().unwrap();
    for col in 0..PIN_TABLE[0].len() {
        let physical = PIN_TABLE[0][col];
        let wiringpi = t.convert(PinNaming::Physical, PinNaming::WiringPi, physical).unwrap();
        let bcm = t.convert(PinNaming::WiringPi, PinNaming::Bcm, wiringpi).unwrap();
        let back = t.convert(PinNaming::Bcm, PinNaming::Physical, bcm).unwrap();
        assert_eq!(back, physical);
    }
}
