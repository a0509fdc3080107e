//! Joystick module - Linux `/dev/input/jsN` event reader.
//!
//! Independent of the GPIO core; typically used alongside it to drive pins
//! from a game pad.

mod event;
mod reader;

pub use event::{event_type, JoystickEvent, EVENT_SIZE};
pub use reader::{
    device_names, device_path, is_device_name, BlockingJoystick, JoystickReader,
    DEFAULT_QUEUE_CAPACITY, DEVICE_DIR,
};
