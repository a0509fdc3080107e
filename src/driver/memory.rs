//! Simulated pin bank.
//!
//! Keeps per-pin direction, level and pull mode in memory and records every
//! call, so tests can assert exactly what reached "hardware".

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::PinDriver;
use crate::error::{GpioError, Result};
use crate::pin::{Direction, PinNaming, PinValue, PullMode};

/// One recorded driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOp {
    SetDirection(u8, Direction),
    Read(u8),
    Write(u8, PinValue),
    SetPullMode(u8, PullMode),
}

#[derive(Debug, Clone, Copy)]
struct PinState {
    direction: Direction,
    level: PinValue,
    pull: PullMode,
}

impl Default for PinState {
    fn default() -> Self {
        Self {
            direction: Direction::Input,
            level: PinValue::Low,
            pull: PullMode::Off,
        }
    }
}

#[derive(Debug, Default)]
struct Bank {
    pins: HashMap<u8, PinState>,
    ops: Vec<DriverOp>,
}

/// In-memory [`PinDriver`].
#[derive(Debug)]
pub struct MemoryDriver {
    naming: PinNaming,
    bank: Mutex<Bank>,
    init_calls: AtomicUsize,
    init_failure: Option<String>,
}

impl MemoryDriver {
    /// Simulated bank addressed in wiringPi numbering, like the real peer.
    pub fn new() -> Self {
        Self::with_naming(PinNaming::WiringPi)
    }

    /// Simulated bank addressed in `naming`.
    pub fn with_naming(naming: PinNaming) -> Self {
        Self {
            naming,
            bank: Mutex::new(Bank::default()),
            init_calls: AtomicUsize::new(0),
            init_failure: None,
        }
    }

    /// A driver whose initialization always fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            init_failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    /// Drive an input pin from "outside" (a button, another device).
    pub fn set_input_level(&self, pin: u8, level: PinValue) {
        self.bank().pins.entry(pin).or_default().level = level;
    }

    /// Current level of `pin` (Low if never touched).
    pub fn level(&self, pin: u8) -> PinValue {
        self.state(pin).level
    }

    /// Current direction of `pin` (Input if never touched).
    pub fn direction(&self, pin: u8) -> Direction {
        self.state(pin).direction
    }

    /// Current pull mode of `pin` (Off if never touched).
    pub fn pull_mode(&self, pin: u8) -> PullMode {
        self.state(pin).pull
    }

    /// Number of times `initialize` was called.
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Every driver call so far, in order.
    pub fn operations(&self) -> Vec<DriverOp> {
        self.bank().ops.clone()
    }

    fn state(&self, pin: u8) -> PinState {
        self.bank().pins.get(&pin).copied().unwrap_or_default()
    }

    fn bank(&self) -> MutexGuard<'_, Bank> {
        self.bank.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PinDriver for MemoryDriver {
    fn native_naming(&self) -> PinNaming {
        self.naming
    }

    fn initialize(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        match &self.init_failure {
            Some(reason) => Err(GpioError::HardwareInitialization(reason.clone())),
            None => Ok(()),
        }
    }

    fn set_direction(&self, pin: u8, direction: Direction) {
        let mut bank = self.bank();
        bank.ops.push(DriverOp::SetDirection(pin, direction));
        bank.pins.entry(pin).or_default().direction = direction;
    }

    fn read(&self, pin: u8) -> PinValue {
        let mut bank = self.bank();
        bank.ops.push(DriverOp::Read(pin));
        bank.pins.get(&pin).map(|s| s.level).unwrap_or(PinValue::Low)
    }

    fn write(&self, pin: u8, value: PinValue) {
        let mut bank = self.bank();
        bank.ops.push(DriverOp::Write(pin, value));
        bank.pins.entry(pin).or_default().level = value;
    }

    fn set_pull_mode(&self, pin: u8, mode: PullMode) {
        let mut bank = self.bank();
        bank.ops.push(DriverOp::SetPullMode(pin, mode));
        let state = bank.pins.entry(pin).or_default();
        state.pull = mode;
        // An undriven input floats to the pull level.
        if state.direction == Direction::Input {
            match mode {
                PullMode::PullUp => state.level = PinValue::High,
                PullMode::PullDown => state.level = PinValue::Low,
                PullMode::Off => {}
            }
        }
    }
}
