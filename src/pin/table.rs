//! Built-in pin table for the 40-pin Raspberry Pi header (B+, 2, 3, 4).
//!
//! One row per [`PinNaming`](super::PinNaming), one column per usable GPIO pin.
//! Power and ground pins are not listed.

/// Number of GPIO-capable header pins.
pub const PIN_COLUMNS: usize = 28;

/// `PIN_TABLE[naming.index()][column]`.
pub const PIN_TABLE: [[i32; PIN_COLUMNS]; 3] = [
    // Physical
    [
        3, 5, 7, 8, 10, 11, 12, 13, 15, 16, 18, 19, 21, 22, 23, 24, 26, 27, 28, 29, 31, 32, 33, 35,
        36, 37, 38, 40,
    ],
    // WiringPi
    [
        8, 9, 7, 15, 16, 0, 1, 2, 3, 4, 5, 12, 13, 6, 14, 10, 11, 30, 31, 21, 22, 26, 23, 24, 27,
        25, 28, 29,
    ],
    // BCM
    [
        2, 3, 4, 14, 15, 17, 18, 27, 22, 23, 24, 10, 9, 25, 11, 8, 7, 0, 1, 5, 6, 12, 13, 19, 16,
        26, 20, 21,
    ],
];
