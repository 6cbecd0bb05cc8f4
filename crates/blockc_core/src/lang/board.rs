//! Board-level constants for the ESP32 targets the editor offers.

/// Lowest GPIO number a pin field accepts.
pub const PIN_MIN: i64 = 0;

/// Highest GPIO number a pin field accepts.
pub const PIN_MAX: i64 = 39;

/// Output levels a digital write can select.
pub const LEVELS: &[&str] = &["HIGH", "LOW"];

/// Boolean field values and their C++ spelling.
pub const BOOLEANS: &[(&str, &str)] = &[("TRUE", "true"), ("FALSE", "false")];

/// Baud rate used whenever a block needs the serial console.
pub const SERIAL_BAUD: u32 = 115_200;
