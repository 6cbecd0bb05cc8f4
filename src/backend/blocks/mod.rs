//! Built-in block generators for Arduino-compatible ESP32 boards.
//!
//! Each submodule owns a family of blocks: their schemas, their generators and
//! a `register` function that adds them to a [`Registry`].

mod bluetooth;
mod logic;
mod math;
mod pins;
mod text;
mod timing;
mod wifi;

use blockc_core::lang::board::SERIAL_BAUD;

use super::emitter::Emitter;
use super::registry::Registry;

/// Add every built-in block to `registry`.
pub fn register_all(registry: &mut Registry) {
    pins::register(registry);
    timing::register(registry);
    wifi::register(registry);
    bluetooth::register(registry);
    logic::register(registry);
    math::register(registry);
    text::register(registry);
}

/// The `Serial` port is opened once, by whichever block needs it first.
fn require_serial(e: &mut Emitter<'_>) {
    e.add_init_line(format!("Serial.begin({});", SERIAL_BAUD));
}
