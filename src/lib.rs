//! Driver for a Seesaw-based I2C rotary encoder.
//!
//! The encoder firmware reports the ticks counted since the previous read.
//! [`RotaryEncoder`] folds those deltas into a position bounded by
//! `min_val..=max_val`, jumping to the opposite bound when the position runs
//! past either end, and reports the push-button state.
//!
//! # Architecture
//!
//! - **[`protocol`]** — command bytes, reply decoding and the clamp policy,
//!   all pure and shared by both drivers.
//! - **[`RotaryEncoder`]** — blocking driver over any `embedded-hal` I2C bus
//!   and `DelayNs` provider.
//! - **[`asynch::RotaryEncoder`]** — the same driver over
//!   `embedded-hal-async`, using Embassy timers (feature `async`).
//!
//! # Quick start
//!
//! ```ignore
//! use rotary_i2c::{BusConfig, EncoderConfig, RotaryEncoder};
//!
//! let config = EncoderConfig::new(BusConfig::new(16, 17)).limits(0, 24);
//! let mut encoder = RotaryEncoder::new(i2c, delay, config);
//!
//! // Don't know the address? Ask the bus.
//! let found = encoder.scan()?;
//! encoder.set_device(found[0]);
//!
//! let position = encoder.position()?;
//! if encoder.button()? {
//!     // clicked
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — transaction tracing and [`defmt::Format`] implementations
//!   for embedded logging.
//! - **`async`** — the [`asynch`] driver.

#![no_std]

#[cfg(feature = "async")]
pub mod asynch;
mod config;
mod encoder;
mod error;
pub mod protocol;
mod scan;

#[cfg(test)]
mod mock;

pub use config::{BusConfig, EncoderConfig};
pub use encoder::RotaryEncoder;
pub use error::{Operation, RotaryError};
pub use scan::{scan_bus, ScanResult, FIRST_ADDRESS, LAST_ADDRESS, MAX_DEVICES};
