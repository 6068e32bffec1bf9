//! Bus and encoder configuration.

use crate::protocol::{DEFAULT_FREQUENCY, DEFAULT_MAX, DEFAULT_MIN};

/// Pins and clock used to bring up the I2C bus.
///
/// The driver never interprets these values. They are recorded and handed
/// to the transport factory given to
/// [`RotaryEncoder::open`](crate::RotaryEncoder::open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Data line pin number.
    pub sda: u8,
    /// Clock line pin number.
    pub scl: u8,
    /// Bus clock in Hz.
    pub frequency: u32,
}

impl BusConfig {
    /// Bus on the given pins at the default 400 kHz clock.
    pub const fn new(sda: u8, scl: u8) -> Self {
        Self {
            sda,
            scl,
            frequency: DEFAULT_FREQUENCY,
        }
    }

    pub const fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }
}

/// Everything needed to construct a [`RotaryEncoder`](crate::RotaryEncoder).
///
/// # Example
///
/// ```
/// use rotary_i2c::{BusConfig, EncoderConfig};
///
/// let config = EncoderConfig::new(BusConfig::new(16, 17))
///     .limits(0, 24)
///     .device(0x36);
///
/// assert_eq!(config.bus.frequency, 400_000);
/// assert_eq!(config.device_address, Some(0x36));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    pub bus: BusConfig,
    /// Lowest reported position (inclusive).
    pub min_val: i32,
    /// Highest reported position (inclusive).
    pub max_val: i32,
    /// Target device, or `None` until one is chosen.
    pub device_address: Option<u8>,
}

impl EncoderConfig {
    /// Defaults: bounds `0..=10`, no device address.
    pub const fn new(bus: BusConfig) -> Self {
        Self {
            bus,
            min_val: DEFAULT_MIN,
            max_val: DEFAULT_MAX,
            device_address: None,
        }
    }

    pub const fn limits(mut self, min_val: i32, max_val: i32) -> Self {
        self.min_val = min_val;
        self.max_val = max_val;
        self
    }

    /// Set the target address. Address 0 means "no device".
    pub const fn device(mut self, address: u8) -> Self {
        self.device_address = if address == 0 { None } else { Some(address) };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EncoderConfig::new(BusConfig::new(4, 5));
        assert_eq!(config.bus.sda, 4);
        assert_eq!(config.bus.scl, 5);
        assert_eq!(config.bus.frequency, 400_000);
        assert_eq!(config.min_val, 0);
        assert_eq!(config.max_val, 10);
        assert_eq!(config.device_address, None);
    }

    #[test]
    fn builder_overrides() {
        let config = EncoderConfig::new(BusConfig::new(4, 5).with_frequency(100_000))
            .limits(-3, 54)
            .device(0x36);
        assert_eq!(config.bus.frequency, 100_000);
        assert_eq!((config.min_val, config.max_val), (-3, 54));
        assert_eq!(config.device_address, Some(0x36));
    }

    #[test]
    fn device_zero_is_unset() {
        let config = EncoderConfig::new(BusConfig::new(4, 5)).device(0x36).device(0);
        assert_eq!(config.device_address, None);
    }
}
