//! Error types for the rotary encoder driver.

use core::fmt;

/// Transaction that was refused because no device address is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// [`RotaryEncoder::write`](crate::RotaryEncoder::write)
    Write,
    /// [`RotaryEncoder::read`](crate::RotaryEncoder::read), and every
    /// command built on it
    Read,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Write => "write",
            Operation::Read => "read",
        }
    }
}

/// Errors that can occur when talking to the encoder.
#[derive(Debug, PartialEq, Eq)]
pub enum RotaryError<E> {
    /// Underlying I2C bus error, passed through unchanged.
    I2c(E),

    /// A transaction was attempted with no target device address set.
    /// No bus activity took place.
    NoDevice(Operation),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for RotaryError<E> {
    fn from(error: E) -> Self {
        RotaryError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for RotaryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RotaryError::I2c(e) => write!(f, "I2C error: {:?}", e),
            RotaryError::NoDevice(op) => write!(
                f,
                "{}: no target device address has been set",
                op.name()
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for RotaryError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RotaryError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            RotaryError::NoDevice(op) => {
                defmt::write!(f, "{}: no target device address set", op)
            }
        }
    }
}
