//! Blocking driver for the I2C rotary encoder.
//!
//! [`RotaryEncoder`] keeps a bounded position that is updated from the
//! firmware's delta register on every [`position`](RotaryEncoder::position)
//! call, and reads the push-button state.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{BusConfig, EncoderConfig};
use crate::error::{Operation, RotaryError};
use crate::protocol::{self, Command, REPLY_LEN, SETTLE_DELAY_MS};
use crate::scan::{self, ScanResult};

/// Blocking rotary encoder driver.
///
/// Owns the I2C transport and a delay provider. Every transaction blocks
/// for the bus transfer plus the 8 ms settling delay. One instance may be
/// pointed at several devices in turn with [`set_device`](Self::set_device);
/// the caller serialises access.
///
/// `min_val`, `max_val` and `device_address` are public and may be changed
/// at any time. Changing the bounds does not move the current position; the
/// next [`position`](Self::position) call applies them.
///
/// # Example
///
/// ```ignore
/// use rotary_i2c::{BusConfig, EncoderConfig, RotaryEncoder};
///
/// // `i2c` is any `embedded-hal` I2C bus, `delay` any `DelayNs`
/// let config = EncoderConfig::new(BusConfig::new(16, 17)).limits(0, 24).device(0x36);
/// let mut encoder = RotaryEncoder::new(i2c, delay, config);
///
/// let position = encoder.position()?;
/// if encoder.button()? {
///     // clicked
/// }
/// ```
pub struct RotaryEncoder<I2C, D> {
    i2c: I2C,
    delay: D,
    bus: BusConfig,
    value: i32,
    /// Lowest reported position (inclusive).
    pub min_val: i32,
    /// Highest reported position (inclusive).
    pub max_val: i32,
    /// Target device. `None` or `Some(0)` refuses all transactions.
    pub device_address: Option<u8>,
}

impl<I2C, D> RotaryEncoder<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver around an already initialised bus.
    ///
    /// The position starts at `config.min_val`. No bus traffic occurs.
    pub fn new(i2c: I2C, delay: D, config: EncoderConfig) -> Self {
        Self {
            i2c,
            delay,
            bus: config.bus,
            value: config.min_val,
            min_val: config.min_val,
            max_val: config.max_val,
            device_address: config.device_address,
        }
    }

    /// Create a driver, building the bus from `config.bus`.
    ///
    /// `connect` receives the pin and clock settings unchanged and returns
    /// the initialised transport.
    ///
    /// # Errors
    /// Whatever `connect` returns.
    pub fn open<F, E>(config: EncoderConfig, delay: D, connect: F) -> Result<Self, E>
    where
        F: FnOnce(&BusConfig) -> Result<I2C, E>,
    {
        let i2c = connect(&config.bus)?;
        Ok(Self::new(i2c, delay, config))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current accumulated position, without touching the bus.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Bus settings this driver was created with.
    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    /// Point the driver at another device. Address 0 clears the target.
    pub fn set_device(&mut self, address: u8) {
        self.device_address = Some(address);
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn target(&self, op: Operation) -> Result<u8, RotaryError<I2C::Error>> {
        match self.device_address {
            Some(address) if address != 0 => Ok(address),
            _ => Err(RotaryError::NoDevice(op)),
        }
    }

    // -----------------------------------------------------------------------
    // Transaction primitives
    // -----------------------------------------------------------------------

    /// List the addresses that respond on the bus.
    ///
    /// Works without a target device and leaves all state unchanged.
    pub fn scan(&mut self) -> Result<ScanResult, RotaryError<I2C::Error>> {
        Ok(scan::scan_bus(&mut self.i2c)?)
    }

    /// Write raw bytes to the target device.
    ///
    /// Returns the number of bytes handed to the bus. A completed
    /// `embedded-hal` write always transfers the whole slice; short writes
    /// are not otherwise detected.
    ///
    /// # Errors
    /// * [`RotaryError::NoDevice`] if no target is set (nothing is sent)
    /// * [`RotaryError::I2c`] on communication failure
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, RotaryError<I2C::Error>> {
        let address = self.target(Operation::Write)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("write {=u8:#x}: {=[u8]:#x}", address, bytes);

        self.i2c.write(address, bytes)?;
        Ok(bytes.len())
    }

    /// Send a command, wait for the firmware to stage its reply, then read
    /// `N` bytes back.
    ///
    /// Uses a separate write and read rather than `write_read()`, since a
    /// repeated start leaves no room for the settling delay.
    ///
    /// # Errors
    /// * [`RotaryError::NoDevice`] if no target is set (nothing is sent)
    /// * [`RotaryError::I2c`] on communication failure
    pub fn read<const N: usize>(
        &mut self,
        bytes: &[u8],
    ) -> Result<[u8; N], RotaryError<I2C::Error>> {
        let address = self.target(Operation::Read)?;

        self.write(bytes)?;

        // Firmware needs time to prepare the reply.
        self.delay.delay_ms(SETTLE_DELAY_MS);

        let mut reply = [0u8; N];
        self.i2c.read(address, &mut reply)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("read {=u8:#x}: {=[u8]:#x}", address, &reply[..]);

        Ok(reply)
    }

    fn command(&mut self, command: Command) -> Result<[u8; REPLY_LEN], RotaryError<I2C::Error>> {
        debug_assert_eq!(command.reply_len(), REPLY_LEN);
        self.read::<REPLY_LEN>(&command.bytes())
    }

    // -----------------------------------------------------------------------
    // Encoder operations
    // -----------------------------------------------------------------------

    /// Read the delta since the last call and return the updated position.
    ///
    /// A result below `min_val` becomes `max_val` and a result above
    /// `max_val` becomes `min_val`; results equal to a bound are kept.
    ///
    /// # Errors
    /// On error the position is left unchanged.
    pub fn position(&mut self) -> Result<i32, RotaryError<I2C::Error>> {
        let delta = protocol::decode_i32(self.command(Command::Delta)?);
        let next = protocol::accumulate(self.value, delta, self.min_val, self.max_val);

        #[cfg(feature = "defmt")]
        if i64::from(self.value) - i64::from(delta) != i64::from(next) {
            defmt::debug!("position {} - {} wrapped to {}", self.value, delta, next);
        }

        self.value = next;
        Ok(self.value)
    }

    /// Read the absolute counter kept by the encoder firmware.
    ///
    /// This is the raw, unbounded tick count; the driver's own position is
    /// not affected.
    pub fn read_absolute(&mut self) -> Result<i32, RotaryError<I2C::Error>> {
        Ok(protocol::decode_i32(self.command(Command::Position)?))
    }

    /// Return `true` while the push button is held down.
    pub fn button(&mut self) -> Result<bool, RotaryError<I2C::Error>> {
        let status = self.command(Command::Buttons)?;
        Ok(protocol::button_pressed(&status))
    }
}
