//! Async variant of the driver for Embassy-style executors.
//!
//! Same state, clamp policy and errors as the blocking
//! [`RotaryEncoder`](crate::RotaryEncoder); the settling delay becomes an
//! [`embassy_time::Timer`] await, so other tasks run while the firmware
//! prepares its reply. The transaction itself is still strictly
//! write, wait, read.

use embassy_time::{Duration, Timer};
use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use crate::config::{BusConfig, EncoderConfig};
use crate::error::{Operation, RotaryError};
use crate::protocol::{self, Command, REPLY_LEN, SETTLE_DELAY_MS};
use crate::scan::{is_absent, ScanResult, FIRST_ADDRESS, LAST_ADDRESS};

/// Async counterpart of [`scan_bus`](crate::scan_bus).
pub async fn scan_bus<I2C: I2c>(i2c: &mut I2C) -> Result<ScanResult, I2C::Error> {
    let mut found = ScanResult::new();
    let mut probe = [0u8; 1];

    for address in FIRST_ADDRESS..=LAST_ADDRESS {
        match i2c.read(address, &mut probe).await {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("scan: device at {=u8:#x}", address);
                let _ = found.push(address);
            }
            Err(e) if is_absent(e.kind()) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(found)
}

/// Async rotary encoder driver.
///
/// # Example
///
/// ```ignore
/// use rotary_i2c::{asynch::RotaryEncoder, BusConfig, EncoderConfig};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let config = EncoderConfig::new(BusConfig::new(20, 21)).device(0x36);
/// let mut encoder = RotaryEncoder::new(i2c, config);
///
/// let position = encoder.position().await?;
/// ```
pub struct RotaryEncoder<I2C> {
    i2c: I2C,
    bus: BusConfig,
    value: i32,
    /// Lowest reported position (inclusive).
    pub min_val: i32,
    /// Highest reported position (inclusive).
    pub max_val: i32,
    /// Target device. `None` or `Some(0)` refuses all transactions.
    pub device_address: Option<u8>,
}

impl<I2C> RotaryEncoder<I2C>
where
    I2C: I2c,
{
    /// Create a driver around an already initialised bus. No bus traffic.
    pub fn new(i2c: I2C, config: EncoderConfig) -> Self {
        Self {
            i2c,
            bus: config.bus,
            value: config.min_val,
            min_val: config.min_val,
            max_val: config.max_val,
            device_address: config.device_address,
        }
    }

    /// Create a driver, building the bus from `config.bus`.
    pub fn open<F, E>(config: EncoderConfig, connect: F) -> Result<Self, E>
    where
        F: FnOnce(&BusConfig) -> Result<I2C, E>,
    {
        let i2c = connect(&config.bus)?;
        Ok(Self::new(i2c, config))
    }

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

    /// Give back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn target(&self, op: Operation) -> Result<u8, RotaryError<I2C::Error>> {
        match self.device_address {
            Some(address) if address != 0 => Ok(address),
            _ => Err(RotaryError::NoDevice(op)),
        }
    }

    /// List the addresses that respond on the bus. Needs no target device.
    pub async fn scan(&mut self) -> Result<ScanResult, RotaryError<I2C::Error>> {
        Ok(scan_bus(&mut self.i2c).await?)
    }

    /// Write raw bytes to the target device and return the count sent.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<usize, RotaryError<I2C::Error>> {
        let address = self.target(Operation::Write)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("write {=u8:#x}: {=[u8]:#x}", address, bytes);

        self.i2c.write(address, bytes).await?;
        Ok(bytes.len())
    }

    /// Send a command, wait out the settling delay, then read `N` bytes.
    pub async fn read<const N: usize>(
        &mut self,
        bytes: &[u8],
    ) -> Result<[u8; N], RotaryError<I2C::Error>> {
        let address = self.target(Operation::Read)?;

        self.write(bytes).await?;

        // Critical delay, firmware needs time to prepare the reply
        Timer::after(Duration::from_millis(u64::from(SETTLE_DELAY_MS))).await;

        let mut reply = [0u8; N];
        self.i2c.read(address, &mut reply).await?;

        #[cfg(feature = "defmt")]
        defmt::trace!("read {=u8:#x}: {=[u8]:#x}", address, &reply[..]);

        Ok(reply)
    }

    async fn command(
        &mut self,
        command: Command,
    ) -> Result<[u8; REPLY_LEN], RotaryError<I2C::Error>> {
        debug_assert_eq!(command.reply_len(), REPLY_LEN);
        self.read::<REPLY_LEN>(&command.bytes()).await
    }

    /// Read the delta since the last call and return the updated position.
    pub async fn position(&mut self) -> Result<i32, RotaryError<I2C::Error>> {
        let delta = protocol::decode_i32(self.command(Command::Delta).await?);
        let next = protocol::accumulate(self.value, delta, self.min_val, self.max_val);

        #[cfg(feature = "defmt")]
        if i64::from(self.value) - i64::from(delta) != i64::from(next) {
            defmt::debug!("position {} - {} wrapped to {}", self.value, delta, next);
        }

        self.value = next;
        Ok(self.value)
    }

    /// Read the raw firmware counter; the driver's position is unaffected.
    pub async fn read_absolute(&mut self) -> Result<i32, RotaryError<I2C::Error>> {
        Ok(protocol::decode_i32(self.command(Command::Position).await?))
    }

    /// Return `true` while the push button is held down.
    pub async fn button(&mut self) -> Result<bool, RotaryError<I2C::Error>> {
        let status = self.command(Command::Buttons).await?;
        Ok(protocol::button_pressed(&status))
    }
}
