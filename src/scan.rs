//! I2C bus scan.
//!
//! Each 7-bit address in [`FIRST_ADDRESS`]`..=`[`LAST_ADDRESS`] is probed
//! with a one-byte read. A read is used rather than an empty write because
//! not every HAL accepts zero-length writes, and a read leaves the
//! encoder's command state untouched.

use embedded_hal::i2c::{Error, ErrorKind, I2c};
use heapless::Vec;

/// Lowest probed address (0x00–0x07 are reserved).
pub const FIRST_ADDRESS: u8 = 0x08;

/// Highest probed address (0x78–0x7F are reserved).
pub const LAST_ADDRESS: u8 = 0x77;

/// Maximum number of devices a scan can report.
pub const MAX_DEVICES: usize = (LAST_ADDRESS - FIRST_ADDRESS + 1) as usize;

/// Addresses that acknowledged during a scan, in ascending order.
pub type ScanResult = Vec<u8, MAX_DEVICES>;

/// Whether a probe error just means "nobody home" at that address.
pub(crate) fn is_absent(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NoAcknowledge(_))
}

/// Probe every valid address and return those that acknowledge.
///
/// # Errors
/// A NACK marks an address as absent. Any other bus error (arbitration
/// loss, bus fault, ...) stops the scan and is returned as is.
pub fn scan_bus<I2C: I2c>(i2c: &mut I2C) -> Result<ScanResult, I2C::Error> {
    let mut found = ScanResult::new();
    let mut probe = [0u8; 1];

    for address in FIRST_ADDRESS..=LAST_ADDRESS {
        match i2c.read(address, &mut probe) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("scan: device at {=u8:#x}", address);
                // Capacity equals the number of probed addresses.
                let _ = found.push(address);
            }
            Err(e) if is_absent(e.kind()) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(found)
}
