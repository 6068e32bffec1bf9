//! Seesaw command constants and reply decoding for the rotary encoder.
//!
//! Every transaction is a two-byte command `[MODULE, REGISTER]` followed,
//! after a settling delay, by a fixed-size reply:
//!
//! | Command      | Reply   | Meaning                                     |
//! |--------------|---------|---------------------------------------------|
//! | `0x11, 0x40` | 4 bytes | Position delta since last read (i32, BE)    |
//! | `0x11, 0x30` | 4 bytes | Absolute firmware position (i32, BE)        |
//! | `0x01, 0x04` | 4 bytes | Status word; byte 0 bit 0 clear = pressed   |
//!
//! The decode and accumulation helpers here are pure so both the blocking
//! and async drivers share them.

// ---------------------------------------------------------------------------
// Module IDs
// ---------------------------------------------------------------------------

/// Seesaw status (GPIO) module identifier.
pub const MODULE_STATUS: u8 = 0x01;

/// Seesaw encoder module identifier.
pub const MODULE_ENCODER: u8 = 0x11;

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Bulk status read; byte 0 carries the push-button bit.
pub const STATUS_NUMBER: u8 = 0x04;

/// Absolute encoder position (32-bit signed).
pub const ENCODER_POSITION: u8 = 0x30;

/// Encoder delta since the previous delta read (32-bit signed).
pub const ENCODER_DELTA: u8 = 0x40;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Delay in milliseconds between the command write and the reply read.
///
/// The encoder firmware needs this long to stage its reply; reading earlier
/// returns stale buffer contents.
pub const SETTLE_DELAY_MS: u32 = 8;

/// Size in bytes of every reply this driver requests.
pub const REPLY_LEN: usize = 4;

/// Default bus clock in Hz.
pub const DEFAULT_FREQUENCY: u32 = 400_000;

/// Default lower position bound.
pub const DEFAULT_MIN: i32 = 0;

/// Default upper position bound.
pub const DEFAULT_MAX: i32 = 10;

/// Commands understood by the encoder firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Read the signed delta accumulated since the last delta read.
    Delta,
    /// Read the absolute signed position held by the firmware.
    Position,
    /// Read the status word holding the button bit.
    Buttons,
}

impl Command {
    /// The two bytes written to the device for this command.
    pub const fn bytes(self) -> [u8; 2] {
        match self {
            Command::Delta => [MODULE_ENCODER, ENCODER_DELTA],
            Command::Position => [MODULE_ENCODER, ENCODER_POSITION],
            Command::Buttons => [MODULE_STATUS, STATUS_NUMBER],
        }
    }

    /// Number of reply bytes the firmware sends back for this command.
    pub const fn reply_len(self) -> usize {
        match self {
            Command::Delta | Command::Position | Command::Buttons => REPLY_LEN,
        }
    }
}

/// Decode a four-byte reply as a two's-complement big-endian `i32`.
pub const fn decode_i32(reply: [u8; REPLY_LEN]) -> i32 {
    i32::from_be_bytes(reply)
}

/// Interpret a status reply. The button bit is active-low.
pub fn button_pressed(reply: &[u8]) -> bool {
    reply.first().is_some_and(|status| status & 0x01 == 0)
}

/// Apply a firmware delta to `value` and clamp the result to `[min, max]`.
///
/// The delta is subtracted: the firmware counts the opposite way round from
/// the position this driver reports. A result past either bound jumps to the
/// *opposite* bound rather than wrapping by the overshoot, and a result equal
/// to a bound is kept as is.
pub fn accumulate(value: i32, delta: i32, min: i32, max: i32) -> i32 {
    let next = i64::from(value) - i64::from(delta);

    if next < i64::from(min) {
        max
    } else if next > i64::from(max) {
        min
    } else {
        // min <= next <= max, so it fits back into an i32.
        next as i32
    }
}
