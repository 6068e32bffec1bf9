//! Pico encoder demo
//!
//! Scans the bus, targets the first device found, then polls the encoder
//! position and button every 100 ms and logs changes via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico Pin | Notes                         |
//! |-----------|----------|-------------------------------|
//! | I2C0 SDA  | GP16     | STEMMA QT / Qwiic breakout    |
//! | I2C0 SCL  | GP17     |                               |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use rotary_i2c::asynch::RotaryEncoder;
use rotary_i2c::{BusConfig, EncoderConfig};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let config = EncoderConfig::new(BusConfig::new(16, 17)).limits(0, 24);

    // Pins are fixed by the typed peripherals below; only the clock is
    // taken from the bus config.
    let mut encoder = unwrap!(RotaryEncoder::open(config, |bus| {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = bus.frequency;
        Ok::<_, ()>(I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c_config))
    }));

    match encoder.scan().await {
        Ok(found) => {
            info!("Found {} device(s): {=[u8]:#x}", found.len(), found.as_slice());
            match found.first() {
                Some(&address) => encoder.set_device(address),
                None => {
                    error!("No encoder on the bus");
                    return;
                }
            }
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            return;
        }
    }

    let mut last = (encoder.value(), false);
    loop {
        Timer::after(Duration::from_millis(100)).await;

        let position = match encoder.position().await {
            Ok(position) => position,
            Err(e) => {
                error!("Position read failed: {}", e);
                continue;
            }
        };
        let pressed = match encoder.button().await {
            Ok(pressed) => pressed,
            Err(e) => {
                error!("Button read failed: {}", e);
                continue;
            }
        };

        if (position, pressed) != last {
            info!("Position: {}  Button: {}", position, pressed);
            last = (position, pressed);
        }
    }
}
