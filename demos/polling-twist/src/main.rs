//! Polling Twist example
//!
//! Demonstrates basic usage of the twist-driver crate on the Raspberry Pi
//! Pico 2. Polls the knob every 300 ms and logs count, difference and
//! button state via defmt whenever it moved or was clicked.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes |
//! |-----------|------------|-------|
//! | I2C1 SDA  | GP2        |       |
//! | I2C1 SCL  | GP3        |       |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use twist_driver::{Twist, TwistConfig, DEFAULT_ADDRESS};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C1,
        p.PIN_3, // SCL
        p.PIN_2, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // Cyan knob, 12 detents per revolution.
    let config = TwistConfig {
        limit: 12,
        color: (0, 255, 255),
        ..TwistConfig::default()
    };

    let mut twist = match Twist::new_with_config(i2c, DEFAULT_ADDRESS, config).await {
        Ok(twist) => twist,
        Err(e) => {
            error!("Twist init failed: {}", e);
            return;
        }
    };

    match twist.get_version().await {
        Ok(version) => info!("Firmware version: {}", version),
        Err(e) => error!("Version read failed: {}", e),
    }

    info!("Polling started, turn or click the knob");

    loop {
        Timer::after(Duration::from_millis(300)).await;

        let clicked = unwrap!(twist.has_clicked().await);
        let moved = unwrap!(twist.has_moved().await);
        if !(moved || clicked) {
            continue;
        }

        let count = unwrap!(twist.get_count().await);
        let diff = unwrap!(twist.get_diff(true).await);
        let pressed = unwrap!(twist.is_pressed().await);

        info!("Encoder moved: {}, Button clicked: {}", moved, clicked);
        info!("Tick count: {}, Difference: {}", count, diff);
        info!("Button is pressed: {}", pressed);
    }
}
