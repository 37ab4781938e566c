//! Async driver for the SparkFun Qwiic Twist RGB rotary encoder.
//!
//! The Twist is an I2C knob with an RGB LED, a push button, and firmware
//! that tracks tick counts, event timers and interrupt flags in a small
//! register file. This crate talks to that register file over any
//! `embedded-hal-async` I2C implementation.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private) — register addressing and little-endian
//!   byte/word transfers.
//! - **[`Twist`]** (public) — typed accessors, power-on sequence and the
//!   read-then-clear status flag semantics.
//! - **[`registers`]** — the register map and bit layouts.
//!
//! # Quick start
//!
//! ```ignore
//! use twist_driver::Twist;
//!
//! let mut twist = Twist::with_default_address(i2c).await?;
//! twist.set_color(0, 255, 255).await?;
//!
//! loop {
//!     if twist.has_moved().await? {
//!         let diff = twist.get_diff(true).await?;
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! The driver does no locking. Every call runs its bus transactions to
//! completion in order, but two calls on the same device must not overlap.
//! Share a `Twist` between tasks behind a mutex, and keep driver calls out
//! of interrupt handlers (set a flag there and do the I/O from the main
//! context instead).
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public
//!   types and debug logging of initialisation and address changes.

#![cfg_attr(not(test), no_std)]

pub use config::TwistConfig;
pub use error::TwistError;
pub use registers::{Register, Status, DEFAULT_ADDRESS, DEFAULT_LIMIT};
pub use twist::Twist;

mod config;
mod driver;
mod error;
#[cfg(test)]
mod mock;
pub mod registers;
mod twist;
