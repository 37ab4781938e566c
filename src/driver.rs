//! Low-level Twist register protocol.
//!
//! Every access is a single I2C transaction addressed by a one-byte
//! register pointer:
//!
//! - read: write `[register]`, repeated start, read `width` bytes
//! - write: write `[register, data...]`
//!
//! The firmware auto-increments the pointer, so multi-byte values and
//! adjacent registers travel in one transaction. All words are
//! little-endian.
//!
//! This module is crate-private. Consumers use [`Twist`](crate::Twist).

use embedded_hal_async::i2c::I2c;

use crate::error::TwistError;
use crate::registers::{Register, MAX_PAYLOAD};

/// Register-level access to a Twist at a fixed address.
pub(crate) struct TwistBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> TwistBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Core protocol primitives
    // -----------------------------------------------------------------------

    /// Read `buffer.len()` bytes starting at `register`.
    pub async fn read_bytes(
        &mut self,
        register: Register,
        buffer: &mut [u8],
    ) -> Result<(), TwistError<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[register.address()], buffer)
            .await
            .map_err(|error| TwistError::I2c { register, error })
    }

    /// Write `data` starting at `register` in one transaction.
    ///
    /// `data` must not exceed [`MAX_PAYLOAD`] bytes; every caller in this
    /// crate passes a fixed-size array within that bound.
    pub async fn write_bytes(
        &mut self,
        register: Register,
        data: &[u8],
    ) -> Result<(), TwistError<I2C::Error>> {
        debug_assert!(data.len() <= MAX_PAYLOAD);

        // [register, d0, d1, ...]
        let mut buf = [0u8; MAX_PAYLOAD + 1];
        buf[0] = register.address();
        buf[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &buf[..=data.len()])
            .await
            .map_err(|error| TwistError::I2c { register, error })
    }

    // -----------------------------------------------------------------------
    // Typed read/write helpers
    // -----------------------------------------------------------------------

    pub async fn read_u8(&mut self, register: Register) -> Result<u8, TwistError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_bytes(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Read an unsigned little-endian word.
    pub async fn read_u16(&mut self, register: Register) -> Result<u16, TwistError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_bytes(register, &mut buf).await?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a two's-complement little-endian word.
    ///
    /// The firmware stores these as plain 16-bit words; raw values above
    /// 32767 are negative.
    pub async fn read_i16(&mut self, register: Register) -> Result<i16, TwistError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_bytes(register, &mut buf).await?;
        Ok(i16::from_le_bytes(buf))
    }

    pub async fn write_u8(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.write_bytes(register, &[value]).await
    }

    pub async fn write_u16(
        &mut self,
        register: Register,
        value: u16,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.write_bytes(register, &value.to_le_bytes()).await
    }
}
