//! High-level interface for the SparkFun Qwiic Twist.
//!
//! [`Twist`] wraps the register protocol with typed accessors, the
//! power-on sequence, and the status-bit "check and consume" semantics of
//! the firmware.

use embedded_hal_async::i2c::I2c;

use crate::config::TwistConfig;
use crate::driver::TwistBus;
use crate::error::TwistError;
use crate::registers::{
    Register, Status, DEFAULT_ADDRESS, ENABLE_INTERRUPT_BUTTON, ENABLE_INTERRUPT_ENCODER,
    MAX_ADDRESS, MIN_ADDRESS, RESET_INTERRUPTS_MASK, RESET_STATUS_MASK, STATUS_BUTTON_CLICKED,
    STATUS_BUTTON_PRESSED, STATUS_ENCODER_MOVED,
};

/// High-level interface for the SparkFun Qwiic Twist RGB rotary encoder.
///
/// The driver caches nothing: every getter reads the device and every
/// setter writes it. Calls issue their transactions one after another and
/// take `&mut self`, so a single owner can never interleave two calls. If
/// the driver is shared between tasks, or between a main loop and an
/// interrupt handler, the caller must serialise access (for example with an
/// `embassy_sync::mutex::Mutex` around the `Twist`).
///
/// # Example
///
/// ```no_run
/// use twist_driver::Twist;
///
/// # async fn example<I: embedded_hal_async::i2c::I2c>(i2c: I) -> Result<(), twist_driver::TwistError<I::Error>> {
/// let mut twist = Twist::with_default_address(i2c).await?;
/// twist.set_color(0, 255, 255).await?;
///
/// if twist.has_moved().await? {
///     let count = twist.get_count().await?;
///     let diff = twist.get_diff(true).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct Twist<I2C> {
    bus: TwistBus<I2C>,
}

impl<I2C> Twist<I2C>
where
    I2C: I2c,
{
    /// Create a driver and bring the device into a known state.
    ///
    /// Writes the [`TwistConfig::default`] power-on values: count and
    /// difference zeroed, status bits cleared, interrupts disabled, limit
    /// 23, LED off, colour coupling off.
    ///
    /// # Arguments
    /// * `i2c` — I2C bus. Pass `&mut bus` or a shared-bus device to keep
    ///   using the bus elsewhere.
    /// * `address` — 7-bit I2C device address (factory default 0x3F)
    ///
    /// # Errors
    /// * [`TwistError::I2c`] naming the register that failed. Earlier
    ///   steps of the sequence have already been applied.
    pub async fn new(i2c: I2C, address: u8) -> Result<Self, TwistError<I2C::Error>> {
        Self::new_with_config(i2c, address, TwistConfig::default()).await
    }

    /// [`new`](Self::new) at [`DEFAULT_ADDRESS`].
    pub async fn with_default_address(i2c: I2C) -> Result<Self, TwistError<I2C::Error>> {
        Self::new(i2c, DEFAULT_ADDRESS).await
    }

    /// Create a driver and write `config` as the power-on state.
    ///
    /// Status and interrupt registers are cleared before anything else so
    /// that the first event read after construction is meaningful.
    pub async fn new_with_config(
        i2c: I2C,
        address: u8,
        config: TwistConfig,
    ) -> Result<Self, TwistError<I2C::Error>> {
        let mut twist = Self {
            bus: TwistBus::new(i2c, address),
        };

        twist.reset_count().await?;
        twist.reset_status().await?;
        twist.reset_interrupts().await?;
        twist.set_interrupts(false, false).await?;
        twist.set_limit(config.limit).await?;

        let (red, green, blue) = config.color;
        twist.set_color(red, green, blue).await?;

        let (red, green, blue) = config.connect_color;
        twist.set_connect_color(red, green, blue).await?;

        if config.interrupts_enabled() {
            twist
                .set_interrupts(config.button_interrupt, config.encoder_interrupt)
                .await?;
        }
        if let Some(timeout) = config.int_timeout_ms {
            twist.set_int_timeout(timeout).await?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Twist at {=u8:#x} initialised: {}", address, config);

        Ok(twist)
    }

    /// Current 7-bit device address.
    pub fn address(&self) -> u8 {
        self.bus.address()
    }

    /// Consume the driver and hand back the I2C bus.
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Raw value of the ID register.
    pub async fn get_id(&mut self) -> Result<u8, TwistError<I2C::Error>> {
        self.bus.read_u8(Register::Id).await
    }

    /// Raw firmware version word.
    pub async fn get_version(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.bus.read_u16(Register::Version).await
    }

    // -----------------------------------------------------------------------
    // LED colour
    // -----------------------------------------------------------------------

    /// Set the knob LED colour.
    ///
    /// Red, green and blue are adjacent registers, so the three components
    /// go out as one 3-byte write.
    pub async fn set_color(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_bytes(Register::Red, &[red, green, blue]).await
    }

    /// Read the knob LED colour as `(red, green, blue)`.
    pub async fn get_color(&mut self) -> Result<(u8, u8, u8), TwistError<I2C::Error>> {
        let mut buf = [0u8; 3];
        self.bus.read_bytes(Register::Red, &mut buf).await?;
        Ok((buf[0], buf[1], buf[2]))
    }

    /// Couple each LED channel to knob rotation.
    ///
    /// Each coefficient is the brightness change per tick: negative values
    /// dim the channel as the knob turns forward, positive values brighten
    /// it. All three words go out as one 6-byte write.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example<I: embedded_hal_async::i2c::I2c>(twist: &mut twist_driver::Twist<I>) -> Result<(), twist_driver::TwistError<I::Error>> {
    /// // Fade from red to blue as the knob turns clockwise.
    /// twist.set_color(125, 0, 125).await?;
    /// twist.set_connect_color(-5, 0, 5).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn set_connect_color(
        &mut self,
        red: i16,
        green: i16,
        blue: i16,
    ) -> Result<(), TwistError<I2C::Error>> {
        let mut buf = [0u8; 6];
        buf[0..2].copy_from_slice(&red.to_le_bytes());
        buf[2..4].copy_from_slice(&green.to_le_bytes());
        buf[4..6].copy_from_slice(&blue.to_le_bytes());

        self.bus.write_bytes(Register::ConnectRed, &buf).await
    }

    /// Read the colour coupling coefficients as `(red, green, blue)`.
    pub async fn get_connect_color(&mut self) -> Result<(i16, i16, i16), TwistError<I2C::Error>> {
        let red = self.bus.read_i16(Register::ConnectRed).await?;
        let green = self.bus.read_i16(Register::ConnectGreen).await?;
        let blue = self.bus.read_i16(Register::ConnectBlue).await?;
        Ok((red, green, blue))
    }

    // -----------------------------------------------------------------------
    // Tick count
    // -----------------------------------------------------------------------

    /// Number of detents the knob has been turned.
    ///
    /// Known firmware quirk: turning counter-clockwise from zero reports a
    /// value one higher than the true count. The value is returned as the
    /// device reports it.
    pub async fn get_count(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.bus.read_u16(Register::Count).await
    }

    pub async fn set_count(&mut self, count: u16) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_u16(Register::Count, count).await
    }

    /// Zero the count and difference registers.
    ///
    /// Two separate writes. If the second fails the count is already
    /// zero; the error names [`Register::Difference`].
    pub async fn reset_count(&mut self) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_u16(Register::Count, 0).await?;
        self.bus.write_u16(Register::Difference, 0).await
    }

    /// Signed ticks since the difference register was last cleared.
    ///
    /// With `clear` set, zero is written back after the read. The returned
    /// value is the one read before clearing.
    pub async fn get_diff(&mut self, clear: bool) -> Result<i16, TwistError<I2C::Error>> {
        let difference = self.bus.read_i16(Register::Difference).await?;

        if clear {
            self.bus.write_u16(Register::Difference, 0).await?;
        }

        Ok(difference)
    }

    // -----------------------------------------------------------------------
    // Status flags
    // -----------------------------------------------------------------------

    /// Snapshot of the STATUS register. Clears nothing.
    pub async fn get_status(&mut self) -> Result<Status, TwistError<I2C::Error>> {
        let bits = self.bus.read_u8(Register::Status).await?;
        Ok(Status::from_bits(bits))
    }

    /// Whether the knob has turned since the last call.
    ///
    /// Clears the moved bit and leaves every other bit as read.
    pub async fn has_moved(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_ENCODER_MOVED).await
    }

    /// Whether the button has been clicked since the last call.
    ///
    /// Clears the clicked bit and leaves every other bit as read.
    pub async fn has_clicked(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_BUTTON_CLICKED).await
    }

    /// Whether the pressed bit is set.
    ///
    /// This also clears the bit, so it is not a level query: while the
    /// button stays down, a repeated call only sees `true` again once the
    /// firmware has set the bit again.
    pub async fn is_pressed(&mut self) -> Result<bool, TwistError<I2C::Error>> {
        self.take_status_bit(STATUS_BUTTON_PRESSED).await
    }

    /// Clear the STATUS bits covered by `0b1111_0011`.
    ///
    /// Must be called after handling a button interrupt or the INT line
    /// stays asserted. The firmware also restarts the button timer when
    /// these bits are cleared.
    pub async fn reset_status(&mut self) -> Result<(), TwistError<I2C::Error>> {
        self.mask_status(RESET_STATUS_MASK).await
    }

    /// Clear the STATUS bits covered by `0b1111_1100` to re-arm interrupts.
    pub async fn reset_interrupts(&mut self) -> Result<(), TwistError<I2C::Error>> {
        self.mask_status(RESET_INTERRUPTS_MASK).await
    }

    /// Read STATUS, write it back with `bit` cleared, return the bit as read.
    async fn take_status_bit(&mut self, bit: u8) -> Result<bool, TwistError<I2C::Error>> {
        let status = self.bus.read_u8(Register::Status).await?;
        self.bus.write_u8(Register::Status, status & !bit).await?;
        Ok(status & bit != 0)
    }

    async fn mask_status(&mut self, mask: u8) -> Result<(), TwistError<I2C::Error>> {
        let status = self.bus.read_u8(Register::Status).await?;
        self.bus.write_u8(Register::Status, status & mask).await
    }

    // -----------------------------------------------------------------------
    // Interrupts and timers
    // -----------------------------------------------------------------------

    /// Enable or disable the button and encoder interrupts.
    ///
    /// Both bits are written every call; a `false` argument disables that
    /// source.
    pub async fn set_interrupts(
        &mut self,
        button: bool,
        encoder: bool,
    ) -> Result<(), TwistError<I2C::Error>> {
        let mut ints = 0u8;
        if button {
            ints |= ENABLE_INTERRUPT_BUTTON;
        }
        if encoder {
            ints |= ENABLE_INTERRUPT_ENCODER;
        }
        self.bus.write_u8(Register::EnableInts, ints).await
    }

    /// Milliseconds between the knob coming to rest and the interrupt firing.
    pub async fn get_int_timeout(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.bus.read_u16(Register::TurnIntTimeout).await
    }

    pub async fn set_int_timeout(&mut self, timeout_ms: u16) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_u16(Register::TurnIntTimeout, timeout_ms).await
    }

    /// Milliseconds since the knob last moved (rolls over after 65535).
    ///
    /// With `clear` set, the timer is zeroed after the read.
    pub async fn get_time_since_last_move(
        &mut self,
        clear: bool,
    ) -> Result<u16, TwistError<I2C::Error>> {
        let elapsed = self.bus.read_u16(Register::LastEncoderEvent).await?;

        if clear {
            self.bus.write_u16(Register::LastEncoderEvent, 0).await?;
        }

        Ok(elapsed)
    }

    /// Milliseconds since the last button event (rolls over after 65535).
    ///
    /// With `clear` set, the timer is zeroed after the read.
    ///
    /// Not usable together with button interrupts: clearing the status bits
    /// to release the INT line also restarts this timer in firmware.
    pub async fn get_time_since_last_press(
        &mut self,
        clear: bool,
    ) -> Result<u16, TwistError<I2C::Error>> {
        let elapsed = self.bus.read_u16(Register::LastButtonEvent).await?;

        if clear {
            self.bus.write_u16(Register::LastButtonEvent, 0).await?;
        }

        Ok(elapsed)
    }

    /// Zero both event timers (encoder first, then button).
    pub async fn reset_timers(&mut self) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_u16(Register::LastEncoderEvent, 0).await?;
        self.bus.write_u16(Register::LastButtonEvent, 0).await
    }

    // -----------------------------------------------------------------------
    // Limit
    // -----------------------------------------------------------------------

    /// Count at which the firmware wraps the tick count (0 = unlimited).
    pub async fn get_limit(&mut self) -> Result<u16, TwistError<I2C::Error>> {
        self.bus.read_u16(Register::Limit).await
    }

    pub async fn set_limit(&mut self, limit: u16) -> Result<(), TwistError<I2C::Error>> {
        self.bus.write_u16(Register::Limit, limit).await
    }

    // -----------------------------------------------------------------------
    // Address change
    // -----------------------------------------------------------------------

    /// Move the device to a new I2C address.
    ///
    /// The new address is written at the current one; on success the
    /// driver talks to `new_address` from then on. The firmware keeps the
    /// address across power cycles.
    ///
    /// # Errors
    /// * [`TwistError::OutOfRange`] if `new_address` is outside
    ///   `0x08..=0x77`. No bus traffic is issued.
    /// * [`TwistError::I2c`] on communication failure; the driver keeps
    ///   the old address.
    pub async fn change_address(&mut self, new_address: u8) -> Result<(), TwistError<I2C::Error>> {
        if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&new_address) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejected Twist address {=u8:#x}", new_address);
            return Err(TwistError::OutOfRange);
        }

        self.bus.write_u8(Register::ChangeAddress, new_address).await?;
        self.bus.set_address(new_address);

        #[cfg(feature = "defmt")]
        defmt::debug!("Twist moved to {=u8:#x}", new_address);

        Ok(())
    }
}
