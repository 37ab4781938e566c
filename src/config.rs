//! Power-on configuration written by [`Twist::new_with_config`].
//!
//! [`Twist::new_with_config`]: crate::Twist::new_with_config

use crate::registers::DEFAULT_LIMIT;

/// Values the driver writes to the device during initialisation.
///
/// The `Default` impl matches what [`Twist::new`](crate::Twist::new)
/// writes: limit 23, LED off, no colour coupling, interrupts disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwistConfig {
    /// Tick limit (0 = unlimited).
    pub limit: u16,
    /// Initial LED colour as `(red, green, blue)`.
    pub color: (u8, u8, u8),
    /// Per-tick LED change as `(red, green, blue)`.
    pub connect_color: (i16, i16, i16),
    /// Enable the button interrupt.
    pub button_interrupt: bool,
    /// Enable the encoder interrupt.
    pub encoder_interrupt: bool,
    /// Interrupt timeout in ms. `None` keeps the firmware's current value.
    pub int_timeout_ms: Option<u16>,
}

impl Default for TwistConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            color: (0, 0, 0),
            connect_color: (0, 0, 0),
            button_interrupt: false,
            encoder_interrupt: false,
            int_timeout_ms: None,
        }
    }
}

impl TwistConfig {
    /// Whether initialisation has to write ENABLE_INTS a second time.
    pub(crate) fn interrupts_enabled(&self) -> bool {
        self.button_interrupt || self.encoder_interrupt
    }
}
