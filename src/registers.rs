//! Register map and bit layouts for the SparkFun Qwiic Twist.
//!
//! The Twist firmware exposes a flat, single-byte-addressed register file.
//! Multi-byte registers are little-endian and occupy consecutive addresses,
//! so a write that starts at [`Register::Red`] and carries three bytes
//! lands in red, green and blue in one transaction.

// ---------------------------------------------------------------------------
// Register map
// ---------------------------------------------------------------------------

/// Named registers of the Twist firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Device identifier (1 byte, read-only).
    Id,
    /// Event flags, see [`Status`] (1 byte).
    Status,
    /// Firmware version (2 bytes, read-only).
    Version,
    /// Interrupt enable flags (1 byte).
    EnableInts,
    /// Absolute tick count (2 bytes, unsigned).
    Count,
    /// Ticks since last cleared (2 bytes, two's complement).
    Difference,
    /// Milliseconds since the knob last moved (2 bytes).
    LastEncoderEvent,
    /// Milliseconds since the last button event (2 bytes).
    LastButtonEvent,
    /// Red LED brightness (1 byte).
    Red,
    /// Green LED brightness (1 byte).
    Green,
    /// Blue LED brightness (1 byte).
    Blue,
    /// Red change per tick (2 bytes, two's complement).
    ConnectRed,
    /// Green change per tick (2 bytes, two's complement).
    ConnectGreen,
    /// Blue change per tick (2 bytes, two's complement).
    ConnectBlue,
    /// Quiet time after the last movement before the interrupt fires, in ms (2 bytes).
    TurnIntTimeout,
    /// Writing a new 7-bit address here moves the device to it (1 byte).
    ChangeAddress,
    /// Count wraps at this value, 0 disables the limit (2 bytes).
    Limit,
}

impl Register {
    /// Register address on the wire.
    pub const fn address(self) -> u8 {
        match self {
            Register::Id => 0x00,
            Register::Status => 0x01,
            Register::Version => 0x02,
            Register::EnableInts => 0x04,
            Register::Count => 0x05,
            Register::Difference => 0x07,
            Register::LastEncoderEvent => 0x09,
            Register::LastButtonEvent => 0x0B,
            Register::Red => 0x0D,
            Register::Green => 0x0E,
            Register::Blue => 0x0F,
            Register::ConnectRed => 0x10,
            Register::ConnectGreen => 0x12,
            Register::ConnectBlue => 0x14,
            Register::TurnIntTimeout => 0x16,
            Register::ChangeAddress => 0x18,
            Register::Limit => 0x19,
        }
    }

    /// Register width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Register::Id
            | Register::Status
            | Register::EnableInts
            | Register::Red
            | Register::Green
            | Register::Blue
            | Register::ChangeAddress => 1,
            Register::Version
            | Register::Count
            | Register::Difference
            | Register::LastEncoderEvent
            | Register::LastButtonEvent
            | Register::ConnectRed
            | Register::ConnectGreen
            | Register::ConnectBlue
            | Register::TurnIntTimeout
            | Register::Limit => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// STATUS register bits
// ---------------------------------------------------------------------------

/// Set by the firmware when the knob turns.
pub const STATUS_ENCODER_MOVED: u8 = 1 << 0;

/// Set while the button is held (as last sampled by the firmware).
pub const STATUS_BUTTON_PRESSED: u8 = 1 << 1;

/// Set by the firmware after a press-and-release.
pub const STATUS_BUTTON_CLICKED: u8 = 1 << 2;

/// Mask applied by `reset_status`.
pub const RESET_STATUS_MASK: u8 = 0b1111_0011;

/// Mask applied by `reset_interrupts`.
pub const RESET_INTERRUPTS_MASK: u8 = 0b1111_1100;

// ---------------------------------------------------------------------------
// ENABLE_INTS register bits
// ---------------------------------------------------------------------------

/// Raise the INT line on knob movement.
pub const ENABLE_INTERRUPT_ENCODER: u8 = 1 << 0;

/// Raise the INT line on button events.
pub const ENABLE_INTERRUPT_BUTTON: u8 = 1 << 1;

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Factory I2C address of the Qwiic Twist.
pub const DEFAULT_ADDRESS: u8 = 0x3F;

/// Tick limit written during initialisation.
pub const DEFAULT_LIMIT: u16 = 23;

/// Lowest non-reserved 7-bit I2C address.
pub const MIN_ADDRESS: u8 = 0x08;

/// Highest non-reserved 7-bit I2C address.
pub const MAX_ADDRESS: u8 = 0x77;

/// Largest payload the driver sends in one write (three connect-color words).
pub(crate) const MAX_PAYLOAD: usize = 6;

// ---------------------------------------------------------------------------
// Status snapshot
// ---------------------------------------------------------------------------

/// Raw STATUS byte as read from the device.
///
/// Unlike [`Twist::has_moved`](crate::Twist::has_moved) and friends, a
/// `Status` is a plain snapshot: obtaining it does not clear anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u8);

impl Status {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Knob has turned since the bit was last cleared.
    pub const fn moved(self) -> bool {
        self.0 & STATUS_ENCODER_MOVED != 0
    }

    /// Button was down when the firmware last updated the byte.
    pub const fn pressed(self) -> bool {
        self.0 & STATUS_BUTTON_PRESSED != 0
    }

    /// Button was clicked since the bit was last cleared.
    pub const fn clicked(self) -> bool {
        self.0 & STATUS_BUTTON_CLICKED != 0
    }
}
