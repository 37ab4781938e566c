//! Error types for the Twist driver.

use core::fmt;

use crate::registers::Register;

/// Errors that can occur when communicating with the Twist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistError<E> {
    /// Underlying I2C bus error.
    ///
    /// `register` is the register whose transaction failed. For calls that
    /// issue several transactions (e.g. [`reset_count`]) every transaction
    /// before it has already taken effect on the device.
    ///
    /// [`reset_count`]: crate::Twist::reset_count
    I2c { register: Register, error: E },

    /// Argument outside the range the device accepts. Nothing was sent.
    OutOfRange,
}

impl<E> TwistError<E> {
    /// Register whose transaction failed, if this is a bus error.
    pub fn register(&self) -> Option<Register> {
        match self {
            TwistError::I2c { register, .. } => Some(*register),
            TwistError::OutOfRange => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for TwistError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TwistError::I2c { register, error } => {
                write!(f, "I2C error on {:?}: {:?}", register, error)
            }
            TwistError::OutOfRange => write!(f, "Value out of range for register"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for TwistError<E> {}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for TwistError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TwistError::I2c { register, error } => {
                defmt::write!(f, "I2C error on {}: {}", register, error)
            }
            TwistError::OutOfRange => defmt::write!(f, "Value out of range"),
        }
    }
}
