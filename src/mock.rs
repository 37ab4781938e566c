//! Register-file stand-in for a Twist, used by the unit tests.
//!
//! Behaves like the firmware on the wire: the first written byte sets the
//! register pointer, further bytes and reads auto-increment from it.
//! Clones share state, so a test can keep a handle while the driver owns
//! the other.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal_async::i2c::{
    ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};

use crate::registers::{Register, DEFAULT_ADDRESS};

const REGISTER_FILE_LEN: usize = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl embedded_hal_async::i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
    }
}

/// One completed bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Read { register: u8, len: usize },
    Write { register: u8, data: Vec<u8> },
}

#[derive(Debug)]
struct State {
    address: u8,
    registers: [u8; REGISTER_FILE_LEN],
    log: Vec<Transfer>,
    fail_on: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct MockTwist {
    state: Rc<RefCell<State>>,
}

impl MockTwist {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                address: DEFAULT_ADDRESS,
                registers: [0; REGISTER_FILE_LEN],
                log: Vec::new(),
                fail_on: None,
            })),
        }
    }

    pub fn set_u8(&self, register: Register, value: u8) {
        self.state.borrow_mut().registers[register.address() as usize] = value;
    }

    pub fn set_u16(&self, register: Register, value: u16) {
        let at = register.address() as usize;
        self.state.borrow_mut().registers[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn u8(&self, register: Register) -> u8 {
        self.state.borrow().registers[register.address() as usize]
    }

    pub fn u16(&self, register: Register) -> u16 {
        let at = register.address() as usize;
        let regs = self.state.borrow().registers;
        u16::from_le_bytes([regs[at], regs[at + 1]])
    }

    pub fn device_address(&self) -> u8 {
        self.state.borrow().address
    }

    /// NACK any transaction that addresses `register`.
    pub fn fail_on(&self, register: Register) {
        self.state.borrow_mut().fail_on = Some(register.address());
    }

    pub fn log(&self) -> Vec<Transfer> {
        self.state.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    pub fn writes(&self) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|t| matches!(t, Transfer::Write { .. }))
            .count()
    }
}

impl ErrorType for MockTwist {
    type Error = MockError;
}

impl I2c for MockTwist {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if address != state.address {
            return Err(MockError);
        }

        let mut pointer = 0usize;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&register, data)) = bytes.split_first() else {
                        continue;
                    };
                    if state.fail_on == Some(register) {
                        return Err(MockError);
                    }
                    pointer = register as usize;
                    if data.is_empty() {
                        continue;
                    }
                    state.registers[pointer..pointer + data.len()].copy_from_slice(data);
                    state.log.push(Transfer::Write {
                        register,
                        data: data.to_vec(),
                    });
                    if register == Register::ChangeAddress.address() {
                        state.address = data[0];
                    }
                }
                Operation::Read(buffer) => {
                    let len = buffer.len();
                    buffer.copy_from_slice(&state.registers[pointer..pointer + len]);
                    state.log.push(Transfer::Read {
                        register: pointer as u8,
                        len,
                    });
                }
            }
        }
        Ok(())
    }
}
