use crate::processor::ProcessorStatus;
use std::collections::HashMap;
use std::error;
use std::fmt;

/// An enum describing the specific runtime failures that can occur within the
/// Ocho core.
///
/// Instances of [ErrorDetail] are generated by the internal sub-components and
/// wrapped in an [OchoError] before being bubbled-up to the hosting application
/// through the public API methods.
#[derive(Debug, PartialEq)]
pub enum ErrorDetail {
    /// An opcode was fetched that does not decode to any CHIP-8 instruction
    UnknownInstruction { opcode: u16 },
    /// The supplied program image does not fit in memory at the program start address
    ProgramTooLarge {
        program_size: usize,
        available: usize,
    },
    /// A CALL was executed with all stack entries already in use
    PushFullStack,
    /// A RET was executed with an empty stack
    PopEmptyStack,
    /// An attempt was made to read/write from an address outside the addressable range
    MemoryAddressOutOfBounds { address: u16 },
    /// One or more operands fall outside expected ranges and cannot be safely used
    OperandsOutOfBounds { operands: HashMap<String, usize> },
    /// A key ordinal was referenced that is outside the valid CHIP-8 keypad range (0x0 to 0xF)
    InvalidKey { key: u8 },
    /// The processor was stepped while in a state that cannot execute instructions
    NotReady { status: ProcessorStatus },
}

impl error::Error for ErrorDetail {}

impl fmt::Display for ErrorDetail {
    /// Returns a textual description of each enum variant for display purposes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::UnknownInstruction { opcode } => {
                write!(f, "opcode {:#06X} does not decode to an instruction", opcode)
            }
            ErrorDetail::ProgramTooLarge {
                program_size,
                available,
            } => {
                write!(
                    f,
                    "program of {} bytes exceeds the {} bytes of available memory",
                    program_size, available
                )
            }
            ErrorDetail::PushFullStack => {
                write!(f, "an attempt was made to push to the stack while full")
            }
            ErrorDetail::PopEmptyStack => {
                write!(f, "an attempt was made to pop the stack while empty")
            }
            ErrorDetail::MemoryAddressOutOfBounds { address } => {
                write!(f, "memory address {:#06X} is out of bounds", address)
            }
            ErrorDetail::OperandsOutOfBounds { operands } => {
                write!(f, "an instruction contains invalid operands: {:?}", operands)
            }
            ErrorDetail::InvalidKey { key } => {
                write!(f, "key {:#04X} is outside the keypad range", key)
            }
            ErrorDetail::NotReady { status } => {
                write!(f, "the processor cannot step while {:?}", status)
            }
        }
    }
}

/// The error type returned by the public Ocho API methods.
///
/// In addition to the underlying [ErrorDetail], this carries the program
/// counter at the time of failure and (where one had been fetched) the raw
/// opcode, so hosting applications can report meaningful diagnostics.  The
/// processor that produced an [OchoError] transitions to
/// [ProcessorStatus::Crashed] and will not execute further instructions.
#[derive(Debug, PartialEq)]
pub struct OchoError {
    /// The program counter value at the point the error occurred
    pub program_counter: u16,
    /// The raw opcode being processed, if the failure occurred after a fetch
    pub opcode: Option<u16>,
    /// The underlying error
    pub inner_error: ErrorDetail,
}

impl error::Error for OchoError {}

impl fmt::Display for OchoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Some(opcode) => write!(
                f,
                "error at address {:#06X} (opcode {:#06X}): {}",
                self.program_counter, opcode, self.inner_error
            ),
            None => write!(
                f,
                "error at address {:#06X}: {}",
                self.program_counter, self.inner_error
            ),
        }
    }
}
