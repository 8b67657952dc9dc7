use crate::processor::StateSnapshot;
use std::collections::HashMap;
use std::sync::PoisonError;
use thiserror::Error;

/// An enum describing the individual failure conditions that can arise during emulation.
///
/// Instances of [ErrorDetail] are raised by the crate's internal components and wrapped
/// in an [OchoError] (along with diagnostic state) before being bubbled-up to the hosting
/// application through the public API methods.
#[derive(Debug, Error, PartialEq)]
pub enum ErrorDetail {
    /// An opcode was decoded that does not correspond to any documented instruction
    #[error("opcode {opcode:#06X} does not match any documented instruction")]
    UnknownInstruction { opcode: u16 },
    /// One or more operands fall outside expected ranges and cannot be safely used
    #[error("instruction operands fall outside their valid ranges: {operands:?}")]
    OperandsOutOfBounds { operands: HashMap<String, usize> },
    /// An attempt was made to read or write an address outside the addressable range
    #[error("memory address {address:#05X} is outside the addressable range")]
    MemoryAddressOutOfBounds { address: usize },
    /// An attempt was made to push to the call stack while it is full
    #[error("subroutine call attempted while the call stack is full")]
    PushFullStack,
    /// An attempt was made to pop the call stack while it is empty
    #[error("subroutine return attempted while the call stack is empty")]
    PopEmptyStack,
    /// A key ordinal was referenced that is outside the valid keypad range (0x0 to 0xF)
    #[error("key {key:#04X} is outside the keypad range")]
    InvalidKey { key: u8 },
    /// The shared timer state could not be locked because the clock thread panicked
    #[error("the timer mutex was poisoned by a panicked thread")]
    TimerLockFailure,
    /// The supplied ROM image could not be read
    #[error("program could not be loaded: {reason}")]
    UnloadableProgram { reason: String },
    /// The supplied options file could not be read or parsed
    #[error("options could not be loaded: {reason}")]
    UnloadableOptions { reason: String },
    /// A cycle execution was requested while the processor is not in a runnable state
    #[error("the processor is not in a runnable state")]
    NotRunnable,
}

// Lock poisoning means the clock thread died mid-tick; surface it as a fatal
// condition so `lock()?` composes inside instruction handlers.
impl<T> From<PoisonError<T>> for ErrorDetail {
    fn from(_: PoisonError<T>) -> Self {
        ErrorDetail::TimerLockFailure
    }
}

/// The error type returned through the public API when emulation fails.
///
/// In addition to the underlying [ErrorDetail], this carries the program counter and raw
/// opcode at the point of failure plus a full state snapshot, so the hosting application
/// can report or dump the machine state for diagnosis.
#[derive(Debug, Error)]
#[error("crashed at address {program_counter:#05X} on opcode {opcode:#06X}: {inner_error}")]
pub struct OchoError {
    /// The address of the instruction being executed when the failure occurred
    pub program_counter: u16,
    /// The raw opcode under execution (0x0000 if the failure occurred before a fetch completed)
    pub opcode: u16,
    /// The underlying failure condition
    pub inner_error: ErrorDetail,
    /// An extended state snapshot taken at the moment of failure
    pub state_snapshot_dump: StateSnapshot,
}
