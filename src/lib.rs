mod disassembler;
mod display;
mod error;
mod font;
mod instruction;
mod keystate;
mod memory;
mod opcode;
mod options;
mod processor;
mod program;
mod stack;
mod timer;

// Re-exports
pub use crate::disassembler::Disassembler;
pub use crate::display::Display;
pub use crate::error::*;
pub use crate::memory::Memory;
pub use crate::options::Options;
pub use crate::processor::*;
pub use crate::program::Program;
pub use crate::stack::Stack;
