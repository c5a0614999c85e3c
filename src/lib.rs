mod display;
mod error;
mod font;
mod instruction;
mod keypad;
mod memory;
mod options;
mod processor;
mod program;
mod stack;

// Re-exports
pub use crate::display::Display;
pub use crate::error::*;
pub use crate::memory::Memory;
pub use crate::options::Options;
pub use crate::options::Quirks;
pub use crate::options::ShiftSource;
pub use crate::processor::*;
pub use crate::program::Program;
pub use crate::stack::Stack;
