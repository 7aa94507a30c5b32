//! The CHIP-8 virtual machine: decoding, instruction semantics and the cycle driver.

pub mod display;
pub mod emulator;
pub mod input;
pub mod instruction;
pub mod key;
pub mod operations;
pub mod output;
pub mod state;

pub use self::emulator::Emulator;
pub use self::operations::Outcome;
