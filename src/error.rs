use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Everything that can stop the virtual machine.
///
/// Apart from `RomTooLarge` and `Io`, these are raised by a running program
/// doing something the hardware leaves undefined. They are fatal: the cycle
/// that raised one did not complete, and the host should stop stepping.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("rom is {size} bytes, but only {capacity} bytes fit in memory")]
    RomTooLarge { size: usize, capacity: usize },
    #[error("call from {addr:#05x} with a full stack")]
    StackOverflow { addr: u16 },
    #[error("return from {addr:#05x} with an empty stack")]
    StackUnderflow { addr: u16 },
    #[error("access of {len} bytes at {addr:#05x} is outside memory")]
    MemoryOutOfBounds { addr: usize, len: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
