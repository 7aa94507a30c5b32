//! The CHIP-8 machine state as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::display::Display;
use crate::emulator::key::Key;
use crate::error::{EmulatorError, Result};
use crate::util::bit_splitter::BitSplitter;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
pub const FONT_START: u16 = 0x050;
pub const FONT_SPRITE_HEIGHT: u16 = 5;
pub const FLAG_REGISTER: usize = 0xF;
const FONT: [u8; 80] = [
	0xF0,0x90,0x90,0x90,0xF0, // 0
	0x20,0x60,0x20,0x20,0x70, // 1
	0xF0,0x10,0xF0,0x80,0xF0, // 2
	0xF0,0x10,0xF0,0x10,0xF0, // 3
	0x90,0x90,0xF0,0x10,0x10, // 4
	0xF0,0x80,0xF0,0x10,0xF0, // 5
	0xF0,0x80,0xF0,0x90,0xF0, // 6
	0xF0,0x10,0x20,0x40,0x40, // 7
	0xF0,0x90,0xF0,0x90,0xF0, // 8
	0xF0,0x90,0xF0,0x10,0xF0, // 9
	0xF0,0x90,0xF0,0x90,0x90, // A
	0xE0,0x90,0xE0,0x90,0xE0, // B
	0xF0,0x80,0x80,0x80,0xF0, // C
	0xE0,0x90,0x90,0x90,0xE0, // D
	0xF0,0x80,0xF0,0x80,0xF0, // E
	0xF0,0x80,0xF0,0x80,0x80, // F
];

/// Everything an instruction can read or change.
///
/// Operations get this by mutable reference, so there is no state
/// outside of it and a machine can be stepped one instruction at a time in tests.
#[derive(Clone)]
pub struct State {
    pub(crate) memory: [u8; MEM_SIZE],
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) i: u16,
    pub(crate) program_counter: u16,
    pub(crate) stack: Vec<u16>,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) display: Display,
    pub(crate) pressed_key: Option<Key>,
}

impl State {

    /// Create a fresh machine with the font loaded and the program counter at 0x200.
    pub fn new() -> State {
        let mut memory = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        State {
            memory,
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PC_START,
            stack: Vec::with_capacity(STACK_SIZE),
            delay_timer: 0,
            sound_timer: 0,
            display: Display::new(),
            pressed_key: None,
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load_rom(&mut self, program: &[u8]) -> Result<()> {
        let start = PC_START as usize;
        let capacity = MEM_SIZE - start;
        if program.len() > capacity {
            return Err(EmulatorError::RomTooLarge { size: program.len(), capacity });
        }
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Read the instruction word at the program counter and move past it.
    pub(crate) fn fetch(&mut self) -> Result<u16> {
        let word = self.read(self.program_counter, 2)?;
        let word = BitSplitter::new(word[0], word[1]).as_u16();
        self.program_counter += 2;
        Ok(word)
    }

    /// `len` bytes of memory starting at `addr`.
    pub fn read(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&self.memory[range])
    }

    pub(crate) fn read_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&mut self.memory[range])
    }

    fn checked_range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        if start + len > MEM_SIZE {
            return Err(EmulatorError::MemoryOutOfBounds { addr: start, len });
        }
        Ok(start..start + len)
    }

    pub(crate) fn push(&mut self, return_addr: u16) -> Result<()> {
        if self.stack.len() == STACK_SIZE {
            return Err(EmulatorError::StackOverflow { addr: self.program_counter.wrapping_sub(2) });
        }
        self.stack.push(return_addr);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<u16> {
        let addr = self.program_counter.wrapping_sub(2);
        self.stack.pop().ok_or(EmulatorError::StackUnderflow { addr })
    }

    /// Skip the next instruction.
    pub(crate) fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    pub(crate) fn set_flag(&mut self, flag: bool) {
        self.registers[FLAG_REGISTER] = flag as u8;
    }

    pub fn register(&self, index: u8) -> u8 {
        self.registers[index as usize & 0xF]
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// Return addresses, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn pressed_key(&self) -> Option<Key> {
        self.pressed_key
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
