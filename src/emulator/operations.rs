//! The semantics of every instruction, applied to a `State`.

use std::convert::TryFrom;

use rand::Rng;

use crate::emulator::display::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::emulator::instruction::*;
use crate::emulator::key::Key;
use crate::emulator::state::{State, FONT_SPRITE_HEIGHT, FONT_START};
use crate::error::Result;

const MAX_SPRITE_HEIGHT: usize = 15;

/// What a retired instruction means for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing the host needs to act on.
    Continue,
    /// The display was cleared or drawn to.
    Redraw,
    /// A key-wait found no key. The program counter points at the
    /// same instruction again, so nothing was gained this cycle.
    WaitingForKey,
}

/// Execute a single instruction.
///
/// The program counter is expected to already point past the instruction,
/// so skips add 2 and jumps overwrite it.
pub fn execute<R: Rng>(state: &mut State, instruction: Instruction, rng: &mut R) -> Result<Outcome> {
    match instruction {

        // Machine code routines don't exist here, so these do nothing.
        Instruction::Sys(Addr(addr)) => {
            log::debug!("Ignoring sys call to {:#05x}", addr);
        }

        // Clear the screen
        Instruction::ClearScreen => {
            state.display.clear();
            return Ok(Outcome::Redraw);
        }

        // Return to the previous call site via the stack.
        Instruction::Return => {
            state.program_counter = state.pop()?;
        }

        // Go to a specific memory address
        Instruction::Goto(Addr(addr)) => {
            state.program_counter = addr;
        }

        // Store the current address on the stack, then jump to the specified address
        Instruction::Call(Addr(addr)) => {
            state.push(state.program_counter)?;
            state.program_counter = addr;
        }

        // If the register equals the constant, skip the next instruction
        Instruction::IfRegEqConst(Reg(x), Const(n)) => {
            state.skip_if(state.registers[reg(x)] == n);
        }

        Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
            state.skip_if(state.registers[reg(x)] != n);
        }

        Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
            state.skip_if(state.registers[reg(x)] == state.registers[reg(y)]);
        }

        Instruction::SetRegToConst(Reg(x), Const(n)) => {
            state.registers[reg(x)] = n;
        }

        // Wraps, and unlike the register version never touches VF.
        Instruction::IncRegByConst(Reg(x), Const(n)) => {
            state.registers[reg(x)] = state.registers[reg(x)].wrapping_add(n);
        }

        Instruction::SetRegToReg(Reg(x), Reg(y)) => {
            state.registers[reg(x)] = state.registers[reg(y)];
        }

        Instruction::BitwiseOr(Reg(x), Reg(y)) => {
            state.registers[reg(x)] |= state.registers[reg(y)];
        }

        Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
            state.registers[reg(x)] &= state.registers[reg(y)];
        }

        Instruction::BitwiseXor(Reg(x), Reg(y)) => {
            state.registers[reg(x)] ^= state.registers[reg(y)];
        }

        // The flag is written last in all of the arithmetic below,
        // so it wins when x or y is VF.

        // Increment the value of a register by the value of another, VF = carry
        Instruction::IncRegByReg(Reg(x), Reg(y)) => {
            let (sum, carry) = state.registers[reg(x)].overflowing_add(state.registers[reg(y)]);
            state.registers[reg(x)] = sum;
            state.set_flag(carry);
        }

        // Decrement the value of a register by the value of another, VF = not borrow
        Instruction::DecRegByReg(Reg(x), Reg(y)) => {
            let (difference, borrow) = state.registers[reg(x)].overflowing_sub(state.registers[reg(y)]);
            state.registers[reg(x)] = difference;
            state.set_flag(!borrow);
        }

        // VF = the bit shifted out
        Instruction::BitshiftRight(Reg(x)) => {
            let value = state.registers[reg(x)];
            state.registers[reg(x)] = value >> 1;
            state.set_flag(value & 1 == 1);
        }

        // Vx = Vy - Vx, VF = not borrow
        Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
            let (difference, borrow) = state.registers[reg(y)].overflowing_sub(state.registers[reg(x)]);
            state.registers[reg(x)] = difference;
            state.set_flag(!borrow);
        }

        Instruction::BitshiftLeft(Reg(x)) => {
            let value = state.registers[reg(x)];
            state.registers[reg(x)] = value << 1;
            state.set_flag(value >> 7 == 1);
        }

        Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
            state.skip_if(state.registers[reg(x)] != state.registers[reg(y)]);
        }

        Instruction::SetI(Addr(addr)) => {
            state.i = addr;
        }

        Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
            state.program_counter = addr.wrapping_add(state.registers[0] as u16);
        }

        Instruction::SetVxRand(Reg(x), Const(n)) => {
            state.registers[reg(x)] = rng.gen::<u8>() & n;
        }

        // Draw a sprite of `sprite_height` rows from memory at I.
        Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {

            // Get coordinates, the starting point wraps but the sprite itself is clipped
            let x_coord = state.registers[reg(x)] as usize % SCREEN_WIDTH;
            let y_coord = state.registers[reg(y)] as usize % SCREEN_HEIGHT;

            // Get sprite, each row is 8 bits
            let height = sprite_height as usize & MAX_SPRITE_HEIGHT;
            let mut sprite = [0; MAX_SPRITE_HEIGHT];
            sprite[..height].copy_from_slice(state.read(state.i, height)?);

            let any_collisions = state.display.draw_sprite(x_coord, y_coord, &sprite[..height]);

            // Set VF collision flag
            state.set_flag(any_collisions);
            return Ok(Outcome::Redraw);
        }

        // Skip if the key in Vx is pressed
        Instruction::IfKeyEqVx(Reg(x)) => {
            state.skip_if(is_pressed(state, x));
        }

        // Skip if the key in Vx isn't pressed
        Instruction::IfKeyNeqVx(Reg(x)) => {
            state.skip_if(!is_pressed(state, x));
        }

        Instruction::SetRegToDelayTimer(Reg(x)) => {
            state.registers[reg(x)] = state.delay_timer;
        }

        // Wait for a key by running this instruction again until one is latched.
        Instruction::SetRegToGetKey(Reg(x)) => {
            match state.pressed_key {
                Some(key) => state.registers[reg(x)] = key.value(),
                None => {
                    state.program_counter = state.program_counter.wrapping_sub(2);
                    return Ok(Outcome::WaitingForKey);
                }
            }
        }

        Instruction::SetDelayTimerToReg(Reg(x)) => {
            state.delay_timer = state.registers[reg(x)];
        }

        Instruction::SetSoundTimerToReg(Reg(x)) => {
            state.sound_timer = state.registers[reg(x)];
        }

        // Saturates, so a runaway index fails on its next use instead of wrapping.
        Instruction::AddRegToI(Reg(x)) => {
            state.i = state.i.saturating_add(state.registers[reg(x)] as u16);
        }

        // Set i to character address. Each font element is 5 bytes wide.
        Instruction::SetIToSpriteAddrVx(Reg(x)) => {
            let digit = (state.registers[reg(x)] & 0xF) as u16;
            state.i = FONT_START + FONT_SPRITE_HEIGHT * digit;
        }

        // Hundreds, tens and ones at I, I + 1 and I + 2
        Instruction::SetIToBcdOfReg(Reg(x)) => {
            let value = state.registers[reg(x)];
            let digits = state.read_mut(state.i, 3)?;
            digits.copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
        }

        // Dump register values up to Vx, I is left as is
        Instruction::RegDump(Reg(x)) => {
            let count = reg(x) + 1;
            let registers = state.registers;
            state.read_mut(state.i, count)?.copy_from_slice(&registers[..count]);
        }

        // Load register values up to Vx, I is left as is
        Instruction::RegLoad(Reg(x)) => {
            let count = reg(x) + 1;
            let mut registers = state.registers;
            registers[..count].copy_from_slice(state.read(state.i, count)?);
            state.registers = registers;
        }
    };

    Ok(Outcome::Continue)
}

// Register operands are nibbles. Wider values are cut down to one,
// the same as decoding an instruction word would.
fn reg(x: u8) -> usize {
    (x & 0xF) as usize
}

// No latched key counts as not pressed.
fn is_pressed(state: &State, x: u8) -> bool {
    match Key::try_from(state.registers[reg(x)]) {
        Ok(key) => state.pressed_key == Some(key),
        Err(_) => false,
    }
}
