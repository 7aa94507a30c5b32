//! The fetch-decode-execute loop and the hooks a host needs around it.

use std::fmt;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::emulator::display::Display;
use crate::emulator::input::EmulatorInput;
use crate::emulator::instruction::Instruction;
use crate::emulator::key::Key;
use crate::emulator::operations::{self, Outcome};
use crate::emulator::output::EmulatorOutput;
use crate::emulator::state::State;
use crate::error::Result;

pub struct Emulator<R: Rng = ThreadRng> {
    state: State,
    rng: R,
    frame_ready: bool,
}

impl<R: Rng> fmt::Display for Emulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state.display)
    }
}

impl Emulator<ThreadRng> {

    /// Create a new emulator drawing random numbers from the thread rng
    pub fn new() -> Emulator<ThreadRng> {
        Emulator::with_rng(rand::thread_rng())
    }
}

impl Default for Emulator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Emulator<R> {

    /// Create a new emulator with a specific random number generator
    pub fn with_rng(rng: R) -> Emulator<R> {
        Emulator {
            state: State::new(),
            rng,
            frame_ready: false,
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_rom(program)?;
        log::debug!("Loaded {} bytes", program.len());
        Ok(())
    }

    /// Perform a single cycle: load the instruction at the program counter,
    /// move past it and execute it.
    pub fn step(&mut self) -> Result<Outcome> {
        let pc = self.state.program_counter;
        let instruction = Instruction::from_u16(self.state.fetch()?);

        log::trace!("{:#05x}: {:?}", pc, instruction);

        self.execute_single(instruction)
    }

    /// Execute a single instruction without fetching it from memory.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<Outcome> {
        let outcome = operations::execute(&mut self.state, instruction, &mut self.rng)
            .map_err(|e| {
                log::warn!("{:?} failed: {}", instruction, e);
                e
            })?;
        if outcome == Outcome::Redraw {
            self.frame_ready = true;
        }
        Ok(outcome)
    }

    /// Execute instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<()> {
        for &instruction in instructions {
            self.execute_single(instruction)?;
        }
        Ok(())
    }

    /// Step until an instruction changes the display, and return a copy of it.
    /// Gives up with `None` after `max_cycles` steps without a new frame.
    pub fn run_until_frame(&mut self, max_cycles: usize) -> Result<Option<Display>> {
        for _ in 0..max_cycles {
            if self.step()? == Outcome::Redraw {
                return Ok(self.take_frame());
            }
        }
        Ok(None)
    }

    /// A copy of the display if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<Display> {
        if self.frame_ready {
            self.frame_ready = false;
            log::debug!("Frame ready");
            Some(self.state.display.clone())
        } else {
            None
        }
    }

    /// Latch a key, replacing any previous one. `None` releases it.
    pub fn set_key(&mut self, key: Option<Key>) {
        self.state.pressed_key = key;
    }

    /// Count both timers down by one. Meant to be called at 60 Hz by the host.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Run one 60 Hz tick: latch the key from `input`, execute up to `cycles`
    /// instructions, hand a completed frame to `output` and count the timers down.
    ///
    /// Stops early if the program waits for a key, since polling again
    /// within the same tick can't latch anything new.
    pub fn tick<I: EmulatorInput, O: EmulatorOutput + ?Sized>(&mut self, input: &mut I, output: &mut O, cycles: usize) -> Result<()> {
        self.set_key(input.get_key());
        for _ in 0..cycles {
            if self.step()? == Outcome::WaitingForKey {
                break;
            }
        }
        if let Some(frame) = self.take_frame() {
            output.present(&frame);
        }
        self.tick_timers();
        Ok(())
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::input::ScriptedInput;
    use crate::emulator::output::DummyOutput;
    use crate::emulator::instruction::{Addr, Const, Reg};
    use crate::error::EmulatorError;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> Emulator<StdRng> {
        Emulator::with_rng(StdRng::seed_from_u64(1))
    }

    #[test]
    fn return_after_call_is_neutral() {
        // Create emulator
        let mut emulator = seeded();
        assert_eq!(emulator.state().program_counter(), 0x200);

        // Write program with call and return
        let program = [
            0x22, 0x06, // 0x00, call 0x206
            0x00, 0x00, // 0x02
            0x00, 0x00, // 0x04
            0x00, 0xEE  // 0x06, return
        ];
        emulator.load(&program).unwrap();

        // Run the program
        emulator.step().unwrap(); // Call 0x206
        assert_eq!(emulator.state().program_counter(), 0x206);
        emulator.step().unwrap(); // Return to 202
        assert_eq!(emulator.state().program_counter(), 0x202);
        assert!(emulator.state().stack().is_empty());
    }

    #[test]
    fn step_advances_before_executing() {
        let mut emulator = seeded();
        emulator.load(&[
            0x60, 0x05, // v0 = 5
            0x30, 0x05, // skip if v0 == 5
            0x00, 0xE0, // skipped
            0x12, 0x00, // goto 0x200
        ]).unwrap();
        emulator.step().unwrap();
        assert_eq!(emulator.state().program_counter(), 0x202);
        emulator.step().unwrap();
        assert_eq!(emulator.state().program_counter(), 0x206);
        emulator.step().unwrap();
        assert_eq!(emulator.state().program_counter(), 0x200);
    }

    #[test]
    fn unknown_words_are_skipped() {
        let mut emulator = seeded();
        emulator.load(&[0xFF, 0xFF, 0x81, 0x2F]).unwrap();
        assert_eq!(emulator.step().unwrap(), Outcome::Continue);
        assert_eq!(emulator.step().unwrap(), Outcome::Continue);
        assert_eq!(emulator.state().program_counter(), 0x204);
    }

    #[test]
    fn key_wait_blocks_until_key_is_set() {
        let mut emulator = seeded();
        emulator.load(&[0xF4, 0x0A]).unwrap();

        for _ in 0..3 {
            assert_eq!(emulator.step().unwrap(), Outcome::WaitingForKey);
            assert_eq!(emulator.state().program_counter(), 0x200);
        }

        emulator.set_key(Some(Key::C));
        assert_eq!(emulator.step().unwrap(), Outcome::Continue);
        assert_eq!(emulator.state().program_counter(), 0x202);
        assert_eq!(emulator.state().register(4), 0xC);
    }

    #[test]
    fn run_until_frame_returns_display() {
        let mut emulator = seeded();
        emulator.load(&[
            0x60, 0x00, // v0 = 0
            0xF0, 0x29, // i = sprite of v0
            0xD0, 0x05, // draw at (v0, v0)
            0x12, 0x06, // loop
        ]).unwrap();

        let frame = emulator.run_until_frame(10).unwrap().unwrap();
        assert!(frame.get(0, 0));
        assert!(frame.get(3, 0));
        assert!(!frame.get(1, 1));
        assert_eq!(&frame, emulator.display());

        // Only loops from here on
        assert_eq!(emulator.run_until_frame(10).unwrap(), None);
        assert_eq!(emulator.take_frame(), None);
    }

    #[test]
    fn clearing_completes_a_frame() {
        let mut emulator = seeded();
        emulator.execute_single(Instruction::ClearScreen).unwrap();
        assert!(emulator.take_frame().unwrap().is_blank());
        assert_eq!(emulator.take_frame(), None);
    }

    #[test]
    fn execute_many_runs_in_order() {
        let mut emulator = seeded();
        emulator.execute_many(&[
            Instruction::Goto(Addr(0x250)),
            Instruction::SetRegToConst(Reg(0xA), Const(35)),
            Instruction::SetRegToReg(Reg(0xB), Reg(0xA)),
        ]).unwrap();
        assert_eq!(emulator.state().program_counter(), 0x250);
        assert_eq!(emulator.state().register(0xB), 35);
    }

    #[test]
    fn errors_are_surfaced() {
        let mut emulator = seeded();
        emulator.load(&[0x00, 0xEE]).unwrap();
        assert!(matches!(emulator.step(), Err(EmulatorError::StackUnderflow { addr: 0x200 })));

        let mut emulator = seeded();
        let rom = vec![0; 4096];
        assert!(matches!(emulator.load(&rom), Err(EmulatorError::RomTooLarge { .. })));
    }

    #[test]
    fn timers_count_down_to_zero() {
        let mut emulator = seeded();
        emulator.execute_many(&[
            Instruction::SetRegToConst(Reg(0), Const(2)),
            Instruction::SetDelayTimerToReg(Reg(0)),
            Instruction::SetSoundTimerToReg(Reg(0)),
        ]).unwrap();
        assert!(emulator.sound_active());

        emulator.tick_timers();
        assert_eq!(emulator.state().delay_timer(), 1);
        emulator.tick_timers();
        emulator.tick_timers();
        assert_eq!(emulator.state().delay_timer(), 0);
        assert_eq!(emulator.state().sound_timer(), 0);
        assert!(!emulator.sound_active());
    }

    #[test]
    fn stepping_never_touches_timers() {
        let mut emulator = seeded();
        emulator.load(&[0x60, 0x09, 0xF0, 0x15, 0x12, 0x04]).unwrap();
        for _ in 0..100 {
            emulator.step().unwrap();
        }
        assert_eq!(emulator.state().delay_timer(), 9);
    }

    #[test]
    fn tick_latches_key_and_presents_frame() {
        let mut emulator = seeded();
        emulator.load(&[
            0xF1, 0x0A, // v1 = key
            0xF1, 0x29, // i = sprite of v1
            0xD0, 0x05, // draw at (v0, v0)
            0x12, 0x06, // loop
        ]).unwrap();
        let mut input = ScriptedInput::new(vec![None, Some(Key::Num8)]);
        let mut output = DummyOutput::new();

        emulator.tick(&mut input, &mut output, 10).unwrap();
        assert_eq!(emulator.state().program_counter(), 0x200);
        assert_eq!(output.frames(), 0);

        emulator.tick(&mut input, &mut output, 10).unwrap();
        assert_eq!(emulator.state().register(1), 8);
        assert_eq!(output.frames(), 1);
        assert!(output.last_frame().unwrap().get(0, 0));
    }

    #[test]
    fn text_rendering_matches_display() {
        let mut emulator = Emulator::new();
        emulator.execute_single(Instruction::Draw(Reg(0), Reg(0), Const(1))).unwrap();
        assert_eq!(emulator.to_string(), emulator.display().to_string());
    }
}
