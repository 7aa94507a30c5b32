/*!

A CHIP-8 interpreter core as specified at https://en.wikipedia.org/wiki/CHIP-8.

The crate runs programs one instruction at a time and exposes the
monochrome frame buffer, the timers and a key latch to a host.
Loading files, windows and real keyboards are left to the host.

# Headless runner

To try the interpreter on a program, run `cargo run --release -- <program> --print-frames`.
Every completed frame is printed to the terminal as text.

# Library

The main way of running a program is to load instructions as bytes and step through them.

```rust
use chip8_vm::emulator::{Emulator, Outcome};

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
assert_eq!(emulator.step().unwrap(), Outcome::Redraw); // Will now clear the display
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.state().register(0xB), 35);
```

## Hosting

A host drives the interpreter at its own pace. Once per 60 Hz tick it should
latch the current key with `Emulator::set_key`, run a handful of `step`s,
show the frame from `Emulator::take_frame` if there is one, and call
`Emulator::tick_timers`. `Emulator::tick` does exactly that given an
`EmulatorInput` and an `EmulatorOutput`.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;

let mut emulator = Emulator::new();
emulator.load(&[0x00, 0xE0, 0x12, 0x02]).unwrap();

let mut output = DummyOutput::new();
emulator.tick(&mut DummyInput, &mut output, 10).unwrap();
assert_eq!(output.frames(), 1);
```
*/

pub mod emulator;
pub mod error;
pub mod util;
