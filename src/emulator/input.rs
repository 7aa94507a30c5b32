use crate::emulator::key::Key;

/// Represents an input device that can report the key currently held down.
///
/// Only one key can be latched at a time, so an implementation
/// with several keys held should pick one.
pub trait EmulatorInput {
    fn get_key(&mut self) -> Option<Key>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn get_key(&mut self) -> Option<Key> {
        None
    }
}

/// Plays back a fixed sequence of latches, one per call,
/// then keeps reporting the last one.
pub struct ScriptedInput {
    keys: Vec<Option<Key>>,
    position: usize,
}

impl ScriptedInput {
    pub fn new(keys: Vec<Option<Key>>) -> ScriptedInput {
        ScriptedInput { keys, position: 0 }
    }
}

impl EmulatorInput for ScriptedInput {
    fn get_key(&mut self) -> Option<Key> {
        let key = self.keys.get(self.position).or_else(|| self.keys.last()).copied().flatten();
        self.position += 1;
        key
    }
}
