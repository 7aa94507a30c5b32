use std::convert::TryFrom;
use std::fmt;

/// One of the 16 keys on the hexadecimal keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Num0 = 0x0,
    Num1 = 0x1,
    Num2 = 0x2,
    Num3 = 0x3,
    Num4 = 0x4,
    Num5 = 0x5,
    Num6 = 0x6,
    Num7 = 0x7,
    Num8 = 0x8,
    Num9 = 0x9,
    A = 0xA,
    B = 0xB,
    C = 0xC,
    D = 0xD,
    E = 0xE,
    F = 0xF,
}

const KEYS: [Key; 16] = [
    Key::Num0, Key::Num1, Key::Num2, Key::Num3,
    Key::Num4, Key::Num5, Key::Num6, Key::Num7,
    Key::Num8, Key::Num9, Key::A, Key::B,
    Key::C, Key::D, Key::E, Key::F,
];

impl Key {

    /// The value a program sees for this key.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Map a hex digit character (`0-9`, `a-f`, either case) to a key.
    pub fn from_char(c: char) -> Option<Key> {
        c.to_digit(16).map(|d| KEYS[d as usize])
    }
}

impl TryFrom<u8> for Key {
    type Error = u8;

    fn try_from(value: u8) -> Result<Key, u8> {
        KEYS.get(value as usize).copied().ok_or(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.value())
    }
}
