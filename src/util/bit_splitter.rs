/// A structure for easily splitting an instruction word
/// into the operand fields used by CHIP-8, such as
/// the register nibbles `x` and `y`, or the address `nnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// Return the two u8-components as a tuple
    pub fn as_two_u8(&self) -> (u8, u8) {
        (self.0, self.1)
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.x(), self.y(), self.n())
    }

    /// The lower nibble of the high byte.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// The upper nibble of the low byte.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// The lowest nibble.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// The low byte.
    pub fn kk(&self) -> u8 {
        self.1
    }

    /// The lowest 12 bits, usually an address.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}
