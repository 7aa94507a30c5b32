use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Sys(Addr), // 0NNN, and anything unrecognised
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    pub fn from_u16(value: u16) -> Instruction {
        let (left, right) = BitSplitter::from_u16(value).as_two_u8();
        Instruction::from_two_u8(left, right)
    }

    /// Decode an instruction word. This never fails: words that match no
    /// known pattern become `Sys`, which executes as a no-op.
    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        let opcode = BitSplitter::new(left, right);
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));
        let addr = Addr(opcode.nnn());
        let kk = Const(opcode.kk());
        match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(addr),
            (2, _, _, _) => Instruction::Call(addr),
            (3, _, _, _) => Instruction::IfRegEqConst(x, kk),
            (4, _, _, _) => Instruction::IfRegNeqConst(x, kk),
            (5, _, _, _) => Instruction::IfRegEqReg(x, y),
            (6, _, _, _) => Instruction::SetRegToConst(x, kk),
            (7, _, _, _) => Instruction::IncRegByConst(x, kk),
            (8, _, _, 0) => Instruction::SetRegToReg(x, y),
            (8, _, _, 1) => Instruction::BitwiseOr(x, y),
            (8, _, _, 2) => Instruction::BitwiseAnd(x, y),
            (8, _, _, 3) => Instruction::BitwiseXor(x, y),
            (8, _, _, 4) => Instruction::IncRegByReg(x, y),
            (8, _, _, 5) => Instruction::DecRegByReg(x, y),
            (8, _, _, 6) => Instruction::BitshiftRight(x),
            (8, _, _, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, _, _, 0xE) => Instruction::BitshiftLeft(x),
            (9, _, _, _) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(addr),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(addr),
            (0xC, _, _, _) => Instruction::SetVxRand(x, kk),
            (0xD, _, _, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, _, 9, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, _, 0xA, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _, 0, 7) => Instruction::SetRegToDelayTimer(x),
            (0xF, _, 0, 0xA) => Instruction::SetRegToGetKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelayTimerToReg(x),
            (0xF, _, 1, 8) => Instruction::SetSoundTimerToReg(x),
            (0xF, _, 1, 0xE) => Instruction::AddRegToI(x),
            (0xF, _, 2, 9) => Instruction::SetIToSpriteAddrVx(x),
            (0xF, _, 3, 3) => Instruction::SetIToBcdOfReg(x),
            (0xF, _, 5, 5) => Instruction::RegDump(x),
            (0xF, _, 6, 5) => Instruction::RegLoad(x),
            _ => Instruction::Sys(addr)
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn opcodes_are_parsed_correctly() {
        assert_eq!(Instruction::Sys(Addr(0x123)), Instruction::from_u16(0x0123));
        assert_eq!(Instruction::ClearScreen, Instruction::from_u16(0x00E0));
        assert_eq!(Instruction::Return, Instruction::from_u16(0x00EE));
        assert_eq!(Instruction::Goto(Addr(0x25)), Instruction::from_u16(0x1025));
        assert_eq!(Instruction::Call(Addr(0x37)), Instruction::from_u16(0x2037));
        assert_eq!(Instruction::IfRegEqConst(Reg(0xA), Const(8)), Instruction::from_u16(0x3A08));
        assert_eq!(Instruction::IfRegNeqConst(Reg(0xA), Const(8)), Instruction::from_u16(0x4A08));
        assert_eq!(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x5AB0));
        assert_eq!(Instruction::SetRegToConst(Reg(0xB), Const(0x23)), Instruction::from_u16(0x6B23));
        assert_eq!(Instruction::IncRegByConst(Reg(0xC), Const(0xA1)), Instruction::from_u16(0x7CA1));
        assert_eq!(Instruction::SetRegToReg(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x8AB0));
        assert_eq!(Instruction::BitwiseOr(Reg(0xD), Reg(0xE)), Instruction::from_u16(0x8DE1));
        assert_eq!(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)), Instruction::from_u16(0x8DE2));
        assert_eq!(Instruction::BitwiseXor(Reg(0xD), Reg(0xE)), Instruction::from_u16(0x8DE3));
        assert_eq!(Instruction::IncRegByReg(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x8AB4));
        assert_eq!(Instruction::DecRegByReg(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x8AB5));
        assert_eq!(Instruction::BitshiftRight(Reg(0xA)), Instruction::from_u16(0x8AB6));
        assert_eq!(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x8AB7));
        assert_eq!(Instruction::BitshiftLeft(Reg(0xA)), Instruction::from_u16(0x8A0E));
        assert_eq!(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)), Instruction::from_u16(0x9AB0));
        assert_eq!(Instruction::SetI(Addr(0x25)), Instruction::from_u16(0xA025));
        assert_eq!(Instruction::SetPcToV0PlusAddr(Addr(0x25)), Instruction::from_u16(0xB025));
        assert_eq!(Instruction::SetVxRand(Reg(0xA), Const(0x23)), Instruction::from_u16(0xCA23));
        assert_eq!(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)), Instruction::from_u16(0xDABC));
        assert_eq!(Instruction::IfKeyEqVx(Reg(0xA)), Instruction::from_u16(0xEA9E));
        assert_eq!(Instruction::IfKeyNeqVx(Reg(0xA)), Instruction::from_u16(0xEAA1));
        assert_eq!(Instruction::SetRegToDelayTimer(Reg(0xA)), Instruction::from_u16(0xFA07));
        assert_eq!(Instruction::SetRegToGetKey(Reg(0xA)), Instruction::from_u16(0xFA0A));
        assert_eq!(Instruction::SetDelayTimerToReg(Reg(0xA)), Instruction::from_u16(0xFA15));
        assert_eq!(Instruction::SetSoundTimerToReg(Reg(0xA)), Instruction::from_u16(0xFA18));
        assert_eq!(Instruction::AddRegToI(Reg(0xA)), Instruction::from_u16(0xFA1E));
        assert_eq!(Instruction::SetIToSpriteAddrVx(Reg(0xA)), Instruction::from_u16(0xFA29));
        assert_eq!(Instruction::SetIToBcdOfReg(Reg(0xA)), Instruction::from_u16(0xFA33));
        assert_eq!(Instruction::RegDump(Reg(0xA)), Instruction::from_u16(0xFA55));
        assert_eq!(Instruction::RegLoad(Reg(0xA)), Instruction::from_u16(0xFA65));
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    // Register/register compares only look at the top nibble.
    #[test]
    fn compare_groups_ignore_low_nibble() {
        assert_eq!(Instruction::IfRegEqReg(Reg(1), Reg(2)), Instruction::from_u16(0x512F));
        assert_eq!(Instruction::IfRegNeqReg(Reg(1), Reg(2)), Instruction::from_u16(0x9123));
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x00E1 ; "near clear")]
    #[test_case(0x00FF ; "near return")]
    #[test_case(0x8128 ; "alu 8")]
    #[test_case(0x812F ; "alu f")]
    #[test_case(0xE19F ; "near key skip")]
    #[test_case(0xE1A2 ; "near key skip not")]
    #[test_case(0xF100 ; "f group 00")]
    #[test_case(0xF1FF ; "f group ff")]
    fn unknown_words_decode_to_sys(word: u16) {
        assert_eq!(Instruction::Sys(Addr(word & 0x0FFF)), Instruction::from_u16(word));
    }

    proptest! {
        #[test]
        fn decoding_never_panics(word in any::<u16>()) {
            Instruction::from_u16(word);
        }

        #[test]
        fn load_immediate_keeps_operands(x in 0u8..16, kk in any::<u8>()) {
            let word = 0x6000 | (x as u16) << 8 | kk as u16;
            prop_assert_eq!(Instruction::SetRegToConst(Reg(x), Const(kk)), Instruction::from_u16(word));
        }
    }
}
