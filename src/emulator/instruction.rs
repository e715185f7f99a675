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

/// A single instruction from the CHIP-8 instruction set,
/// including the SCHIP and XO-CHIP display extensions.
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
    ClearScreen, // 00E0
    Return, // 00EE
    ScrollDown(Const), // 00CN
    ScrollUp(Const), // 00DN
    ScrollRight, // 00FB
    ScrollLeft, // 00FC
    ToggleLoadStoreQuirk, // 00FA
    Exit, // 00FD
    LowRes, // 00FE
    HighRes, // 00FF
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
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    JumpWithOffset(Reg, Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SelectPlanes(Const), // FN01
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBigSpriteAddrVx(Reg), // FX30
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    FlagsDump(Reg), // FX75
    FlagsLoad(Reg), // FX85
    Unknown(u16),
}

impl Instruction {

    fn split_u16(value: u16) -> (u8, u8) {
        let left = (value & 0xFF00) >> 8;
        let right = value & 0x00FF;
        (left as u8, right as u8)
    }

    pub fn from_u16(value: u16) -> Instruction {
        let (left, right) = Self::split_u16(value);
        Instruction::from_two_u8(left, right)
    }

    /// Decode an opcode. Words that match nothing decode to `Unknown`.
    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        let opcode = BitSplitter::new(left, right);
        match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (0, 0, 0xC, n) => Instruction::ScrollDown(Const(n)),
            (0, 0, 0xD, n) => Instruction::ScrollUp(Const(n)),
            (0, 0, 0xF, 0xA) => Instruction::ToggleLoadStoreQuirk,
            (0, 0, 0xF, 0xB) => Instruction::ScrollRight,
            (0, 0, 0xF, 0xC) => Instruction::ScrollLeft,
            (0, 0, 0xF, 0xD) => Instruction::Exit,
            (0, 0, 0xF, 0xE) => Instruction::LowRes,
            (0, 0, 0xF, 0xF) => Instruction::HighRes,
            (1, _, _, _) => Instruction::Goto(Addr(opcode.last_12_bits())),
            (2, _, _, _) => Instruction::Call(Addr(opcode.last_12_bits())),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), Const(opcode.last_8_bits())),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), Const(opcode.last_8_bits())),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), Const(opcode.last_8_bits())),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), Const(opcode.last_8_bits())),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, y, 6) => Instruction::BitshiftRight(Reg(x), Reg(y)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, y, 0xE) => Instruction::BitshiftLeft(Reg(x), Reg(y)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(Addr(opcode.last_12_bits())),
            (0xB, x, _, _) => Instruction::JumpWithOffset(Reg(x), Addr(opcode.last_12_bits())),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), Const(opcode.last_8_bits())),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, n, 0, 1) => Instruction::SelectPlanes(Const(n)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 0) => Instruction::SetIToBigSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            (0xF, x, 7, 5) => Instruction::FlagsDump(Reg(x)),
            (0xF, x, 8, 5) => Instruction::FlagsLoad(Reg(x)),
            _ => Instruction::Unknown(opcode.as_u16()),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Instruction::ClearScreen ; "clear screen")]
    #[test_case(0x00EE => Instruction::Return ; "return")]
    #[test_case(0x00C4 => Instruction::ScrollDown(Const(4)) ; "scroll down")]
    #[test_case(0x00D2 => Instruction::ScrollUp(Const(2)) ; "scroll up")]
    #[test_case(0x00FA => Instruction::ToggleLoadStoreQuirk ; "toggle quirk")]
    #[test_case(0x00FB => Instruction::ScrollRight ; "scroll right")]
    #[test_case(0x00FC => Instruction::ScrollLeft ; "scroll left")]
    #[test_case(0x00FD => Instruction::Exit ; "exit")]
    #[test_case(0x00FE => Instruction::LowRes ; "lores")]
    #[test_case(0x00FF => Instruction::HighRes ; "hires")]
    #[test_case(0x1025 => Instruction::Goto(Addr(0x25)) ; "goto")]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)) ; "call")]
    #[test_case(0x3A08 => Instruction::IfRegEqConst(Reg(0xA), Const(8)) ; "if reg eq const")]
    #[test_case(0x4A08 => Instruction::IfRegNeqConst(Reg(0xA), Const(8)) ; "if reg neq const")]
    #[test_case(0x5AB0 => Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)) ; "if reg eq reg")]
    #[test_case(0x6B23 => Instruction::SetRegToConst(Reg(0xB), Const(0x23)) ; "set reg to const")]
    #[test_case(0x7CA1 => Instruction::IncRegByConst(Reg(0xC), Const(0xA1)) ; "inc reg by const")]
    #[test_case(0x8AB0 => Instruction::SetRegToReg(Reg(0xA), Reg(0xB)) ; "set reg to reg")]
    #[test_case(0x8DE1 => Instruction::BitwiseOr(Reg(0xD), Reg(0xE)) ; "or")]
    #[test_case(0x8DE2 => Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)) ; "and")]
    #[test_case(0x8DE3 => Instruction::BitwiseXor(Reg(0xD), Reg(0xE)) ; "xor")]
    #[test_case(0x8AB4 => Instruction::IncRegByReg(Reg(0xA), Reg(0xB)) ; "add")]
    #[test_case(0x8AB5 => Instruction::DecRegByReg(Reg(0xA), Reg(0xB)) ; "sub")]
    #[test_case(0x8AB6 => Instruction::BitshiftRight(Reg(0xA), Reg(0xB)) ; "shift right")]
    #[test_case(0x8AB7 => Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)) ; "reverse sub")]
    #[test_case(0x8A0E => Instruction::BitshiftLeft(Reg(0xA), Reg(0)) ; "shift left")]
    #[test_case(0x9AB0 => Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)) ; "if reg neq reg")]
    #[test_case(0xA025 => Instruction::SetI(Addr(0x25)) ; "set i")]
    #[test_case(0xB325 => Instruction::JumpWithOffset(Reg(3), Addr(0x325)) ; "jump with offset")]
    #[test_case(0xCA23 => Instruction::SetVxRand(Reg(0xA), Const(0x23)) ; "rand")]
    #[test_case(0xDABC => Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)) ; "draw")]
    #[test_case(0xEA9E => Instruction::IfKeyEqVx(Reg(0xA)) ; "if key")]
    #[test_case(0xEAA1 => Instruction::IfKeyNeqVx(Reg(0xA)) ; "if not key")]
    #[test_case(0xF301 => Instruction::SelectPlanes(Const(3)) ; "select planes")]
    #[test_case(0xFA07 => Instruction::SetRegToDelayTimer(Reg(0xA)) ; "get delay")]
    #[test_case(0xFA0A => Instruction::SetRegToGetKey(Reg(0xA)) ; "wait for key")]
    #[test_case(0xFA15 => Instruction::SetDelayTimerToReg(Reg(0xA)) ; "set delay")]
    #[test_case(0xFA18 => Instruction::SetSoundTimerToReg(Reg(0xA)) ; "set sound")]
    #[test_case(0xFA1E => Instruction::AddRegToI(Reg(0xA)) ; "add to i")]
    #[test_case(0xFA29 => Instruction::SetIToSpriteAddrVx(Reg(0xA)) ; "small font")]
    #[test_case(0xFA30 => Instruction::SetIToBigSpriteAddrVx(Reg(0xA)) ; "big font")]
    #[test_case(0xFA33 => Instruction::SetIToBcdOfReg(Reg(0xA)) ; "bcd")]
    #[test_case(0xFA55 => Instruction::RegDump(Reg(0xA)) ; "store")]
    #[test_case(0xFA65 => Instruction::RegLoad(Reg(0xA)) ; "load")]
    #[test_case(0xF775 => Instruction::FlagsDump(Reg(7)) ; "store flags")]
    #[test_case(0xF785 => Instruction::FlagsLoad(Reg(7)) ; "load flags")]
    fn opcodes_are_parsed_correctly(opcode: u16) -> Instruction {
        Instruction::from_u16(opcode)
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x0123 ; "machine code call")]
    #[test_case(0x01E0 ; "clear with nonzero x")]
    #[test_case(0x5AB1 ; "skip with nonzero n")]
    #[test_case(0x8AB8 ; "unused arithmetic")]
    #[test_case(0xE09F ; "unused key op")]
    #[test_case(0xFA99 ; "unused misc op")]
    fn unmapped_opcodes_are_unknown(opcode: u16) {
        assert_eq!(Instruction::Unknown(opcode), Instruction::from_u16(opcode));
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }

    #[test]
    fn split_u16_test() {
        assert_eq!((0x12, 0x34), Instruction::split_u16(0x1234));
        assert_eq!((0xFF, 0xFF), Instruction::split_u16(0xFFFF));
        assert_eq!((0x00, 0x00), Instruction::split_u16(0x0000));
        assert_eq!((0xF0, 0xF0), Instruction::split_u16(0xF0F0));
    }
}
