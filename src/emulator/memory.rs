//! The 4 KiB address space and the call stack.

use crate::emulator::error::{Error, Result};

pub const MEM_SIZE: usize = 4096;
pub const PC_START: u16 = 0x200;
pub const STACK_SIZE: usize = 16;

/// Every address is masked to 12 bits instead of being bounds checked.
pub const ADDR_MASK: u16 = 0x0FFF;

pub const SMALL_FONT_ADDR: u16 = 0x000;
pub const SMALL_FONT_HEIGHT: u16 = 5;
pub const BIG_FONT_ADDR: u16 = 0x050;
pub const BIG_FONT_HEIGHT: u16 = 10;

const SMALL_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

const BIG_FONT: [u8; 160] = [
    0xFF, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, // 0
    0x18, 0x78, 0x78, 0x18, 0x18, 0x18, 0x18, 0x18, 0xFF, 0xFF, // 1
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, // 2
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 3
    0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0x03, 0x03, // 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 5
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // 6
    0xFF, 0xFF, 0x03, 0x03, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, // 7
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // 8
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // 9
    0x7E, 0xFF, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xC3, // A
    0xFC, 0xFC, 0xC3, 0xC3, 0xFC, 0xFC, 0xC3, 0xC3, 0xFC, 0xFC, // B
    0x3C, 0xFF, 0xC3, 0xC0, 0xC0, 0xC0, 0xC0, 0xC3, 0xFF, 0x3C, // C
    0xFC, 0xFE, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFE, 0xFC, // D
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, // E
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC0, 0xC0, 0xC0, 0xC0, // F
];

/// Byte addressable memory with both fonts preloaded.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        let small = SMALL_FONT_ADDR as usize;
        bytes[small..small + SMALL_FONT.len()].copy_from_slice(&SMALL_FONT);
        let big = BIG_FONT_ADDR as usize;
        bytes[big..big + BIG_FONT.len()].copy_from_slice(&BIG_FONT);
        Memory { bytes }
    }

    /// Copy a program into memory at 0x200.
    /// Nothing is written if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let start = PC_START as usize;
        let max = MEM_SIZE - start;
        if program.len() > max {
            return Err(Error::RomTooLarge { size: program.len(), max });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = value;
    }

    /// Read `len` consecutive bytes starting at `addr`, wrapping at the end of memory.
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len as u16).map(|offset| self.read(addr.wrapping_add(offset))).collect()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// A bounded stack of return addresses.
pub struct Stack {
    slots: [u16; STACK_SIZE],
    pointer: usize,
}

impl Stack {
    pub fn new() -> Stack {
        Stack {
            slots: [0; STACK_SIZE],
            pointer: 0,
        }
    }

    /// Returns false, leaving the stack untouched, if it is already full.
    pub fn push(&mut self, addr: u16) -> bool {
        if self.pointer == STACK_SIZE {
            return false;
        }
        self.slots[self.pointer] = addr;
        self.pointer += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.pointer == 0 {
            return None;
        }
        self.pointer -= 1;
        Some(self.slots[self.pointer])
    }

    pub fn len(&self) -> usize {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.pointer == 0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
