//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description,
//! with the SCHIP and XO-CHIP display extensions.

use crate::emulator::error::Result;
use crate::emulator::framebuffer::{Direction, Framebuffer, HIRES, LORES};
use crate::emulator::instruction::*;
use crate::emulator::key_latch::KeyLatch;
use crate::emulator::memory::*;
use crate::emulator::quirks::Quirks;
use crate::emulator::render::Packing;

const NUM_REGISTERS: usize = 16;
const NUM_FLAGS: usize = 8;

/// Program counters are kept even and inside memory.
const PC_MASK: u16 = 0x0FFE;

/// What the caller should do after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The program asked to stop with this exit code.
    Exit(i32),
}

/// All interpreter state: memory, registers, timers, display memory and keys.
pub struct Emulator {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    flags: [u8; NUM_FLAGS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack: Stack,
    quirks: Quirks,
    framebuffer: Framebuffer,
    keys: KeyLatch,
    terminal: Option<(u16, u16)>,
}

impl Emulator {

    /// Create a new emulator with fonts loaded and no program.
    pub fn new(quirks: Quirks) -> Emulator {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            flags: [0; NUM_FLAGS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack: Stack::new(),
            quirks,
            framebuffer: Framebuffer::new(),
            keys: KeyLatch::new(),
            terminal: None,
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(program)
    }

    /// Tell the emulator how large the terminal is, so that switching
    /// resolution can be refused when the new one would not fit.
    /// Without a terminal any resolution is accepted.
    pub fn set_terminal_size(&mut self, terminal: Option<(u16, u16)>) {
        self.terminal = terminal;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keys_mut(&mut self) -> &mut KeyLatch {
        &mut self.keys
    }

    pub fn register(&self, x: u8) -> u8 {
        self.registers[(x & 0xF) as usize]
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Load the instruction at the program counter, move past it and execute it.
    pub fn step(&mut self) -> Result<Flow> {
        // Each opcode is two bytes
        let left = self.memory.read(self.program_counter);
        let right = self.memory.read(self.program_counter + 1);
        let instruction = Instruction::from_two_u8(left, right);

        log::trace!("{:#05x}: {:?}", self.program_counter, instruction);

        self.program_counter = (self.program_counter + 2) & PC_MASK;

        self.execute_single(instruction)
    }

    fn reg(&self, Reg(x): Reg) -> u8 {
        self.registers[x as usize]
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = (self.program_counter + 2) & PC_MASK;
        }
    }

    /// Store a result and its flag. VF is written last, so it wins when X is F.
    fn set_with_flag(&mut self, Reg(x): Reg, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[0xF] = flag as u8;
    }

    fn switch_resolution(&mut self, hires: bool) -> Result<()> {
        let resolution = if hires { HIRES } else { LORES };
        if let Some(terminal) = self.terminal {
            let current = (self.framebuffer.width(), self.framebuffer.height());
            Packing::check_switch(terminal, current, resolution)?;
        }
        log::debug!("switching to {}x{}", resolution.0, resolution.1);
        if hires {
            self.framebuffer.hires();
        } else {
            self.framebuffer.lores();
        }
        Ok(())
    }

    /// The sprite DXYN points at. N = 0 means a big sprite, whose shape depends on mode and quirks.
    fn sprite(&self, n: u8) -> Vec<u8> {
        let len = match n {
            0 if self.framebuffer.is_hires() || self.quirks.wide_sprites => 32,
            0 if self.quirks.tall_sprites => 16,
            n => n as usize,
        };
        self.memory.read_range(self.i, len)
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<Flow> {
        match instruction {

            // Clear the active planes
            Instruction::ClearScreen => self.framebuffer.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => match self.stack.pop() {
                Some(addr) => self.program_counter = addr,
                None => log::warn!("return with an empty stack at {:#05x}, ignoring", self.program_counter),
            },

            Instruction::ScrollDown(Const(n)) => self.framebuffer.scroll(Direction::Down, n as usize),
            Instruction::ScrollUp(Const(n)) => self.framebuffer.scroll(Direction::Up, n as usize),
            Instruction::ScrollRight => self.framebuffer.scroll(Direction::Right, 4),
            Instruction::ScrollLeft => self.framebuffer.scroll(Direction::Left, 4),

            Instruction::ToggleLoadStoreQuirk => {
                self.quirks.load_store = !self.quirks.load_store;
                log::debug!("load/store quirk is now {}", self.quirks.load_store);
            }

            Instruction::Exit => {
                log::info!("program exited at {:#05x}", self.program_counter.wrapping_sub(2) & PC_MASK);
                return Ok(Flow::Exit(0));
            }

            Instruction::LowRes => self.switch_resolution(false)?,
            Instruction::HighRes => self.switch_resolution(true)?,

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr & PC_MASK;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack.push(self.program_counter) {
                    self.program_counter = addr & PC_MASK;
                } else {
                    log::warn!("stack overflow calling {:#05x}, ignoring", addr);
                }
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(x, Const(n)) => self.skip_if(self.reg(x) == n),
            Instruction::IfRegNeqConst(x, Const(n)) => self.skip_if(self.reg(x) != n),
            Instruction::IfRegEqReg(x, y) => self.skip_if(self.reg(x) == self.reg(y)),
            Instruction::IfRegNeqReg(x, y) => self.skip_if(self.reg(x) != self.reg(y)),

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // Never touches VF
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
            }

            // VF is 1 on carry
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_with_flag(x, sum, carry);
            }

            // VF is 0 on borrow
            Instruction::DecRegByReg(x, y) => {
                let (a, b) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, a.wrapping_sub(b), a >= b);
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (a, b) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, b.wrapping_sub(a), b >= a);
            }

            // VF gets the bit shifted out
            Instruction::BitshiftRight(x, y) => {
                let value = if self.quirks.shift { self.reg(x) } else { self.reg(y) };
                self.set_with_flag(x, value >> 1, value & 1 == 1);
            }

            Instruction::BitshiftLeft(x, y) => {
                let value = if self.quirks.shift { self.reg(x) } else { self.reg(y) };
                self.set_with_flag(x, value << 1, value & 0x80 != 0);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::JumpWithOffset(x, Addr(addr)) => {
                let offset = if self.quirks.jump { self.reg(x) } else { self.registers[0] };
                self.program_counter = (addr + offset as u16) & PC_MASK;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = rand::random::<u8>() & n;
            }

            // VF is 1 if any lit pixel was turned off
            Instruction::Draw(x, y, Const(n)) => {
                let sprite = self.sprite(n);
                let (x_coord, y_coord) = (self.reg(x), self.reg(y));
                let collision = self.framebuffer.draw(x_coord, y_coord, &sprite, self.quirks.wide_sprites);
                self.registers[0xF] = collision as u8;
            }

            Instruction::IfKeyEqVx(x) => self.skip_if(self.keys.is_down(self.reg(x))),
            Instruction::IfKeyNeqVx(x) => self.skip_if(!self.keys.is_down(self.reg(x))),

            // Bit k of the constant selects plane k
            Instruction::SelectPlanes(Const(mask)) => {
                let planes: Vec<usize> = (0..4).filter(|bit| mask & (1 << bit) != 0).collect();
                self.framebuffer.set_active_planes(&planes);
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Wait for a key press by running this instruction again until one is down
            Instruction::SetRegToGetKey(Reg(x)) => match self.keys.first_down() {
                Some(key) => self.registers[x as usize] = key,
                None => self.program_counter = self.program_counter.wrapping_sub(2) & PC_MASK,
            },

            Instruction::SetDelayTimerToReg(x) => self.delay_timer = self.reg(x),
            Instruction::SetSoundTimerToReg(x) => self.sound_timer = self.reg(x),

            Instruction::AddRegToI(x) => {
                self.i = (self.i + self.reg(x) as u16) & ADDR_MASK;
            }

            Instruction::SetIToSpriteAddrVx(x) => {
                self.i = (SMALL_FONT_ADDR + SMALL_FONT_HEIGHT * self.reg(x) as u16) & ADDR_MASK;
            }

            Instruction::SetIToBigSpriteAddrVx(x) => {
                self.i = (BIG_FONT_ADDR + BIG_FONT_HEIGHT * self.reg(x) as u16) & ADDR_MASK;
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.reg(x);
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i + 1, value / 10 % 10);
                self.memory.write(self.i + 2, value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x as u16 {
                    self.memory.write(self.i + reg_no, self.registers[reg_no as usize]);
                }
                if self.quirks.load_store {
                    self.i = (self.i + x as u16 + 1) & ADDR_MASK;
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x as u16 {
                    self.registers[reg_no as usize] = self.memory.read(self.i + reg_no);
                }
                if self.quirks.load_store {
                    self.i = (self.i + x as u16 + 1) & ADDR_MASK;
                }
            }

            Instruction::FlagsDump(Reg(x)) => {
                let count = (x as usize).min(NUM_FLAGS - 1) + 1;
                self.flags[..count].copy_from_slice(&self.registers[..count]);
            }

            Instruction::FlagsLoad(Reg(x)) => {
                let count = (x as usize).min(NUM_FLAGS - 1) + 1;
                self.registers[..count].copy_from_slice(&self.flags[..count]);
            }

            Instruction::Unknown(opcode) => {
                log::debug!("ignoring unknown opcode {:#06x}", opcode);
            }
        };

        Ok(Flow::Continue)
    }
}
