//! Runs the emulator one frame at a time:
//! poll input, execute a batch of instructions, tick the timers and render.

use std::time::{Duration, Instant};

use crate::emulator::emulator::{Emulator, Flow};
use crate::emulator::error::Result;
use crate::emulator::input::{EmulatorInput, InputEvent};
use crate::emulator::output::EmulatorOutput;
use crate::emulator::quirks::Quirks;
use crate::emulator::render::Compositor;

pub const DEFAULT_BATCH: usize = 15;
pub const DEFAULT_TICK: Duration = Duration::from_micros(1_000_000 / 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per timer tick.
    pub batch: usize,
    /// Time between timer ticks when running in real time.
    pub tick: Duration,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch: DEFAULT_BATCH,
            tick: DEFAULT_TICK,
            quirks: Quirks::default(),
        }
    }
}

pub struct Driver<I: EmulatorInput, O: EmulatorOutput> {
    config: Config,
    emulator: Emulator,
    input: I,
    compositor: Compositor<O>,
}

impl<I: EmulatorInput, O: EmulatorOutput> Driver<I, O> {

    /// Load the program and make sure the terminal is large enough,
    /// before anything is drawn.
    pub fn new(config: Config, input: I, output: O, program: &[u8]) -> Result<Driver<I, O>> {
        let mut emulator = Emulator::new(config.quirks);
        emulator.load(program)?;
        let fb = emulator.framebuffer();
        let compositor = Compositor::new(output, (fb.width(), fb.height()))?;
        emulator.set_terminal_size(Some(compositor.terminal()));
        Ok(Driver {
            config,
            emulator,
            input,
            compositor,
        })
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn compositor(&self) -> &Compositor<O> {
        &self.compositor
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    fn poll(&mut self) -> Result<Option<Flow>> {
        self.emulator.keys_mut().begin_poll();
        for event in self.input.poll()? {
            match event {
                InputEvent::Key(key) => {
                    log::trace!("key {:#x} down", key);
                    self.emulator.keys_mut().press(key);
                }
                InputEvent::Resize(cols, rows) => {
                    log::debug!("terminal resized to {}x{}", cols, rows);
                    self.emulator.set_terminal_size(Some((cols, rows)));
                    self.compositor.resize(cols, rows)?;
                }
                InputEvent::Quit => {
                    log::info!("quit requested");
                    return Ok(Some(Flow::Exit(0)));
                }
            }
        }
        Ok(None)
    }

    /// Run a single frame.
    pub fn frame(&mut self) -> Result<Flow> {
        if let Some(flow) = self.poll()? {
            return Ok(flow);
        }

        for _ in 0..self.config.batch {
            if let Flow::Exit(code) = self.emulator.step()? {
                self.compositor.render(self.emulator.framebuffer())?;
                return Ok(Flow::Exit(code));
            }
        }

        self.emulator.tick_timers();
        self.compositor.render(self.emulator.framebuffer())?;
        Ok(Flow::Continue)
    }

    /// Run frames, one per tick, until the program exits. Returns the exit code.
    pub fn run(&mut self) -> Result<i32> {
        let mut next = Instant::now();
        loop {
            if let Flow::Exit(code) = self.frame()? {
                return Ok(code);
            }
            next += self.config.tick;
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            } else {
                next = now;
            }
        }
    }
}
