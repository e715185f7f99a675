use std::collections::HashMap;
use std::io;

/// Represents a grid of character cells that can be written to.
pub trait EmulatorOutput {
    /// Columns and rows available.
    fn size(&self) -> io::Result<(u16, u16)>;
    /// Write `text` starting at the given cell.
    fn put(&mut self, col: u16, row: u16, text: &str) -> io::Result<()>;
    /// Blank every cell.
    fn wipe(&mut self) -> io::Result<()>;
    /// Make pending writes visible.
    fn refresh(&mut self) -> io::Result<()>;
}

/// A simple output device that keeps track of written cells.
pub struct DummyOutput {
    size: (u16, u16),
    screen: HashMap<(u16, u16), String>,
    writes: usize,
}

impl DummyOutput {
    /// A terminal big enough for any resolution.
    pub fn new() -> DummyOutput {
        DummyOutput::with_size(256, 128)
    }

    pub fn with_size(cols: u16, rows: u16) -> DummyOutput {
        DummyOutput {
            size: (cols, rows),
            screen: HashMap::new(),
            writes: 0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.size = (cols, rows);
    }

    /// The text last written at a cell, if it hasn't been wiped since.
    pub fn get(&self, col: u16, row: u16) -> Option<&str> {
        self.screen.get(&(col, row)).map(String::as_str)
    }

    /// How many times `put` has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }
    fn put(&mut self, col: u16, row: u16, text: &str) -> io::Result<()> {
        self.writes += 1;
        self.screen.insert((col, row), text.to_string());
        Ok(())
    }
    fn wipe(&mut self) -> io::Result<()> {
        self.screen.clear();
        Ok(())
    }
    fn refresh(&mut self) -> io::Result<()> {
        Ok(())
    }
}
