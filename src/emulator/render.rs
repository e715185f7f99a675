//! Turning planes of pixels into terminal cells.
//!
//! A terminal cell is roughly twice as tall as it is wide. When the terminal is
//! large enough, every pixel becomes two side by side cells (`Packing::Wide`).
//! Otherwise two pixel rows share one character row by using half block
//! glyphs (`Packing::HalfBlock`).

use crate::emulator::error::{Error, Result};
use crate::emulator::framebuffer::Framebuffer;
use crate::emulator::output::EmulatorOutput;

/// What one terminal cell shows. In half block packing bit 0 is the upper
/// pixel and bit 1 the lower pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    Upper,
    Lower,
    Full,
}

impl Glyph {
    fn bits(self) -> u8 {
        match self {
            Glyph::Blank => 0b00,
            Glyph::Upper => 0b01,
            Glyph::Lower => 0b10,
            Glyph::Full => 0b11,
        }
    }

    fn from_bits(bits: u8) -> Glyph {
        match bits & 0b11 {
            0b00 => Glyph::Blank,
            0b01 => Glyph::Upper,
            0b10 => Glyph::Lower,
            _ => Glyph::Full,
        }
    }

    /// Light one half of the cell, keeping whatever the other half shows.
    pub fn with_half(self, lower: bool) -> Glyph {
        Glyph::from_bits(self.bits() | if lower { 0b10 } else { 0b01 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// One pixel is two cells wide and one row tall.
    Wide,
    /// One pixel is one cell wide and half a row tall.
    HalfBlock,
}

impl Packing {
    /// Whether the terminal holds this resolution in this packing.
    pub fn fits(self, terminal: (u16, u16), resolution: (usize, usize)) -> bool {
        let (cols, rows) = self.grid_size(resolution);
        terminal.0 as usize >= cols * self.cell_width() as usize && terminal.1 as usize >= rows
    }

    /// The roomiest packing the terminal can hold for this resolution.
    pub fn select(terminal: (u16, u16), resolution: (usize, usize)) -> Option<Packing> {
        [Packing::Wide, Packing::HalfBlock]
            .iter()
            .copied()
            .find(|packing| packing.fits(terminal, resolution))
    }

    /// The packing drawn with, which is half block when nothing fits and the display is cut off.
    pub fn in_use(terminal: (u16, u16), resolution: (usize, usize)) -> Packing {
        Packing::select(terminal, resolution).unwrap_or(Packing::HalfBlock)
    }

    /// Fail with a configuration error unless the terminal can show this resolution.
    pub fn check(terminal: (u16, u16), resolution: (usize, usize)) -> Result<Packing> {
        Packing::select(terminal, resolution).ok_or_else(|| too_small(terminal, resolution))
    }

    /// Fail with a configuration error unless the packing used for `from` also holds `to`.
    /// A wide terminal needs a full row per pixel row for the new resolution.
    pub fn check_switch(
        terminal: (u16, u16),
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<Packing> {
        let packing = Packing::in_use(terminal, from);
        if packing.fits(terminal, to) {
            Ok(packing)
        } else {
            Err(too_small(terminal, to))
        }
    }

    /// Number of glyphs across and down.
    pub fn grid_size(self, resolution: (usize, usize)) -> (usize, usize) {
        match self {
            Packing::Wide => resolution,
            Packing::HalfBlock => (resolution.0, (resolution.1 + 1) / 2),
        }
    }

    fn cell_width(self) -> u16 {
        match self {
            Packing::Wide => 2,
            Packing::HalfBlock => 1,
        }
    }

    pub fn text(self, glyph: Glyph) -> &'static str {
        match (self, glyph) {
            (Packing::Wide, Glyph::Blank) => "  ",
            (Packing::Wide, _) => "██",
            (Packing::HalfBlock, Glyph::Blank) => " ",
            (Packing::HalfBlock, Glyph::Upper) => "▀",
            (Packing::HalfBlock, Glyph::Lower) => "▄",
            (Packing::HalfBlock, Glyph::Full) => "█",
        }
    }

    /// Build the glyph grid for every plane of the framebuffer, lit where any plane is lit.
    pub fn compose(self, fb: &Framebuffer) -> Vec<Vec<Glyph>> {
        let (width, height) = (fb.width(), fb.height());
        let (cols, rows) = self.grid_size((width, height));
        let mut grid = vec![vec![Glyph::Blank; cols]; rows];
        for y in 0..height {
            for x in 0..width {
                if !fb.composite(x, y) {
                    continue;
                }
                match self {
                    Packing::Wide => grid[y][x] = Glyph::Full,
                    Packing::HalfBlock => {
                        let cell = &mut grid[y / 2][x];
                        *cell = cell.with_half(y % 2 == 1);
                    }
                }
            }
        }
        grid
    }
}

fn too_small(terminal: (u16, u16), resolution: (usize, usize)) -> Error {
    Error::TerminalTooSmall {
        cols: terminal.0,
        rows: terminal.1,
        width: resolution.0,
        height: resolution.1,
    }
}

/// Draws framebuffers onto an output, only writing the cells that changed.
pub struct Compositor<O: EmulatorOutput> {
    output: O,
    terminal: (u16, u16),
    resolution: (usize, usize),
    packing: Packing,
    shown: Vec<Vec<Glyph>>,
}

impl<O: EmulatorOutput> Compositor<O> {

    /// Fails if the output is too small for the resolution.
    pub fn new(mut output: O, resolution: (usize, usize)) -> Result<Compositor<O>> {
        let terminal = output.size()?;
        let packing = Packing::check(terminal, resolution)?;
        log::info!("terminal is {}x{}, using {:?} packing", terminal.0, terminal.1, packing);
        output.wipe()?;
        let (cols, rows) = packing.grid_size(resolution);
        Ok(Compositor {
            output,
            terminal,
            resolution,
            packing,
            shown: vec![vec![Glyph::Blank; cols]; rows],
        })
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn packing(&self) -> Packing {
        self.packing
    }

    pub fn terminal(&self) -> (u16, u16) {
        self.terminal
    }

    /// The terminal changed size; pick a packing again and redraw everything on the next render.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.terminal = (cols, rows);
        self.repack()
    }

    fn repack(&mut self) -> Result<()> {
        if Packing::select(self.terminal, self.resolution).is_none() {
            log::warn!(
                "terminal is {}x{}, too small for {}x{}, the display will be cut off",
                self.terminal.0, self.terminal.1, self.resolution.0, self.resolution.1
            );
        }
        self.packing = Packing::in_use(self.terminal, self.resolution);
        log::debug!("using {:?} packing", self.packing);
        self.output.wipe()?;
        let (cols, rows) = self.packing.grid_size(self.resolution);
        self.shown = vec![vec![Glyph::Blank; cols]; rows];
        Ok(())
    }

    pub fn render(&mut self, fb: &Framebuffer) -> Result<()> {
        let resolution = (fb.width(), fb.height());
        if resolution != self.resolution {
            self.resolution = resolution;
            self.repack()?;
        }

        let frame = self.packing.compose(fb);
        let blank = frame.iter().flatten().all(|&glyph| glyph == Glyph::Blank);
        if blank {
            if frame != self.shown {
                self.output.wipe()?;
            }
        } else {
            let cell_width = self.packing.cell_width();
            for (row, glyphs) in frame.iter().enumerate() {
                for (col, &glyph) in glyphs.iter().enumerate() {
                    if self.shown[row][col] == glyph {
                        continue;
                    }
                    let (col, row) = (col as u16 * cell_width, row as u16);
                    if col + cell_width > self.terminal.0 || row >= self.terminal.1 {
                        continue;
                    }
                    self.output.put(col, row, self.packing.text(glyph))?;
                }
            }
        }

        self.shown = frame;
        self.output.refresh()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::framebuffer::{HIRES, LORES};
    use crate::emulator::output::DummyOutput;
    use test_case::test_case;

    #[test_case((128, 32), LORES => Some(Packing::Wide) ; "lores wide")]
    #[test_case((127, 32), LORES => Some(Packing::HalfBlock) ; "lores narrow")]
    #[test_case((128, 31), LORES => Some(Packing::HalfBlock) ; "lores short")]
    #[test_case((64, 16), LORES => Some(Packing::HalfBlock) ; "lores minimum")]
    #[test_case((63, 16), LORES => None ; "lores too narrow")]
    #[test_case((64, 15), LORES => None ; "lores too short")]
    #[test_case((256, 64), HIRES => Some(Packing::Wide) ; "hires wide")]
    #[test_case((128, 32), HIRES => Some(Packing::HalfBlock) ; "hires minimum")]
    #[test_case((80, 60), HIRES => None ; "hires too narrow")]
    fn packing_depends_on_terminal_size(terminal: (u16, u16), resolution: (usize, usize)) -> Option<Packing> {
        Packing::select(terminal, resolution)
    }

    #[test_case((256, 64), LORES, HIRES => Ok(Packing::Wide) ; "wide to wide")]
    #[test_case((128, 60), LORES, HIRES => Err((128, 64)) ; "wide needs full rows")]
    #[test_case((256, 60), LORES, HIRES => Err((128, 64)) ; "wide and short")]
    #[test_case((128, 32), LORES, HIRES => Err((128, 64)) ; "wide minimum for lores")]
    #[test_case((100, 40), LORES, HIRES => Err((128, 64)) ; "half block too narrow")]
    #[test_case((128, 32), HIRES, LORES => Ok(Packing::HalfBlock) ; "back to lores keeps half block")]
    #[test_case((256, 64), HIRES, LORES => Ok(Packing::Wide) ; "back to lores keeps wide")]
    fn switching_keeps_the_packing_in_use(
        terminal: (u16, u16),
        from: (usize, usize),
        to: (usize, usize),
    ) -> std::result::Result<Packing, (usize, usize)> {
        Packing::check_switch(terminal, from, to).map_err(|e| match e {
            Error::TerminalTooSmall { width, height, .. } => (width, height),
            e => panic!("unexpected error {}", e),
        })
    }

    #[test]
    fn glyph_halves_combine() {
        assert_eq!(Glyph::Blank.with_half(false), Glyph::Upper);
        assert_eq!(Glyph::Blank.with_half(true), Glyph::Lower);
        assert_eq!(Glyph::Upper.with_half(true), Glyph::Full);
        assert_eq!(Glyph::Lower.with_half(false), Glyph::Full);
        assert_eq!(Glyph::Upper.with_half(false), Glyph::Upper);
    }

    #[test]
    fn too_small_terminal_is_a_configuration_error() {
        let result = Compositor::new(DummyOutput::with_size(40, 20), LORES);
        assert!(matches!(
            result,
            Err(Error::TerminalTooSmall { cols: 40, rows: 20, width: 64, height: 32 })
        ));
    }

    #[test]
    fn wide_packing_paints_two_cells_per_pixel() {
        let mut fb = Framebuffer::new();
        fb.draw(3, 5, &[0x80], false);
        let mut compositor = Compositor::new(DummyOutput::with_size(128, 32), LORES).unwrap();
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.packing(), Packing::Wide);
        assert_eq!(compositor.output().get(6, 5), Some("██"));
        assert_eq!(compositor.output().get(0, 0), None);
    }

    #[test]
    fn half_block_packing_shares_rows() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0xE0, 0xA0, 0x00, 0x40], false);
        let mut compositor = Compositor::new(DummyOutput::with_size(64, 16), LORES).unwrap();
        compositor.render(&fb).unwrap();
        let output = compositor.output();
        assert_eq!(output.get(0, 0), Some("█"));
        assert_eq!(output.get(1, 0), Some("▀"));
        assert_eq!(output.get(2, 0), Some("█"));
        assert_eq!(output.get(1, 1), Some("▄"));
        assert_eq!(output.get(0, 1), None);
    }

    #[test]
    fn unchanged_cells_are_not_rewritten() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0xFF], false);
        let mut compositor = Compositor::new(DummyOutput::new(), LORES).unwrap();
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().writes(), 8);
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().writes(), 8);
        fb.draw(0, 0, &[0x80], false);
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().writes(), 9);
        assert_eq!(compositor.output().get(0, 0), Some("  "));
    }

    #[test]
    fn clearing_every_plane_wipes_the_terminal() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0xFF], false);
        let mut compositor = Compositor::new(DummyOutput::new(), LORES).unwrap();
        compositor.render(&fb).unwrap();
        fb.clear();
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().get(0, 0), None);
        assert_eq!(compositor.output().writes(), 8);
    }

    #[test]
    fn inactive_planes_stay_visible_after_a_partial_clear() {
        let mut fb = Framebuffer::new();
        fb.set_active_planes(&[0, 1]);
        fb.draw(0, 0, &[0x80, 0x40], false);
        let mut compositor = Compositor::new(DummyOutput::new(), LORES).unwrap();
        compositor.render(&fb).unwrap();

        fb.set_active_planes(&[0]);
        fb.clear();
        compositor.render(&fb).unwrap();
        let output = compositor.output();
        assert_eq!(output.get(0, 0), Some("  "));
        assert_eq!(output.get(2, 1), Some("██"));
    }

    #[test]
    fn resize_switches_packing_and_redraws() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0x80, 0x80], false);
        let mut compositor = Compositor::new(DummyOutput::new(), LORES).unwrap();
        compositor.render(&fb).unwrap();

        compositor.output_mut().resize(64, 16);
        compositor.resize(64, 16).unwrap();
        assert_eq!(compositor.packing(), Packing::HalfBlock);
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().get(0, 0), Some("█"));
        assert_eq!(compositor.output().get(0, 1), None);
    }

    #[test]
    fn resolution_switch_is_picked_up_on_render() {
        let mut fb = Framebuffer::new();
        let mut compositor = Compositor::new(DummyOutput::with_size(128, 32), LORES).unwrap();
        assert_eq!(compositor.packing(), Packing::Wide);
        fb.hires();
        fb.draw(127, 63, &[0x80], false);
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.packing(), Packing::HalfBlock);
        assert_eq!(compositor.output().get(127, 31), Some("▄"));
    }

    #[test]
    fn shrinking_below_minimum_clips_instead_of_failing() {
        let mut fb = Framebuffer::new();
        fb.draw(60, 0, &[0x80], false);
        fb.draw(0, 0, &[0x80], false);
        let mut compositor = Compositor::new(DummyOutput::new(), LORES).unwrap();
        compositor.resize(32, 8).unwrap();
        compositor.render(&fb).unwrap();
        assert_eq!(compositor.output().get(0, 0), Some("▀"));
        assert_eq!(compositor.output().get(60, 0), None);
    }
}
