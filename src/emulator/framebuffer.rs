//! Planes of monochrome pixels and the operations that draw on them.

use std::fmt;

pub const LORES: (usize, usize) = (64, 32);
pub const HIRES: (usize, usize) = (128, 64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A single grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Plane {
    pub fn new(width: usize, height: usize) -> Plane {
        Plane {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    /// Flip a pixel, returning whether it was lit before.
    fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y * self.width + x];
        let was_set = *pixel;
        *pixel = !was_set;
        was_set
    }

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
    }

    fn scroll(&mut self, direction: Direction, amount: usize) {
        let (width, height) = (self.width, self.height);
        let old = std::mem::replace(&mut self.pixels, vec![false; width * height]);
        for y in 0..height {
            for x in 0..width {
                let source = match direction {
                    Direction::Up => y.checked_add(amount).filter(|&sy| sy < height).map(|sy| (x, sy)),
                    Direction::Down => y.checked_sub(amount).map(|sy| (x, sy)),
                    Direction::Left => x.checked_add(amount).filter(|&sx| sx < width).map(|sx| (sx, y)),
                    Direction::Right => x.checked_sub(amount).map(|sx| (sx, y)),
                };
                if let Some((sx, sy)) = source {
                    self.pixels[y * width + x] = old[sy * width + sx];
                }
            }
        }
    }
}

/// The display memory: an ordered list of planes, of which some are active.
///
/// Clearing, drawing and scrolling only touch the active planes,
/// while every plane is visible.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    planes: Vec<Plane>,
    active: Vec<usize>,
    hires: bool,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        let (width, height) = LORES;
        Framebuffer {
            planes: vec![Plane::new(width, height)],
            active: vec![0],
            hires: false,
        }
    }

    pub fn width(&self) -> usize {
        if self.hires { HIRES.0 } else { LORES.0 }
    }

    pub fn height(&self) -> usize {
        if self.hires { HIRES.1 } else { LORES.1 }
    }

    pub fn is_hires(&self) -> bool {
        self.hires
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn active_planes(&self) -> &[usize] {
        &self.active
    }

    /// Whether any plane has the pixel lit.
    pub fn composite(&self, x: usize, y: usize) -> bool {
        self.planes.iter().any(|plane| plane.get(x, y))
    }

    /// Choose which planes are targeted from now on.
    /// Planes that don't exist yet are created blank.
    pub fn set_active_planes(&mut self, indices: &[usize]) {
        if let Some(&highest) = indices.iter().max() {
            let (width, height) = (self.width(), self.height());
            while self.planes.len() <= highest {
                self.planes.push(Plane::new(width, height));
            }
        }
        self.active = indices.to_vec();
    }

    pub fn clear(&mut self) {
        for &index in &self.active {
            self.planes[index].clear();
        }
    }

    /// XOR a sprite onto the active planes at (x, y), returning whether any lit pixel was flipped off.
    ///
    /// Rows are one byte wide, or two bytes wide for a 32 byte sprite in hires mode
    /// (or in lores mode when `lores_wide` is set). The origin wraps around the
    /// display, the rest of the sprite is clipped at the edges.
    /// With several active planes, rows go to the planes in turn.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8], lores_wide: bool) -> bool {
        if self.active.is_empty() {
            return false;
        }

        let (width, height) = (self.width(), self.height());
        let wide = sprite.len() == 32 && (self.hires || lores_wide);
        let (row_bytes, columns) = if wide { (2, 16) } else { (1, 8) };
        let x_coord = x as usize % width;
        let y_coord = y as usize % height;

        let mut collision = false;
        for (row, bytes) in sprite.chunks(row_bytes).enumerate() {
            let py = y_coord + row;
            if py >= height {
                break;
            }
            let bits = if wide {
                u16::from_be_bytes([bytes[0], bytes[1]])
            } else {
                (bytes[0] as u16) << 8
            };
            let plane = &mut self.planes[self.active[row % self.active.len()]];
            for col in 0..columns {
                let px = x_coord + col;
                if px >= width {
                    break;
                }
                if bits & (0x8000 >> col) != 0 {
                    collision |= plane.toggle(px, py);
                }
            }
        }

        collision
    }

    pub fn scroll(&mut self, direction: Direction, amount: usize) {
        for &index in &self.active {
            self.planes[index].scroll(direction, amount);
        }
    }

    /// Switch every plane to 128x64 and clear it.
    pub fn hires(&mut self) {
        self.hires = true;
        self.resize_planes();
    }

    /// Switch every plane to 64x32 and clear it.
    pub fn lores(&mut self) {
        self.hires = false;
        self.resize_planes();
    }

    fn resize_planes(&mut self) {
        let (width, height) = (self.width(), self.height());
        for plane in self.planes.iter_mut() {
            *plane = Plane::new(width, height);
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{}", if self.composite(x, y) { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
