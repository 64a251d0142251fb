use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The contents of a single Chip-8 frame: 64x32 monochrome pixels.
///
/// Indexed as `[y][x]`, so iterating rows yields them top to bottom, each row
/// left to right. Only the clear and draw instructions change it.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at `(x, y)` is set; coordinates wrap.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    /// XORs one sprite pixel onto the frame at `(x, y)`, wrapping both coordinates.
    ///
    /// Returns true if this erased a pixel that was set.
    pub fn xor(&mut self, x: usize, y: usize, value: bool) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let erased = *pixel && value;
        *pixel ^= value;
        erased
    }

    /// Draws one sprite row of 8 pixels, most significant bit leftmost.
    ///
    /// Returns true if any set pixel was erased.
    pub fn xor_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        (0..8).fold(false, |erased, bit| {
            let value = (row >> (7 - bit)) & 1 == 1;
            self.xor(x + bit, y, value) | erased
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// Every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        self.pixels.iter().flat_map(|row| row.iter().copied())
    }

    pub fn lit_count(&self) -> usize {
        self.pixels().filter(|p| *p).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    /// Renders as rows of `#` and `.`, which reads better in failing assertions.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
