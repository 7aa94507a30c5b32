use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// The 64x32 monochrome frame buffer.
///
/// Only `clear` and `draw_sprite` change it. Everything else about
/// presenting it (colours, scaling, windows) belongs to the host.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    cells: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Display {

    pub fn new() -> Display {
        Display {
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];
    }

    /// Whether the pixel at (x, y) is set. Coordinates outside the screen are unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false)
    }

    /// The rows of the screen, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.cells.iter()
    }

    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| row.iter().all(|c| !c))
    }

    /// XOR a sprite onto the screen with its top left corner at (x, y),
    /// which must already be inside the screen.
    /// Each byte is one row of 8 pixels, most significant bit leftmost.
    /// Anything past the right or bottom edge is clipped, not wrapped.
    ///
    /// Returns true if any set pixel was erased.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut any_collisions = false;
        for (dy, &row) in sprite.iter().enumerate() {
            let y = y + dy;
            if y >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let x = x + dx;
                if x >= SCREEN_WIDTH {
                    break;
                }
                if (row >> (7 - dx)) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.cells[y][x];
                if *pixel {
                    any_collisions = true;
                }
                *pixel = !*pixel;
            }
        }
        any_collisions
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Display [")?;
        for row in self.rows() {
            let line: String = row.iter().map(|c| if *c { '#' } else { '.' }).collect();
            writeln!(f, "    {}", line)?;
        }
        write!(f, "]")
    }
}
