mod cell;

pub use cell::Cell;

use crate::style::Style;
use crate::text::char_width;

/// A grid of cells the size of the terminal.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Write `text` starting at `(x, y)`, stopping after `max_width` columns or
    /// at the right edge. Returns the number of columns written.
    ///
    /// A wide character that would not fit entirely is replaced by a space.
    pub fn set_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;

        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col >= limit {
                break;
            }
            if col + w > limit {
                self.set(col, y, style.cell(' '));
                col += 1;
                break;
            }
            self.set(col, y, style.cell(ch));
            for i in 1..w {
                let mut continuation = style.cell(' ');
                continuation.wide_continuation = true;
                self.set(col + i, y, continuation);
            }
            col += w;
        }
        col - x
    }

    /// Paint `width` columns starting at `(x, y)` with blank cells in `style`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, style: Style) {
        let end = x.saturating_add(width).min(self.width);
        for col in x..end {
            self.set(col, y, style.cell(' '));
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cells of `self` that differ from `other`, with their positions.
    ///
    /// Both buffers must have the same size.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
