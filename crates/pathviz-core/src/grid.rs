//! The display [`Grid`]: a 2D screen buffer of [`Cell`]s, and frame diffing.
//!
//! The application draws into a fresh `Grid` every time the model changes;
//! [`compute_frame`] then produces the minimal set of cells a driver has to
//! repaint.

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::Style;

/// A row-major screen buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid of the given dimensions filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds.contains(p) {
            Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Read the cell at `p`. Returns `Cell::default()` outside the bounds.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` left to right starting at `pos`, clipped at the right
    /// edge. Returns the number of characters written.
    pub fn draw_text(&mut self, pos: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let p = pos.shift(i as i32, 0);
            if !self.contains(p) {
                break;
            }
            self.set(p, Cell::new(ch, style));
            written += 1;
        }
        written
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// Grids of different sizes are treated as fully changed.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let resized = prev.bounds() != bounds;
    let cells = curr
        .iter()
        .filter(|&(p, c)| resized || prev.at(p) != c)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}
