//! Pointer handling: screen position to board cell, and wall strokes.

use pathviz_core::Point;

/// Where the board sits on screen and how large one cell is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellLayout {
    /// Screen position of cell `(0, 0)`.
    pub offset: Point,
    /// Terminal columns per cell.
    pub cell_width: i32,
    /// Terminal rows per cell.
    pub cell_height: i32,
}

impl CellLayout {
    pub fn new(offset: Point, cell_width: i32) -> Self {
        Self {
            offset,
            cell_width: cell_width.max(1),
            cell_height: 1,
        }
    }

    /// The board cell under screen position `pos` on a `size × size` board,
    /// or `None` when `pos` is outside the board.
    pub fn to_cell(&self, pos: Point, size: i32) -> Option<Point> {
        let dx = pos.x - self.offset.x;
        let dy = pos.y - self.offset.y;
        if dx < 0 || dy < 0 {
            return None;
        }
        let cell = Point::new(dx / self.cell_width, dy / self.cell_height);
        (cell.x < size && cell.y < size).then_some(cell)
    }

    /// Top-left screen position of board cell `cell`.
    pub fn to_screen(&self, cell: Point) -> Point {
        Point::new(
            self.offset.x + cell.x * self.cell_width,
            self.offset.y + cell.y * self.cell_height,
        )
    }

    /// Screen extent of a `size × size` board, border excluded.
    pub fn board_extent(&self, size: i32) -> Point {
        Point::new(size * self.cell_width, size * self.cell_height)
    }
}

/// What a held mouse button does to the cells it passes over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrokeMode {
    Draw,
    Erase,
}

impl StrokeMode {
    #[inline]
    pub fn makes_wall(self) -> bool {
        self == Self::Draw
    }
}

/// One press-drag-release gesture. Consecutive events over the same cell
/// only count once.
#[derive(Clone, Debug)]
pub struct Stroke {
    mode: StrokeMode,
    last: Option<Point>,
}

impl Stroke {
    pub fn new(mode: StrokeMode) -> Self {
        Self { mode, last: None }
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    /// Record the pointer entering `cell`. Returns `false` when it is still
    /// on the cell handled last.
    pub fn enter(&mut self, cell: Point) -> bool {
        if self.last == Some(cell) {
            return false;
        }
        self.last = Some(cell);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_wide_cells_inside_the_border() {
        let layout = CellLayout::new(Point::new(1, 1), 2);
        assert_eq!(layout.to_cell(Point::new(1, 1), 5), Some(Point::new(0, 0)));
        assert_eq!(layout.to_cell(Point::new(2, 1), 5), Some(Point::new(0, 0)));
        assert_eq!(layout.to_cell(Point::new(3, 1), 5), Some(Point::new(1, 0)));
        assert_eq!(layout.to_cell(Point::new(10, 5), 5), Some(Point::new(4, 4)));
        assert_eq!(layout.to_screen(Point::new(4, 4)), Point::new(9, 5));
        assert_eq!(layout.board_extent(5), Point::new(10, 5));
    }

    #[test]
    fn rejects_positions_off_the_board() {
        let layout = CellLayout::new(Point::new(1, 1), 2);
        assert_eq!(layout.to_cell(Point::new(0, 3), 5), None);
        assert_eq!(layout.to_cell(Point::new(3, 0), 5), None);
        assert_eq!(layout.to_cell(Point::new(11, 1), 5), None);
        assert_eq!(layout.to_cell(Point::new(1, 6), 5), None);
        assert_eq!(layout.to_cell(Point::new(-4, -4), 5), None);
    }

    #[test]
    fn stroke_skips_repeated_cells() {
        let mut stroke = Stroke::new(StrokeMode::Erase);
        assert!(!stroke.mode().makes_wall());
        assert!(stroke.enter(Point::new(1, 1)));
        assert!(!stroke.enter(Point::new(1, 1)));
        assert!(stroke.enter(Point::new(2, 1)));
        assert!(stroke.enter(Point::new(1, 1)));
    }
}
