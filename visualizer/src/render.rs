//! Drawing the board: visit state to colour, border, status lines.

use pathviz_core::{AttrMask, Cell, Color, Grid, Point, Style};
use pathviz_search::{Grid as SearchGrid, VisitState};

use crate::input::CellLayout;

// Palette
pub const COL_START: Color = Color::from_rgb(220, 50, 50);
pub const COL_TARGET: Color = Color::from_rgb(50, 90, 220);
pub const COL_WALL: Color = Color::from_rgb(110, 110, 110);
pub const COL_CLOSED: Color = Color::from_rgb(230, 200, 60);
pub const COL_OPEN: Color = Color::from_rgb(70, 190, 90);
pub const COL_PATH: Color = Color::from_rgb(240, 140, 40);
pub const COL_FREE: Color = Color::from_rgb(240, 240, 240);

const COL_GLYPH: Color = Color::from_rgb(255, 255, 255);
const COL_BORDER: Color = Color::from_rgb(150, 150, 170);
const COL_STATUS_FG: Color = Color::from_rgb(200, 200, 200);
const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);
const COL_HINT_FG: Color = Color::from_rgb(130, 130, 150);

/// Fill colour for a cell in `state`.
pub fn state_color(state: VisitState) -> Color {
    match state {
        VisitState::Start => COL_START,
        VisitState::Target => COL_TARGET,
        VisitState::Wall => COL_WALL,
        VisitState::Closed => COL_CLOSED,
        VisitState::Open => COL_OPEN,
        VisitState::Path => COL_PATH,
        VisitState::Free => COL_FREE,
    }
}

fn state_glyph(state: VisitState) -> char {
    match state {
        VisitState::Start => 'S',
        VisitState::Target => 'T',
        _ => ' ',
    }
}

/// Draw every board cell and a one-cell border around them.
pub fn draw_board(board: &SearchGrid, layout: &CellLayout, out: &mut Grid) {
    draw_border(board.size(), layout, out);
    for cell in board.cells() {
        let state = cell.state();
        let style = Style::new(COL_GLYPH, state_color(state)).with_attrs(AttrMask::BOLD);
        let origin = layout.to_screen(cell.pos());
        for dy in 0..layout.cell_height {
            for dx in 0..layout.cell_width {
                let ch = if dx == 0 && dy == 0 { state_glyph(state) } else { ' ' };
                out.set(origin.shift(dx, dy), Cell::new(ch, style));
            }
        }
    }
}

fn draw_border(size: i32, layout: &CellLayout, out: &mut Grid) {
    let style = Style::default().with_fg(COL_BORDER);
    let extent = layout.board_extent(size);
    let x0 = layout.offset.x - 1;
    let y0 = layout.offset.y - 1;
    let x1 = layout.offset.x + extent.x;
    let y1 = layout.offset.y + extent.y;

    for x in x0 + 1..x1 {
        out.set(Point::new(x, y0), Cell::new('─', style));
        out.set(Point::new(x, y1), Cell::new('─', style));
    }
    for y in y0 + 1..y1 {
        out.set(Point::new(x0, y), Cell::new('│', style));
        out.set(Point::new(x1, y), Cell::new('│', style));
    }
    out.set(Point::new(x0, y0), Cell::new('┌', style));
    out.set(Point::new(x1, y0), Cell::new('┐', style));
    out.set(Point::new(x0, y1), Cell::new('└', style));
    out.set(Point::new(x1, y1), Cell::new('┘', style));
}

/// Draw a full-width status bar on row `y`.
pub fn draw_status(out: &mut Grid, y: i32, text: &str) {
    let style = Style::new(COL_STATUS_FG, COL_STATUS_BG);
    for x in 0..out.width() {
        out.set(Point::new(x, y), Cell::new(' ', style));
    }
    out.draw_text(Point::new(1, y), text, style);
}

/// Draw a dim hint line on row `y`.
pub fn draw_hint(out: &mut Grid, y: i32, text: &str) {
    out.draw_text(Point::new(1, y), text, Style::default().with_fg(COL_HINT_FG));
}
