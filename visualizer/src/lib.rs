//! Interactive A* visualizer: the board, the search engine and the user
//! controls, wired into the pathviz app loop.
//!
//! Draw walls with the left mouse button, erase them with the right one,
//! then press space to watch the search expand one cell per tick.

pub mod config;
pub mod input;
pub mod render;
pub mod walls;

use std::time::{SystemTime, UNIX_EPOCH};

use pathviz_core::{
    Point,
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
};
use pathviz_search::{Grid as SearchGrid, SearchEngine, Status, VisitState};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::{ConfigError, USAGE, VizConfig};
pub use input::{CellLayout, Stroke, StrokeMode};
pub use walls::scatter_walls;

/// Rows below the board: status bar and key hint.
const FOOTER_ROWS: i32 = 2;
/// Narrowest screen, so the status bar fits next to small boards.
const MIN_WIDTH: i32 = 72;

const HINT: &str =
    "space start  n step  p pause  c clear  w no walls  r random  s/t place  h/b options  q quit";

/// Which endpoint the next click places.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Placement {
    Start,
    Target,
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

/// The application model: owns the board and the search, and turns input
/// into edits and steps.
pub struct Visualizer {
    board: SearchGrid,
    engine: SearchEngine,
    layout: CellLayout,
    rng: StdRng,
    density: f64,
    mark_closed: bool,
    paused: bool,
    stroke: Option<Stroke>,
    placing: Option<Placement>,
    message: String,
}

impl Visualizer {
    /// Build the board from a validated configuration.
    pub fn new(config: &VizConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = SearchGrid::new(config.size);
        board.designate(config.start, config.target)?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        log::info!("{0}x{0} board, wall seed {seed}", config.size);

        Ok(Self {
            board,
            engine: SearchEngine::new()
                .with_heuristic(config.heuristic)
                .with_tie_break(config.tie_break),
            layout: CellLayout::new(Point::new(1, 1), config.cell_width),
            rng: StdRng::seed_from_u64(seed),
            density: config.density,
            mark_closed: config.mark_closed,
            paused: false,
            stroke: None,
            placing: None,
            message: "Draw walls, then press space.".into(),
        })
    }

    /// Screen size needed for the board, its border and the footer.
    pub fn screen_size(&self) -> Point {
        let extent = self.layout.board_extent(self.board.size());
        Point::new((extent.x + 2).max(MIN_WIDTH), extent.y + 2 + FOOTER_ROWS)
    }

    pub fn board(&self) -> &SearchGrid {
        &self.board
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    // -----------------------------------------------------------------------
    // Search control
    // -----------------------------------------------------------------------

    fn start_search(&mut self) {
        let (Some(start), Some(target)) = (self.board.start(), self.board.target()) else {
            return;
        };
        match self.engine.reset(&mut self.board, start, target) {
            Ok(()) => {
                self.paused = false;
                self.engine.paint(&mut self.board, self.mark_closed);
                self.message = format!("Searching {start} -> {target}.");
                log::info!("search started {start} -> {target}");
            }
            Err(e) => {
                self.message = e.to_string();
                log::warn!("cannot start search: {e}");
            }
        }
    }

    fn advance(&mut self) {
        let status = self.engine.step(&mut self.board);
        self.engine.paint(&mut self.board, self.mark_closed);
        match status {
            Status::Succeeded => {
                self.message = format!(
                    "Path of {} moves after {} expansions.",
                    self.engine.path_len(),
                    self.engine.expansions()
                );
                log::info!("{}", self.message);
            }
            Status::Failed => {
                self.message = "Target unreachable.".into();
                log::info!(
                    "no path after {} expansions",
                    self.engine.expansions()
                );
            }
            Status::Idle | Status::Running => {}
        }
    }

    /// Drop any search in progress or on display.
    fn invalidate_search(&mut self) {
        if self.engine.status() != Status::Idle {
            self.engine.cancel();
            self.board.clear_search_marks();
            self.paused = false;
        }
    }

    // -----------------------------------------------------------------------
    // Board edits
    // -----------------------------------------------------------------------

    fn edit_cell(&mut self, cell: Point, make_wall: bool) {
        let Some(state) = self.board.cell(cell).map(|c| c.state()) else {
            return;
        };
        let is_wall = state == VisitState::Wall;
        if state.is_endpoint() || is_wall == make_wall {
            return;
        }
        self.invalidate_search();
        if let Err(e) = self.board.toggle_obstacle(cell, make_wall) {
            log::warn!("edit rejected: {e}");
        }
    }

    fn place(&mut self, which: Placement, cell: Point) {
        let (current, other) = match which {
            Placement::Start => (self.board.start(), self.board.target()),
            Placement::Target => (self.board.target(), self.board.start()),
        };
        if current == Some(cell) {
            return;
        }
        let rejected = if other == Some(cell) {
            Some(pathviz_search::Error::Degenerate { pos: cell })
        } else if !self.board.contains(cell) {
            Some(pathviz_search::Error::OutOfBounds {
                pos: cell,
                size: self.board.size(),
            })
        } else {
            None
        };
        if let Some(e) = rejected {
            self.message = e.to_string();
            log::warn!("placement rejected: {e}");
            return;
        }

        self.invalidate_search();
        let result = match which {
            Placement::Start => self.board.set_start(cell),
            Placement::Target => self.board.set_target(cell),
        };
        match result {
            Ok(()) => self.message = format!("{which:?} moved to {cell}."),
            Err(e) => {
                self.message = e.to_string();
                log::warn!("placement rejected: {e}");
            }
        }
    }

    fn clear_walls(&mut self) {
        let (Some(start), Some(target)) = (self.board.start(), self.board.target()) else {
            return;
        };
        self.engine.cancel();
        self.paused = false;
        self.board.initialize(self.board.size());
        if let Err(e) = self.board.designate(start, target) {
            log::warn!("re-designation failed: {e}");
        }
        self.message = "Walls cleared.".into();
        log::info!("walls cleared");
    }

    fn random_walls(&mut self) {
        self.invalidate_search();
        self.board.clear_walls();
        match scatter_walls(&mut self.board, self.density, &mut self.rng) {
            Ok(n) => {
                self.message = format!("{n} random walls.");
                log::info!("scattered {n} walls at density {}", self.density);
            }
            Err(e) => log::warn!("cannot scatter walls: {e}"),
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Space | Key::Enter => self.start_search(),
            Key::Char('n') => {
                if self.engine.status() == Status::Running {
                    self.paused = true;
                    self.advance();
                } else {
                    self.start_search();
                    self.paused = true;
                }
            }
            Key::Char('p') => {
                if self.engine.status() == Status::Running {
                    self.paused = !self.paused;
                    self.message = if self.paused { "Paused." } else { "Resumed." }.into();
                }
            }
            Key::Char('c') => {
                self.invalidate_search();
                self.message = "Board cleared.".into();
                log::info!("board cleared");
            }
            Key::Char('w') => self.clear_walls(),
            Key::Char('r') => self.random_walls(),
            Key::Char('s') => {
                self.placing = Some(Placement::Start);
                self.message = "Click a cell to place the start.".into();
            }
            Key::Char('t') => {
                self.placing = Some(Placement::Target);
                self.message = "Click a cell to place the target.".into();
            }
            Key::Char('h') => {
                self.invalidate_search();
                let h = self.engine.heuristic().toggle();
                self.engine.set_heuristic(h);
                self.message = format!("Heuristic: {}.", h.label());
            }
            Key::Char('b') => {
                self.invalidate_search();
                let tb = self.engine.tie_break().toggle();
                self.engine.set_tie_break(tb);
                self.message = format!("Tie-break: {}.", tb.label());
            }
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point) {
        let cell = self.layout.to_cell(pos, self.board.size());
        match action {
            MouseAction::Main | MouseAction::Secondary => {
                if let Some(which) = self.placing.take() {
                    match cell {
                        Some(cell) => self.place(which, cell),
                        None => self.message = "Placement cancelled.".into(),
                    }
                    return;
                }
                let mode = if action == MouseAction::Main {
                    StrokeMode::Draw
                } else {
                    StrokeMode::Erase
                };
                self.stroke = Some(Stroke::new(mode));
                if let Some(cell) = cell {
                    self.stroke_enter(cell);
                }
            }
            MouseAction::Move => {
                if let Some(cell) = cell {
                    self.stroke_enter(cell);
                }
            }
            MouseAction::Release => self.stroke = None,
            MouseAction::Auxiliary => {}
        }
    }

    fn stroke_enter(&mut self, cell: Point) {
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };
        if stroke.enter(cell) {
            let make_wall = stroke.mode().makes_wall();
            self.edit_cell(cell, make_wall);
        }
    }

    fn status_line(&self) -> String {
        let status = if self.paused && self.engine.status() == Status::Running {
            "paused"
        } else {
            self.engine.status().label()
        };
        format!(
            "{status} | {} | {} | expanded {} | path {} | {}",
            self.engine.heuristic().label(),
            self.engine.tie_break().label(),
            self.engine.expansions(),
            self.engine.path_len(),
            self.message
        )
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::Tick { .. } => {
                if self.engine.status() == Status::Running && !self.paused {
                    self.advance();
                }
                None
            }
            Msg::KeyDown { key, .. } => self.on_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        render::draw_board(&self.board, &self.layout, grid);
        let footer = self.layout.offset.y + self.layout.board_extent(self.board.size()).y + 1;
        render::draw_status(grid, footer, &self.status_line());
        render::draw_hint(grid, footer + 1, HINT);
    }
}
