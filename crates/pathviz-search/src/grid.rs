//! The search [`Grid`]: a square arena of [`Cell`]s with static adjacency
//! and the start/target designation.

use std::fmt;

use pathviz_core::{Point, Range};

use crate::cell::{Cell, UNREACHABLE, VisitState};
use crate::distance::Heuristic;
use crate::error::Error;
use crate::neighbors::Neighbors;

/// A `size × size` board of search cells stored row-major.
///
/// Cells refer to each other by index, so a whole-board re-initialisation
/// invalidates every index handed out before it. [`generation`](Grid::generation)
/// changes on each re-initialisation to make that detectable.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
    start: Option<usize>,
    target: Option<usize>,
    generation: u32,
}

impl Grid {
    /// Create a `size × size` grid with neighbor lists built.
    pub fn new(size: i32) -> Self {
        let mut grid = Self {
            bounds: Range::default(),
            cells: Vec::new(),
            start: None,
            target: None,
            generation: 0,
        };
        grid.initialize(size);
        grid
    }

    /// Replace every cell with a fresh `Free` one and drop the start/target
    /// designation. Neighbor lists are rebuilt for the new cells.
    pub fn initialize(&mut self, size: i32) {
        self.bounds = Range::square(size);
        self.cells = self.bounds.iter().map(Cell::new).collect();
        self.start = None;
        self.target = None;
        self.generation = self.generation.wrapping_add(1);
        self.rebuild_neighbors();
    }

    /// Recompute every cell's neighbor list from the up-to-8 surrounding
    /// in-bounds coordinates.
    pub fn rebuild_neighbors(&mut self) {
        let mut nb = Neighbors::new();
        let bounds = self.bounds;
        let width = bounds.width() as usize;
        for cell in self.cells.iter_mut() {
            cell.neighbors.clear();
            cell.neighbors.extend(
                nb.all(cell.pos(), bounds)
                    .iter()
                    .map(|p| p.y as usize * width + p.x as usize),
            );
        }
    }

    // -----------------------------------------------------------------------
    // Designation and edits
    // -----------------------------------------------------------------------

    /// Designate the start cell.
    ///
    /// The previous start cell, if any, becomes `Free` again. A wall at `pos`
    /// is removed. The start receives `g = 0` and, once a target is known,
    /// `h` = Manhattan distance to it.
    pub fn set_start(&mut self, pos: Point) -> Result<(), Error> {
        let i = self.check(pos)?;
        if self.target == Some(i) {
            return Err(Error::Degenerate { pos });
        }
        if let Some(old) = self.start.take() {
            self.release(old);
        }
        self.claim(i, VisitState::Start);
        self.start = Some(i);
        self.seed_start_costs();
        Ok(())
    }

    /// Designate the target cell. See [`set_start`](Self::set_start).
    pub fn set_target(&mut self, pos: Point) -> Result<(), Error> {
        let i = self.check(pos)?;
        if self.start == Some(i) {
            return Err(Error::Degenerate { pos });
        }
        if let Some(old) = self.target.take() {
            self.release(old);
        }
        self.claim(i, VisitState::Target);
        self.target = Some(i);
        self.seed_start_costs();
        Ok(())
    }

    /// Designate start and target together. Both are validated before
    /// anything changes, so endpoints can be swapped in one call.
    pub fn designate(&mut self, start: Point, target: Point) -> Result<(), Error> {
        let si = self.check(start)?;
        let ti = self.check(target)?;
        if si == ti {
            return Err(Error::Degenerate { pos: start });
        }
        for old in [self.start.take(), self.target.take()].into_iter().flatten() {
            self.release(old);
        }
        self.claim(si, VisitState::Start);
        self.claim(ti, VisitState::Target);
        self.start = Some(si);
        self.target = Some(ti);
        self.seed_start_costs();
        Ok(())
    }

    /// Turn a `Free` cell into a wall (`make_wall`) or a wall back into a
    /// `Free` cell (`!make_wall`). Any other combination is a no-op; in
    /// particular start, target and search-marked cells are never converted.
    ///
    /// Returns whether the cell changed.
    pub fn toggle_obstacle(&mut self, pos: Point, make_wall: bool) -> Result<bool, Error> {
        let i = self.check(pos)?;
        let cell = &mut self.cells[i];
        let changed = match (make_wall, cell.state) {
            (true, VisitState::Free) => {
                cell.state = VisitState::Wall;
                cell.obstacle = true;
                true
            }
            (false, VisitState::Wall) => {
                cell.state = VisitState::Free;
                cell.obstacle = false;
                true
            }
            _ => false,
        };
        Ok(changed)
    }

    /// Reset every `Open`, `Closed` and `Path` cell to `Free`.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state.is_search_mark() {
                cell.state = VisitState::Free;
            }
        }
    }

    /// Turn every wall back into a `Free` cell without reallocating.
    pub fn clear_walls(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state == VisitState::Wall {
                cell.state = VisitState::Free;
                cell.obstacle = false;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Arena index of `p`, or `None` outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if self.bounds.contains(p) {
            Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The cell at arena index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start.map(|i| self.cells[i].pos())
    }

    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.target.map(|i| self.cells[i].pos())
    }

    /// Number of wall cells.
    pub fn walls(&self) -> usize {
        self.cells.iter().filter(|c| c.is_obstacle()).count()
    }

    /// Counter bumped by every [`initialize`](Self::initialize).
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    // -----------------------------------------------------------------------
    // Crate-internal helpers
    // -----------------------------------------------------------------------

    pub(crate) fn check(&self, pos: Point) -> Result<usize, Error> {
        self.idx(pos).ok_or(Error::OutOfBounds {
            pos,
            size: self.size(),
        })
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// Drop all costs and predecessors.
    pub(crate) fn clear_costs(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_costs();
        }
    }

    pub(crate) fn set_state(&mut self, idx: usize, state: VisitState) {
        self.cells[idx].state = state;
    }

    fn claim(&mut self, idx: usize, state: VisitState) {
        let cell = &mut self.cells[idx];
        cell.state = state;
        cell.obstacle = false;
        cell.clear_costs();
    }

    fn release(&mut self, idx: usize) {
        let cell = &mut self.cells[idx];
        cell.state = VisitState::Free;
        cell.clear_costs();
    }

    fn seed_start_costs(&mut self) {
        let Some(si) = self.start else {
            return;
        };
        let h = match self.target {
            Some(ti) => Heuristic::default().estimate(self.cells[si].pos(), self.cells[ti].pos()),
            None => UNREACHABLE,
        };
        self.cells[si].set_costs(0, h);
    }
}

/// One character per cell: `.` free, `#` wall, `S` start, `T` target,
/// `o` open, `x` closed, `*` path.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.bounds.width().max(1) as usize;
        for row in self.cells.chunks(width) {
            for cell in row {
                let ch = match cell.state() {
                    VisitState::Free => '.',
                    VisitState::Wall => '#',
                    VisitState::Start => 'S',
                    VisitState::Target => 'T',
                    VisitState::Open => 'o',
                    VisitState::Closed => 'x',
                    VisitState::Path => '*',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
