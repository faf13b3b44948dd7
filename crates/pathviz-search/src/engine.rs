//! Incremental A* over a [`Grid`].
//!
//! [`SearchEngine::step`] performs exactly one frontier expansion and returns,
//! so the caller decides the pace (one step per rendered frame, or a tight
//! loop in tests). Every move costs 1, diagonal or not.

use std::collections::BinaryHeap;

use pathviz_core::Point;

use crate::cell::VisitState;
use crate::distance::Heuristic;
use crate::error::Error;
use crate::grid::Grid;

/// Lifecycle of a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No search configured.
    #[default]
    Idle,
    Running,
    /// The target was reached; the path is available.
    Succeeded,
    /// The frontier emptied before the target was reached.
    Failed,
}

impl Status {
    /// Whether the status only changes through an explicit reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "found",
            Self::Failed => "no path",
        }
    }
}

/// Which frontier cell wins when several share the minimal `f`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// The cell that entered the frontier first.
    #[default]
    Earliest,
    /// The cell that entered the frontier last.
    Latest,
}

impl TieBreak {
    pub fn label(self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Latest => "latest",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Earliest => Self::Latest,
            Self::Latest => Self::Earliest,
        }
    }

    /// Secondary heap key for a cell inserted with sequence number `seq`;
    /// smaller keys pop first.
    #[inline]
    fn key(self, seq: u64) -> u64 {
        match self {
            Self::Earliest => seq,
            Self::Latest => u64::MAX - seq,
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "earliest" => Ok(Self::Earliest),
            "latest" => Ok(Self::Latest),
            other => Err(format!("unknown tie-break `{other}`")),
        }
    }
}

/// Heap entry. Entries go stale when their cell leaves the frontier or its
/// `f` improves; stale entries are skipped on pop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct FrontierEntry {
    f: i32,
    key: u64,
    idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, key) first.
        other.f.cmp(&self.f).then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search state: frontier, closed set, result path and status.
///
/// Costs and predecessors live on the grid's cells; the engine only keeps
/// membership and ordering. Cells are referred to by arena index.
#[derive(Clone, Debug, Default)]
pub struct SearchEngine {
    heuristic: Heuristic,
    tie_break: TieBreak,
    status: Status,
    frontier: BinaryHeap<FrontierEntry>,
    open: Vec<bool>,
    closed: Vec<bool>,
    seq: Vec<u64>,
    next_seq: u64,
    open_len: usize,
    closed_order: Vec<usize>,
    path: Vec<usize>,
    start: Option<usize>,
    target: Option<usize>,
    generation: u32,
}

impl SearchEngine {
    /// An idle engine using the Manhattan heuristic and earliest-inserted
    /// tie-breaking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: heuristic used from the next [`reset`](Self::reset) on.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Builder: tie-break rule used from the next [`reset`](Self::reset) on.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[inline]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Start a fresh search from `start` to `target` on `grid`.
    ///
    /// All cell costs and predecessors on the grid are cleared, the frontier
    /// becomes `{start}` and the status `Running`. Coincident or out-of-bounds
    /// endpoints are rejected and leave the engine untouched.
    pub fn reset(&mut self, grid: &mut Grid, start: Point, target: Point) -> Result<(), Error> {
        let si = grid.check(start)?;
        let ti = grid.check(target)?;
        if si == ti {
            return Err(Error::Degenerate { pos: start });
        }

        grid.clear_costs();
        let n = grid.len();
        self.frontier.clear();
        self.open.clear();
        self.open.resize(n, false);
        self.closed.clear();
        self.closed.resize(n, false);
        self.seq.clear();
        self.seq.resize(n, 0);
        self.next_seq = 0;
        self.open_len = 0;
        self.closed_order.clear();
        self.path.clear();
        self.start = Some(si);
        self.target = Some(ti);
        self.generation = grid.generation();

        grid.cell_mut(si).set_costs(0, self.heuristic.estimate(start, target));
        self.push_new(grid, si);
        self.status = Status::Running;

        log::debug!(
            "search reset: {start} -> {target} ({} heuristic, {} tie-break)",
            self.heuristic.label(),
            self.tie_break.label()
        );
        Ok(())
    }

    /// Discard the search and return to `Idle`.
    pub fn cancel(&mut self) {
        self.frontier.clear();
        self.open.clear();
        self.closed.clear();
        self.seq.clear();
        self.open_len = 0;
        self.closed_order.clear();
        self.path.clear();
        self.start = None;
        self.target = None;
        self.status = Status::Idle;
    }

    /// Advance the search by one expansion and return the new status.
    ///
    /// Does nothing unless the status is `Running`.
    pub fn step(&mut self, grid: &mut Grid) -> Status {
        if self.status != Status::Running {
            return self.status;
        }
        debug_assert_eq!(
            grid.generation(),
            self.generation,
            "grid was re-initialised after the search was reset"
        );
        let (Some(si), Some(ti)) = (self.start, self.target) else {
            return self.status;
        };

        let Some(ci) = self.pop_current(grid) else {
            self.status = Status::Failed;
            log::debug!(
                "search exhausted after {} expansions",
                self.closed_order.len()
            );
            return self.status;
        };

        if ci == ti {
            self.reconstruct(grid, si, ti);
            self.status = Status::Succeeded;
            log::debug!(
                "path of {} moves found after {} expansions",
                self.path.len(),
                self.closed_order.len()
            );
            return self.status;
        }

        self.open[ci] = false;
        self.open_len -= 1;
        self.closed[ci] = true;
        self.closed_order.push(ci);

        let current_g = grid.cell_at(ci).g();
        let target_pos = grid.cell_at(ti).pos();
        log::trace!("expand {} (g={current_g})", grid.cell_at(ci).pos());

        let degree = grid.cell_at(ci).neighbors().len();
        for k in 0..degree {
            let ni = grid.cell_at(ci).neighbors()[k];
            if self.closed[ni] || grid.cell_at(ni).is_obstacle() {
                continue;
            }
            let tentative_g = current_g + 1;

            if !self.open[ni] {
                let h = self.heuristic.estimate(grid.cell_at(ni).pos(), target_pos);
                let cell = grid.cell_mut(ni);
                cell.predecessor = Some(ci);
                cell.set_costs(tentative_g, h);
                self.push_new(grid, ni);
                continue;
            }

            // Equal cost still wins: the most recent relaxation owns the
            // predecessor.
            let cell = grid.cell_mut(ni);
            if tentative_g <= cell.g() {
                let old_f = cell.f();
                cell.predecessor = Some(ci);
                cell.set_g(tentative_g);
                if cell.f() != old_f {
                    let entry = FrontierEntry {
                        f: cell.f(),
                        key: self.tie_break.key(self.seq[ni]),
                        idx: ni,
                    };
                    self.frontier.push(entry);
                }
            }
        }

        self.status
    }

    /// Step until the search is no longer running. Bounded by one step per
    /// cell plus the final empty-frontier step.
    pub fn run(&mut self, grid: &mut Grid) -> Status {
        for _ in 0..=grid.len() {
            if self.step(grid) != Status::Running {
                break;
            }
        }
        self.status
    }

    /// Re-derive display states from the search. Path cells take priority,
    /// then frontier cells, then closed cells (only when `mark_closed`).
    /// Walls and the search's own endpoints are never overwritten, even on a
    /// grid without a start/target designation; previous search marks are
    /// cleared first.
    pub fn paint(&self, grid: &mut Grid, mark_closed: bool) {
        grid.clear_search_marks();
        let endpoints = [self.start, self.target];
        let paint_free = |grid: &mut Grid, idx: usize, state: VisitState| {
            let cell = grid.cell_at(idx);
            if !endpoints.contains(&Some(idx))
                && cell.state() == VisitState::Free
                && !cell.is_obstacle()
            {
                grid.set_state(idx, state);
            }
        };
        for &i in &self.path {
            paint_free(grid, i, VisitState::Path);
        }
        for i in self.open_set() {
            paint_free(grid, i, VisitState::Open);
        }
        if mark_closed {
            for &i in &self.closed_order {
                paint_free(grid, i, VisitState::Closed);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Frontier cells in insertion order.
    pub fn open_set(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = (0..self.open.len()).filter(|&i| self.open[i]).collect();
        cells.sort_by_key(|&i| self.seq[i]);
        cells
    }

    /// Finalised cells in the order they were closed.
    #[inline]
    pub fn closed_set(&self) -> &[usize] {
        &self.closed_order
    }

    #[inline]
    pub fn is_open(&self, idx: usize) -> bool {
        self.open.get(idx).copied().unwrap_or(false)
    }

    #[inline]
    pub fn is_closed(&self, idx: usize) -> bool {
        self.closed.get(idx).copied().unwrap_or(false)
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.closed_order.len()
    }

    /// The path from the target back towards the start, excluding the start.
    /// Empty unless the status is `Succeeded`. Its length is the number of
    /// moves.
    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of moves in the found path, zero while none was found.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// [`path`](Self::path) as grid positions.
    pub fn path_points(&self, grid: &Grid) -> Vec<Point> {
        self.path.iter().map(|&i| grid.cell_at(i).pos()).collect()
    }

    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn push_new(&mut self, grid: &Grid, idx: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.seq[idx] = seq;
        self.open[idx] = true;
        self.open_len += 1;
        self.frontier.push(FrontierEntry {
            f: grid.cell_at(idx).f(),
            key: self.tie_break.key(seq),
            idx,
        });
    }

    /// Pop the frontier cell with minimal `(f, tie-break key)`, skipping
    /// stale heap entries. The cell stays in the open set.
    fn pop_current(&mut self, grid: &Grid) -> Option<usize> {
        while let Some(entry) = self.frontier.pop() {
            if self.open[entry.idx] && grid.cell_at(entry.idx).f() == entry.f {
                return Some(entry.idx);
            }
        }
        None
    }

    fn reconstruct(&mut self, grid: &Grid, si: usize, ti: usize) {
        self.path.clear();
        let mut i = ti;
        while i != si && self.path.len() < grid.len() {
            self.path.push(i);
            match grid.cell_at(i).predecessor() {
                Some(p) => i = p,
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn frontier_entry_orders_by_f_then_key() {
        let mut heap = BinaryHeap::new();
        for (f, key, idx) in [(5, 0, 0), (3, 2, 1), (3, 1, 2), (4, 0, 3)] {
            heap.push(FrontierEntry { f, key, idx });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[test]
    fn latest_key_reverses_insertion_order() {
        assert!(TieBreak::Earliest.key(1) < TieBreak::Earliest.key(2));
        assert!(TieBreak::Latest.key(1) > TieBreak::Latest.key(2));
        assert_eq!("LATEST".parse::<TieBreak>(), Ok(TieBreak::Latest));
        assert!("first".parse::<TieBreak>().is_err());
    }

    #[test]
    fn new_engine_is_idle_and_step_is_noop() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.step(&mut grid), Status::Idle);
        assert!(engine.open_set().is_empty());
    }

    #[test]
    fn reset_seeds_start() {
        let mut grid = Grid::new(5);
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(4, 2)).unwrap();
        let s = grid.cell(p(0, 0)).unwrap();
        assert_eq!((s.g(), s.h(), s.f()), (0, 6, 6));
        assert_eq!(engine.open_set(), vec![0]);
        assert!(engine.closed_set().is_empty());
        assert!(engine.path().is_empty());
        assert_eq!(engine.status(), Status::Running);
    }

    #[test]
    fn reset_uses_configured_heuristic() {
        let mut grid = Grid::new(5);
        let mut engine = SearchEngine::new().with_heuristic(Heuristic::Chebyshev);
        engine.reset(&mut grid, p(0, 0), p(4, 2)).unwrap();
        assert_eq!(grid.cell(p(0, 0)).unwrap().h(), 4);
    }

    #[test]
    fn reset_rejects_bad_endpoints() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        assert_eq!(
            engine.reset(&mut grid, p(1, 1), p(1, 1)),
            Err(Error::Degenerate { pos: p(1, 1) })
        );
        assert!(matches!(
            engine.reset(&mut grid, p(0, 0), p(3, 3)),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(engine.status(), Status::Idle);
    }

    #[test]
    fn first_step_expands_start_in_neighbor_order() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(engine.step(&mut grid), Status::Running);
        let open: Vec<Point> = engine
            .open_set()
            .into_iter()
            .map(|i| grid.cell_at(i).pos())
            .collect();
        assert_eq!(open, vec![p(1, 0), p(0, 1), p(1, 1)]);
        assert_eq!(engine.closed_set(), &[0]);
        let diag = grid.cell(p(1, 1)).unwrap();
        assert_eq!((diag.g(), diag.h(), diag.f()), (1, 2, 3));
        assert_eq!(diag.predecessor(), Some(0));
    }

    #[test]
    fn terminal_status_is_sticky() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(2, 2)).unwrap();
        assert_eq!(engine.run(&mut grid), Status::Succeeded);
        let path = engine.path().to_vec();
        let expansions = engine.expansions();
        assert_eq!(engine.step(&mut grid), Status::Succeeded);
        assert_eq!(engine.path(), &path[..]);
        assert_eq!(engine.expansions(), expansions);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(2, 2)).unwrap();
        engine.step(&mut grid);
        engine.cancel();
        assert_eq!(engine.status(), Status::Idle);
        assert!(engine.open_set().is_empty());
        assert!(engine.closed_set().is_empty());
        assert_eq!(engine.step(&mut grid), Status::Idle);
    }

    #[test]
    fn paint_marks_frontier_closed_and_path() {
        let mut grid = Grid::new(3);
        grid.designate(p(0, 0), p(2, 2)).unwrap();
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(2, 2)).unwrap();

        engine.step(&mut grid);
        engine.paint(&mut grid, true);
        assert_eq!(grid.to_string(), "So.\noo.\n..T\n");

        engine.run(&mut grid);
        engine.paint(&mut grid, true);
        assert_eq!(grid.to_string(), "Soo\no*o\nooT\n");

        engine.paint(&mut grid, false);
        assert_eq!(grid.cell(p(0, 1)).unwrap().state(), VisitState::Open);
    }

    #[test]
    fn paint_leaves_undesignated_endpoints_alone() {
        let mut grid = Grid::new(3);
        let mut engine = SearchEngine::new();
        engine.reset(&mut grid, p(0, 0), p(2, 2)).unwrap();
        engine.run(&mut grid);
        engine.paint(&mut grid, true);
        assert_eq!(grid.to_string(), ".oo\no*o\noo.\n");
    }
}
