//! The search [`Cell`] and its [`VisitState`].

use pathviz_core::Point;

/// Sentinel cost meaning "not reached yet" (positive infinity).
pub const UNREACHABLE: i32 = i32::MAX;

/// Display state of a cell. Exactly one applies at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitState {
    #[default]
    Free,
    Wall,
    Start,
    Target,
    Open,
    Closed,
    Path,
}

impl VisitState {
    /// Whether the state is a transient search mark (open, closed or path).
    #[inline]
    pub fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Whether the state is a start or target designation.
    #[inline]
    pub fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::Target)
    }
}

/// One node of the search grid.
///
/// Costs are only writable through [`set_costs`](Cell::set_costs) and
/// [`set_g`](Cell::set_g), which keep `f == g + h`. `predecessor` and
/// `neighbors` are indices into the owning [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    g: i32,
    h: i32,
    f: i32,
    pub(crate) state: VisitState,
    pub(crate) obstacle: bool,
    pub(crate) predecessor: Option<usize>,
    pub(crate) neighbors: Vec<usize>,
}

impl Cell {
    pub(crate) fn new(pos: Point) -> Self {
        Self {
            pos,
            g: UNREACHABLE,
            h: UNREACHABLE,
            f: UNREACHABLE,
            state: VisitState::Free,
            obstacle: false,
            predecessor: None,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Best known cost from the start.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the target.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// Priority key, `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.f
    }

    #[inline]
    pub fn state(&self) -> VisitState {
        self.state
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Index of the cell the best known path arrived from.
    #[inline]
    pub fn predecessor(&self) -> Option<usize> {
        self.predecessor
    }

    /// Indices of the adjacent cells, in neighbor enumeration order.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub(crate) fn set_costs(&mut self, g: i32, h: i32) {
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(h);
    }

    pub(crate) fn set_g(&mut self, g: i32) {
        self.set_costs(g, self.h);
    }

    /// Forget all search bookkeeping.
    pub(crate) fn clear_costs(&mut self) {
        self.set_costs(UNREACHABLE, UNREACHABLE);
        self.predecessor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cell_is_free_and_unreached() {
        let c = Cell::new(Point::new(2, 3));
        assert_eq!(c.pos(), Point::new(2, 3));
        assert_eq!((c.g(), c.h(), c.f()), (UNREACHABLE, UNREACHABLE, UNREACHABLE));
        assert_eq!(c.state(), VisitState::Free);
        assert!(!c.is_obstacle());
        assert!(c.predecessor().is_none());
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn f_tracks_g_and_h() {
        let mut c = Cell::new(Point::ZERO);
        c.set_costs(0, 7);
        assert_eq!(c.f(), 7);
        c.set_g(3);
        assert_eq!((c.g(), c.h(), c.f()), (3, 7, 10));
        c.set_costs(UNREACHABLE, 4);
        assert_eq!(c.f(), UNREACHABLE);
        c.clear_costs();
        assert_eq!(c.g(), UNREACHABLE);
    }

    #[test]
    fn state_classes() {
        assert!(VisitState::Closed.is_search_mark());
        assert!(!VisitState::Wall.is_search_mark());
        assert!(VisitState::Target.is_endpoint());
        assert!(!VisitState::Path.is_endpoint());
    }
}
