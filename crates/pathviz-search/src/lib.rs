//! Incremental A* search over an 8-connected square grid.
//!
//! The crate is the algorithmic core of the pathviz visualizer:
//!
//! - [`Grid`] owns the [`Cell`]s, their static adjacency and the start/target
//!   designation.
//! - [`SearchEngine`] advances A* one expansion per [`step`](SearchEngine::step)
//!   call, so a caller can animate the search frame by frame.
//!
//! Every move costs 1, including diagonal ones. Cells reference each other by
//! index into the grid's arena; nothing holds a pointer to another cell.
//!
//! ```
//! use pathviz_core::Point;
//! use pathviz_search::{Grid, SearchEngine, Status};
//!
//! let mut grid = Grid::new(3);
//! grid.designate(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! let mut engine = SearchEngine::new();
//! engine.reset(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(engine.run(&mut grid), Status::Succeeded);
//! assert_eq!(engine.path().len(), 2);
//! ```

mod cell;
mod distance;
mod engine;
mod error;
mod grid;
mod neighbors;

pub use cell::{Cell, UNREACHABLE, VisitState};
pub use distance::{Heuristic, chebyshev, manhattan};
pub use engine::{SearchEngine, Status, TieBreak};
pub use error::Error;
pub use grid::Grid;
pub use neighbors::{DIRECTIONS, Neighbors};
