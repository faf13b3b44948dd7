//! **pathviz-core**: the framework layer of the pathviz grid visualizer.
//!
//! Geometry primitives, styled display cells, a screen buffer with frame
//! diffing, input messages, and the Model-View-Update application loop with
//! a fixed animation tick.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::*;
pub use style::{AttrMask, Color, Style};
