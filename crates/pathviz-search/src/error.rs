use std::fmt;

use pathviz_core::Point;

/// Errors returned when a grid edit or search configuration is rejected.
///
/// A rejected operation leaves the grid and the engine unchanged. An
/// exhausted search is not an error; see [`Status::Failed`](crate::Status::Failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The coordinate lies outside `[0, size)` on some axis.
    OutOfBounds { pos: Point, size: i32 },
    /// Start and target designate the same cell.
    Degenerate { pos: Point },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, size } => {
                write!(f, "coordinate {pos} is outside the {size}x{size} grid")
            }
            Self::Degenerate { pos } => {
                write!(f, "start and target are both {pos}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_coordinate() {
        let e = Error::OutOfBounds {
            pos: Point::new(20, 3),
            size: 20,
        };
        assert_eq!(e.to_string(), "coordinate (20, 3) is outside the 20x20 grid");
        let e = Error::Degenerate {
            pos: Point::new(1, 1),
        };
        assert!(e.to_string().contains("(1, 1)"));
    }
}
