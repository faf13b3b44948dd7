use pathviz_core::{Point, Range};

/// Neighbor offsets in enumeration order: the four orthogonal directions
/// (east, west, south, north) followed by the four diagonals (south-east,
/// north-west, north-east, south-west).
///
/// Frontier insertion order, and therefore tie-breaking, follows this order.
pub const DIRECTIONS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
];

/// Reusable buffer for enumerating the in-bounds neighbors of a point.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DIRECTIONS.len()),
        }
    }

    /// Return the up-to-8 neighbors of `p` that lie inside `bounds`, in
    /// [`DIRECTIONS`] order.
    pub fn all(&mut self, p: Point, bounds: Range) -> &[Point] {
        self.buf.clear();
        self.buf.extend(
            DIRECTIONS
                .iter()
                .map(|&d| p + d)
                .filter(|&n| bounds.contains(n)),
        );
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_point_has_eight_in_order() {
        let mut nb = Neighbors::new();
        let got = nb.all(Point::new(1, 1), Range::square(3)).to_vec();
        assert_eq!(got.len(), 8);
        assert_eq!(got[0], Point::new(2, 1));
        assert_eq!(got[4], Point::new(2, 2));
        assert_eq!(got[7], Point::new(0, 2));
    }

    #[test]
    fn corner_and_edge_are_clipped() {
        let mut nb = Neighbors::new();
        let r = Range::square(4);
        assert_eq!(
            nb.all(Point::new(0, 0), r),
            &[Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(nb.all(Point::new(2, 0), r).len(), 5);
        assert!(nb.all(Point::new(0, 0), Range::square(1)).is_empty());
    }
}
