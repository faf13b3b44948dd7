use pathviz_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Distance estimate used to rank frontier cells.
///
/// With unit cost for diagonal moves, [`Heuristic::Manhattan`] can
/// overestimate the remaining cost (a diagonal step shrinks it by 2), so the
/// search is not guaranteed to return a shortest path. [`Heuristic::Chebyshev`]
/// is exact on an open board and never overestimates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> i32 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Chebyshev => chebyshev(from, to),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        }
    }

    /// The other heuristic.
    pub fn toggle(self) -> Self {
        match self {
            Self::Manhattan => Self::Chebyshev,
            Self::Chebyshev => Self::Manhattan,
        }
    }
}

impl std::str::FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Self::Manhattan),
            "chebyshev" => Ok(Self::Chebyshev),
            other => Err(format!("unknown heuristic `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_on_a_diagonal() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 4);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(Heuristic::default().estimate(a, b), 8);
        assert_eq!(Heuristic::Chebyshev.estimate(b, a), 4);
    }

    #[test]
    fn distances_are_symmetric_and_zero_on_self() {
        let a = Point::new(-2, 7);
        let b = Point::new(3, 1);
        for h in [Heuristic::Manhattan, Heuristic::Chebyshev] {
            assert_eq!(h.estimate(a, b), h.estimate(b, a));
            assert_eq!(h.estimate(a, a), 0);
        }
    }

    #[test]
    fn parse_and_toggle() {
        assert_eq!("Chebyshev".parse::<Heuristic>(), Ok(Heuristic::Chebyshev));
        assert!("euclid".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::Manhattan.toggle(), Heuristic::Chebyshev);
        assert_eq!(Heuristic::Chebyshev.toggle().label(), "manhattan");
    }
}
