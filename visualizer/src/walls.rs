//! Random wall generation.

use pathviz_search::{Grid as SearchGrid, VisitState};
use rand::distr::{Bernoulli, BernoulliError, Distribution};
use rand::rngs::StdRng;

/// Wall each `Free` cell of `grid` independently with probability
/// `density`. Endpoints, existing walls and search-marked cells are left
/// alone. Returns the number of walls added.
pub fn scatter_walls(
    grid: &mut SearchGrid,
    density: f64,
    rng: &mut StdRng,
) -> Result<usize, BernoulliError> {
    let coin = Bernoulli::new(density)?;
    let free: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.state() == VisitState::Free)
        .map(|c| c.pos())
        .collect();

    let mut added = 0;
    for pos in free {
        if coin.sample(rng) && grid.toggle_obstacle(pos, true).unwrap_or(false) {
            added += 1;
        }
    }
    Ok(added)
}
