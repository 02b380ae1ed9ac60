use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Pos, Tile};

/// Picks the enemy's starting cell.
///
/// Candidates are `Path` cells other than the player start and the exit that
/// sit at least `size / 2` steps (Manhattan) from both. Spacing is best
/// effort: with no candidate the enemy lands on the grid centre whatever that
/// cell holds.
pub fn place_enemy(rng: &mut impl Rng, grid: &Grid, player: Pos, exit: Pos) -> Pos {
    let min_distance = grid.size() / 2;
    let candidates: Vec<Pos> = grid
        .cells()
        .filter(|(pos, tile)| *tile == Tile::Path && *pos != player && *pos != exit)
        .map(|(pos, _)| pos)
        .filter(|pos| pos.manhattan(player) >= min_distance && pos.manhattan(exit) >= min_distance)
        .collect();

    let mid = grid.size() / 2;
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(Pos::new(mid, mid))
}
