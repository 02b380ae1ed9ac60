//! Recursive-backtracker maze carving and exit placement.
//!
//! Carving walks a lattice of cells with even coordinates starting at the
//! top-left corner. Odd sizes put the bottom-right corner on that lattice;
//! for even sizes the last row and column are never carved and the exit is
//! linked in by `place_exit`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MazeSize;
use crate::grid::{Dir, Grid, Pos, Tile};

pub const START: Pos = Pos::new(0, 0);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
}

pub fn generate_maze(rng: &mut impl Rng, size: MazeSize) -> Maze {
    let mut grid = carve(rng, size.get());
    let exit = place_exit(&mut grid);
    Maze {
        grid,
        start: START,
        exit,
    }
}

// `size` is at least 1.
fn carve(rng: &mut impl Rng, size: usize) -> Grid {
    let mut grid = Grid::filled(size, Tile::Wall);
    grid.set_cell(START, Tile::Path);

    let mut stack = vec![START];
    let mut current = START;
    while !stack.is_empty() {
        let neighbors = unvisited_neighbors(&grid, current);
        match neighbors.choose(rng) {
            Some(&next) => {
                carve_between(&mut grid, current, next);
                grid.set_cell(next, Tile::Path);
                stack.push(current);
                current = next;
            }
            None => {
                if let Some(prev) = stack.pop() {
                    current = prev;
                }
            }
        }
    }
    grid
}

fn unvisited_neighbors(grid: &Grid, cell: Pos) -> Vec<Pos> {
    Dir::ALL
        .iter()
        .filter_map(|dir| grid.offset(cell, *dir, 2))
        .filter(|pos| grid.cell_at(*pos) == Tile::Wall)
        .collect()
}

fn carve_between(grid: &mut Grid, a: Pos, b: Pos) {
    grid.set_cell(a.midpoint(b), Tile::Path);
}

/// Marks the bottom-right corner as the exit, first linking it to the maze
/// when neither its upper nor its left neighbour is open.
fn place_exit(grid: &mut Grid) -> Pos {
    let last = grid.size() - 1;
    let exit = Pos::new(last, last);
    grid.set_cell(exit, Tile::Path);

    let up = grid.offset(exit, Dir::Up, 1);
    let left = grid.offset(exit, Dir::Left, 1);
    let connected = [up, left]
        .into_iter()
        .flatten()
        .any(|pos| grid.cell_at(pos) == Tile::Path);

    if !connected {
        let link = up
            .filter(|pos| grid.cell_at(*pos) == Tile::Wall)
            .or_else(|| left.filter(|pos| grid.cell_at(*pos) == Tile::Wall));
        if let Some(link) = link {
            grid.set_cell(link, Tile::Path);
            carve_between(grid, link, exit);
        }
    }

    grid.set_cell(exit, Tile::Exit);
    exit
}
