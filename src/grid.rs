use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Path,
    /// Terminal marker. Walkable like `Path`.
    Exit,
}

impl Tile {
    fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Path => '.',
            Tile::Exit => 'E',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Cell halfway between two lattice cells. For adjacent cells this
    /// rounds down onto the lower-indexed one.
    pub fn midpoint(self, other: Pos) -> Pos {
        Pos {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// `(row, col)` offset of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Square, row-major maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn filled(size: usize, tile: Tile) -> Self {
        Self {
            size,
            tiles: vec![vec![tile; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_at(&self, pos: Pos) -> Tile {
        self.tiles[pos.row][pos.col]
    }

    pub fn set_cell(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.row][pos.col] = tile;
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn is_traversable(&self, row: isize, col: isize) -> bool {
        self.in_bounds(row, col) && self.tiles[row as usize][col as usize] != Tile::Wall
    }

    /// `pos` moved `by` cells along `dir`, if that lands inside the grid.
    pub fn offset(&self, pos: Pos, dir: Dir, by: isize) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row as isize + dr * by;
        let col = pos.col as isize + dc * by;
        if self.in_bounds(row, col) {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Neighbour one step along `dir` that is in bounds and not a wall.
    pub fn open_step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row as isize + dr;
        let col = pos.col as isize + dc;
        self.is_traversable(row, col)
            .then(|| Pos::new(row as usize, col as usize))
    }

    /// Every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .map(move |(col, tile)| (Pos::new(row, col), *tile))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.tiles.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("grid text is empty")]
    Empty,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("unknown tile {symbol:?} at row {row}, column {col}")]
    UnknownTile { symbol: char, row: usize, col: usize },
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(GridParseError::Empty);
        }
        let size = lines.len();
        let mut tiles = Vec::with_capacity(size);
        for (row, line) in lines.iter().enumerate() {
            let mut parsed = Vec::with_capacity(size);
            for (col, symbol) in line.chars().enumerate() {
                let tile = match symbol {
                    '#' => Tile::Wall,
                    '.' => Tile::Path,
                    'E' => Tile::Exit,
                    _ => return Err(GridParseError::UnknownTile { symbol, row, col }),
                };
                parsed.push(tile);
            }
            if parsed.len() != size {
                return Err(GridParseError::NotSquare {
                    row,
                    len: parsed.len(),
                    size,
                });
            }
            tiles.push(parsed);
        }
        Ok(Self { size, tiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversable_excludes_walls_and_out_of_bounds() {
        let grid: Grid = "
            .#
            #E
        "
        .parse()
        .unwrap();
        assert!(grid.is_traversable(0, 0));
        assert!(!grid.is_traversable(0, 1));
        assert!(grid.is_traversable(1, 1));
        assert!(!grid.is_traversable(-1, 0));
        assert!(!grid.is_traversable(0, 2));
        assert!(!grid.in_bounds(2, 0));
    }

    #[test]
    fn open_step_stops_at_edges_and_walls() {
        let grid: Grid = "..\n#.".parse().unwrap();
        let origin = Pos::new(0, 0);
        assert_eq!(grid.open_step(origin, Dir::Right), Some(Pos::new(0, 1)));
        assert_eq!(grid.open_step(origin, Dir::Down), None);
        assert_eq!(grid.open_step(origin, Dir::Up), None);
        assert_eq!(grid.open_step(origin, Dir::Left), None);
    }

    #[test]
    fn text_form_round_trips() {
        let text = "..#\n#.#\n..E";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell_at(Pos::new(2, 2)), Tile::Exit);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!("".parse::<Grid>(), Err(GridParseError::Empty));
        assert_eq!(
            "..\n.".parse::<Grid>(),
            Err(GridParseError::NotSquare { row: 1, len: 1, size: 2 })
        );
        assert_eq!(
            ".x\n..".parse::<Grid>(),
            Err(GridParseError::UnknownTile { symbol: 'x', row: 0, col: 1 })
        );
    }

    #[test]
    fn midpoint_of_lattice_neighbours() {
        assert_eq!(Pos::new(2, 4).midpoint(Pos::new(2, 2)), Pos::new(2, 3));
        assert_eq!(Pos::new(3, 4).midpoint(Pos::new(4, 4)), Pos::new(3, 4));
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(3, 4)), 7);
    }
}
