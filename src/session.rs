use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Dir, Grid, Pos};
use crate::maze::{Maze, START};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Active
    }

    pub fn message(self) -> &'static str {
        match self {
            Status::Active => "Navigate the maze and avoid the enemy!",
            Status::Won => "You escaped the maze!",
            Status::Lost => "The enemy caught you! Game over.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub player: Pos,
    pub enemy: Pos,
    pub exit: Pos,
    pub status: Status,
    pub elapsed: u32,
}

#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    player: Pos,
    enemy: Pos,
    enemy_prev: Option<Pos>,
    exit: Pos,
    status: Status,
    elapsed: u32,
}

impl Session {
    pub fn new(maze: Maze, enemy: Pos) -> Self {
        Self {
            grid: maze.grid,
            player: maze.start,
            enemy,
            enemy_prev: None,
            exit: maze.exit,
            status: Status::Active,
            elapsed: 0,
        }
    }

    /// Player at the top-left corner, exit at the bottom-right one. Panics on
    /// an empty grid.
    pub fn with_grid(grid: Grid, enemy: Pos) -> Self {
        let last = grid.size() - 1;
        let exit = Pos::new(last, last);
        Self::new(
            Maze {
                grid,
                start: START,
                exit,
            },
            enemy,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn enemy(&self) -> Pos {
        self.enemy
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            player: self.player,
            enemy: self.enemy,
            exit: self.exit,
            status: self.status,
            elapsed: self.elapsed,
        }
    }

    pub fn attempt_player_move(&mut self, dir: Dir) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        match self.grid.open_step(self.player, dir) {
            Some(next) => {
                self.player = next;
                self.evaluate();
                true
            }
            None => false,
        }
    }

    /// Never steps straight back to the cell it just left, so in a dead end
    /// it waits.
    pub fn tick_enemy(&mut self, rng: &mut impl Rng) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);

        let next = dirs
            .iter()
            .filter_map(|dir| self.grid.open_step(self.enemy, *dir))
            .find(|next| Some(*next) != self.enemy_prev);
        let moved = match next {
            Some(next) => {
                self.enemy_prev = Some(self.enemy);
                self.enemy = next;
                true
            }
            None => false,
        };
        self.evaluate();
        moved
    }

    pub fn tick_clock(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.elapsed += 1;
        true
    }

    // Escaping wins over being caught on the same cell.
    pub fn evaluate(&mut self) -> Status {
        if self.status == Status::Active {
            if self.player == self.exit {
                self.status = Status::Won;
            } else if self.player == self.enemy {
                self.status = Status::Lost;
            }
        }
        self.status
    }
}
