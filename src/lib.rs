//! Single-player maze escape: a recursive-backtracker maze, a player who
//! must reach the bottom-right exit, and an enemy wandering the corridors.
//!
//! [`Game`] is the entry point. It is driven by three kinds of input:
//! [`Game::start`], [`Game::submit_direction`] and [`Game::on_tick`] for the
//! periodic [`Tick`]s it asks its [`Scheduler`] for. Everything the
//! presentation side needs comes back through [`Game::drain_events`].

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod maze;
pub mod scheduler;
pub mod session;
pub mod spawn;

pub use config::{MazeSize, Settings};
pub use error::{ConfigError, Error};
pub use game::{Event, Game};
pub use grid::{Dir, Grid, Pos, Tile};
pub use maze::{generate_maze, Maze};
pub use scheduler::{IntervalScheduler, Pace, Scheduler, Tick};
pub use session::{Session, Snapshot, Status};
pub use spawn::place_enemy;
