use log::{debug, info, warn};
use rand::Rng;

use crate::config::MazeSize;
use crate::error::ConfigError;
use crate::grid::Dir;
use crate::maze::generate_maze;
use crate::scheduler::{Pace, Scheduler, Tick};
use crate::session::{Session, Snapshot, Status};
use crate::spawn::place_enemy;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Render(Snapshot),
    Status(Status),
    Elapsed(u32),
}

/// Hosts one session at a time and the timers that drive it.
pub struct Game<S, R> {
    scheduler: S,
    rng: R,
    pace: Pace,
    session: Option<Session>,
    events: Vec<Event>,
}

impl<S: Scheduler, R: Rng> Game<S, R> {
    pub fn new(scheduler: S, rng: R) -> Self {
        Self::with_pace(scheduler, rng, Pace::default())
    }

    pub fn with_pace(scheduler: S, rng: R, pace: Pace) -> Self {
        Self {
            scheduler,
            rng,
            pace,
            session: None,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Validates `size` and, if it is acceptable, throws away the current
    /// session and its timers and begins a fresh one.
    pub fn start(&mut self, size: i64) -> Result<(), ConfigError> {
        let size = MazeSize::new(size).inspect_err(|err| warn!("rejected start: {err}"))?;
        self.start_sized(size);
        Ok(())
    }

    pub fn start_sized(&mut self, size: MazeSize) {
        self.cancel_all();
        self.session = None;

        let maze = generate_maze(&mut self.rng, size);
        let enemy = place_enemy(&mut self.rng, &maze.grid, maze.start, maze.exit);
        info!(
            "new {0}x{0} maze, enemy at ({1}, {2})",
            size.get(),
            enemy.row,
            enemy.col
        );
        let mut session = Session::new(maze, enemy);

        self.scheduler.schedule(Tick::Enemy, self.pace.enemy);
        self.scheduler.schedule(Tick::Clock, self.pace.clock);
        self.events.push(Event::Elapsed(0));
        self.events.push(Event::Status(Status::Active));

        let status = session.evaluate();
        self.session = Some(session);
        self.after_change(status);
    }

    pub fn submit_direction(&mut self, dir: Dir) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.attempt_player_move(dir) {
            let status = session.status();
            self.after_change(status);
        } else {
            debug!("move {dir:?} rejected");
        }
    }

    pub fn on_tick(&mut self, tick: Tick) {
        match tick {
            Tick::Enemy => self.tick_enemy(),
            Tick::Clock => self.tick_clock(),
        }
    }

    fn tick_enemy(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.status().is_terminal() {
            return;
        }
        let moved = session.tick_enemy(&mut self.rng);
        let status = session.status();
        if !moved {
            debug!("enemy waits at ({}, {})", session.enemy().row, session.enemy().col);
        }
        if moved || status.is_terminal() {
            self.after_change(status);
        }
    }

    fn tick_clock(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.tick_clock() {
            self.events.push(Event::Elapsed(session.elapsed()));
            self.events.push(Event::Render(session.snapshot()));
        }
    }

    pub fn cancel_all(&mut self) {
        self.scheduler.cancel_all();
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn after_change(&mut self, status: Status) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.events.push(Event::Render(session.snapshot()));
        if status.is_terminal() {
            match status {
                Status::Won => info!("player escaped after {}s", session.elapsed()),
                _ => info!("player caught after {}s", session.elapsed()),
            }
            self.scheduler.cancel_all();
            self.events.push(Event::Status(status));
        }
    }
}
