mod render;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::error;

use maze_game::{Dir, Error, Event, Game, IntervalScheduler, MazeSize, Settings, Snapshot, Status};

use crate::render::Renderer;

const HELP: &str = "(arrows/hjkl move, n restart, 1/2/3 size, q quit)";

/// What the screen currently shows, assembled from game events.
struct Screen {
    snapshot: Option<Snapshot>,
    status: Status,
    elapsed: u32,
}

impl Screen {
    fn new() -> Self {
        Self {
            snapshot: None,
            status: Status::Active,
            elapsed: 0,
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Render(snapshot) => self.snapshot = Some(snapshot),
            Event::Status(status) => self.status = status,
            Event::Elapsed(seconds) => self.elapsed = seconds,
        }
    }

    fn hud(&self) -> String {
        format!("Time: {}s  {}  {}", self.elapsed, self.status.message(), HELP)
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let settings = Settings::from_env()?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(err) = &result {
        error!("{err}");
    }
    result
}

fn run(stdout: &mut Stdout, settings: Settings) -> Result<(), Error> {
    let mut game = Game::with_pace(IntervalScheduler::new(), rand::thread_rng(), settings.pace);
    let mut size = settings.size;
    game.start_sized(size);

    let mut screen = Screen::new();
    let mut renderer = Renderer::new();
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let TermEvent::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('n') | KeyCode::Enter => game.start_sized(size),
                KeyCode::Char(preset @ '1'..='3') => {
                    size = match preset {
                        '1' => MazeSize::SMALL,
                        '2' => MazeSize::MEDIUM,
                        _ => MazeSize::LARGE,
                    };
                    game.start_sized(size);
                }
                code => {
                    if let Some(dir) = dir_for_key(code) {
                        game.submit_direction(dir);
                    }
                }
            }
        }

        let due = game.scheduler_mut().due(Instant::now());
        for tick in due {
            game.on_tick(tick);
        }
        for event in game.drain_events() {
            screen.apply(event);
        }
        if let Some(snapshot) = &screen.snapshot {
            renderer.render(stdout, snapshot, &screen.hud())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}
