use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::scheduler::{Pace, ENEMY_TICK};

pub const MAX_MAZE_SIZE: usize = 4095;
pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Side length of a maze, validated to `1..=MAX_MAZE_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MazeSize(usize);

impl MazeSize {
    pub const SMALL: MazeSize = MazeSize(11);
    pub const MEDIUM: MazeSize = MazeSize(21);
    pub const LARGE: MazeSize = MazeSize(31);

    pub fn new(size: i64) -> Result<Self, ConfigError> {
        if size < 1 {
            return Err(ConfigError::NonPositive(size));
        }
        match usize::try_from(size) {
            Ok(n) if n <= MAX_MAZE_SIZE => Ok(Self(n)),
            _ => Err(ConfigError::TooLarge {
                size,
                max: MAX_MAZE_SIZE,
            }),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MazeSize {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<i64> for MazeSize {
    type Error = ConfigError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl FromStr for MazeSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "small" => return Ok(Self::SMALL),
            "medium" => return Ok(Self::MEDIUM),
            "large" => return Ok(Self::LARGE),
            _ => {}
        }
        let size = s
            .parse::<i64>()
            .map_err(|_| ConfigError::NotAnInteger(s.to_string()))?;
        Self::new(size)
    }
}

/// Settings for the terminal front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub size: MazeSize,
    pub pace: Pace,
    pub render_fps: u64,
}

impl Settings {
    /// Reads `MAZE_SIZE`, `MAZE_ENEMY_MS` and `MAZE_FPS`. A bad size is an
    /// error; bad speeds fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let size = match lookup("MAZE_SIZE") {
            Some(raw) => raw.parse()?,
            None => MazeSize::default(),
        };
        let enemy_ms = positive(lookup("MAZE_ENEMY_MS"))
            .unwrap_or(ENEMY_TICK.as_millis() as u64);
        let render_fps = positive(lookup("MAZE_FPS")).unwrap_or(DEFAULT_RENDER_FPS);
        Ok(Self {
            size,
            pace: Pace {
                enemy: Duration::from_millis(enemy_ms),
                ..Pace::default()
            },
            render_fps,
        })
    }
}

fn positive(raw: Option<String>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}
