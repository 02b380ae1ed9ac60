use std::io;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze size {0:?} is not an integer or a preset (small, medium, large)")]
    NotAnInteger(String),
    #[error("maze size must be at least 1, got {0}")]
    NonPositive(i64),
    #[error("maze size {size} exceeds the maximum of {max}")]
    TooLarge { size: i64, max: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
