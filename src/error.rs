use thiserror::Error;

use crate::grid::Coordinates;

/// Everything that can stop the game loop or its setup.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not install the logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snake bit itself at ({}, {})", .at.x, .at.y)]
    SelfCollision { at: Coordinates },

    #[error("frame limiter stopped the loop after {ticks} tick(s)")]
    TickBudgetExhausted { ticks: u64 },
}
