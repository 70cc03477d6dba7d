use clap::ValueEnum;

use crate::error::GameError;
use crate::grid::{Grid, GRID_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, SPEED};

const MIN_GRID_CELLS: i32 = 10;
/// Upper bound on the number of cells a board may have.
const MAX_BOARD_CELLS: i32 = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameDifficulty {
    Easy,
    Medium,
    Hard,
}

impl GameDifficulty {
    pub fn fps(&self) -> u32 {
        match self {
            GameDifficulty::Easy => 10,
            GameDifficulty::Medium => SPEED, // 20 fps
            GameDifficulty::Hard => 30,
        }
    }
}

/// What happens when the head runs into the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// The snake passes through itself.
    Ignore,
    /// The snake shrinks back to its starting cell and the score is cleared.
    Reset,
    /// The game ends.
    Terminate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub grid_size: i32,
    pub difficulty: GameDifficulty,
    /// Overrides the difficulty's frame rate.
    pub speed: Option<u32>,
    pub collision: CollisionPolicy,
    pub reject_reversal: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            grid_size: GRID_SIZE,
            difficulty: GameDifficulty::Medium,
            speed: None,
            collision: CollisionPolicy::Reset,
            reject_reversal: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::from_screen(self.screen_width, self.screen_height, self.grid_size)
    }

    pub fn fps(&self) -> u32 {
        self.speed.unwrap_or_else(|| self.difficulty.fps())
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_size <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "cell size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.screen_width % self.grid_size != 0 || self.screen_height % self.grid_size != 0 {
            return Err(GameError::InvalidConfig(format!(
                "screen {}x{} is not a whole number of {}px cells",
                self.screen_width, self.screen_height, self.grid_size
            )));
        }
        let grid = self.grid();
        if grid.width < MIN_GRID_CELLS || grid.height < MIN_GRID_CELLS {
            return Err(GameError::InvalidConfig(format!(
                "board must be at least {}x{} cells, got {}x{}",
                MIN_GRID_CELLS, MIN_GRID_CELLS, grid.width, grid.height
            )));
        }
        match grid.width.checked_mul(grid.height) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(GameError::InvalidConfig(format!(
                    "board of {}x{} cells is larger than {} cells",
                    grid.width, grid.height, MAX_BOARD_CELLS
                )));
            }
        }
        if self.fps() == 0 {
            return Err(GameError::InvalidConfig("speed must be at least 1 fps".into()));
        }
        Ok(())
    }
}
