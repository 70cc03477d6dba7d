use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use the_snake::{
    Clock, CollisionPolicy, FrameLimiter, Game, GameConfig, GameDifficulty, GameError, Outcome,
    TerminalInput, TickBudget,
};
use the_snake::input::restore_terminal;

#[derive(Parser)]
#[command(name = "the_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Screen width in pixels
    #[arg(long, default_value_t = the_snake::grid::SCREEN_WIDTH)]
    screen_width: i32,

    /// Screen height in pixels
    #[arg(long, default_value_t = the_snake::grid::SCREEN_HEIGHT)]
    screen_height: i32,

    /// Size of one grid cell in pixels
    #[arg(long, default_value_t = the_snake::grid::GRID_SIZE)]
    grid_size: i32,

    #[arg(long, value_enum, default_value = "medium")]
    difficulty: GameDifficulty,

    /// Frames per second, overrides the difficulty
    #[arg(long)]
    speed: Option<u32>,

    /// What happens when the snake runs into itself
    #[arg(long, value_enum, default_value = "reset")]
    collision: CollisionPolicy,

    /// Let the snake turn straight back onto itself
    #[arg(long)]
    allow_reversal: bool,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long, default_value = "the_snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            grid_size: self.grid_size,
            difficulty: self.difficulty,
            speed: self.speed,
            collision: self.collision,
            reject_reversal: !self.allow_reversal,
            seed: self.seed,
        }
    }
}

type TerminalGame = Game<Box<dyn FrameLimiter>, TerminalInput, Stdout>;

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();

    // the terminal belongs to the board, so logs go to a file
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)?;
    info!("starting the_snake");

    let limiter: Box<dyn FrameLimiter> = match cli.max_ticks {
        Some(ticks) => Box::new(TickBudget::new(Clock::new(), ticks)),
        None => Box::new(Clock::new()),
    };
    let mut game = Game::new(cli.game_config(), limiter, TerminalInput::new()?, io::stdout())?;

    let result = play(&mut game);
    if let Err(e) = &result {
        error!("game stopped: {}", e);
    }
    let outcome = result?;
    display_final_screen(outcome, game.points())?;
    Ok(())
}

fn play(game: &mut TerminalGame) -> Result<Option<Outcome>, GameError> {
    game.events_mut().setup_streams()?;
    // hide the cursor while the board is on screen
    print!("{}[?25l", 27 as char);
    let result = game.run();
    // reset the streams even when the loop or the flush failed
    restore_terminal(&mut io::stdout(), || game.events_mut().reset_streams())?;
    match result {
        Ok(outcome) => Ok(Some(outcome)),
        Err(GameError::TickBudgetExhausted { ticks }) => {
            info!("stopping after {} ticks", ticks);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn display_final_screen(outcome: Option<Outcome>, points: u32) -> io::Result<()> {
    let mut out = io::stdout();
    match outcome {
        Some(Outcome::BoardCleared { .. }) => writeln!(out, "You filled the board!")?,
        _ => writeln!(out, "Game Over!")?,
    }
    writeln!(out, "Final Score: {}", points)?;
    Ok(())
}
