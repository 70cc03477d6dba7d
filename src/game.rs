use std::io::Write;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::apple::Apple;
use crate::clock::FrameLimiter;
use crate::config::{CollisionPolicy, GameConfig};
use crate::error::GameError;
use crate::grid::BOARD_BACKGROUND_COLOR;
use crate::input::{handle_keys, Control, EventSource};
use crate::snake::Snake;
use crate::surface::{GameObject, Surface};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player quit.
    Closed,
    /// The snake bit itself under `CollisionPolicy::Terminate`.
    Collided { points: u32 },
    /// The snake covers the whole board, no room left for an apple.
    BoardCleared { points: u32 },
}

/// The game loop and everything it owns.
pub struct Game<L, E, W> {
    config: GameConfig,
    snake: Snake,
    apple: Apple,
    surface: Surface,
    limiter: L,
    events: E,
    out: W,
    rng: StdRng,
    points: u32,
    ticks: u64,
}

impl<L: FrameLimiter, E: EventSource, W: Write> Game<L, E, W> {
    pub fn new(config: GameConfig, limiter: L, events: E, out: W) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let snake = Snake::new(grid, grid.center()).with_reversal_guard(config.reject_reversal);
        let mut apple = Apple::new(grid, &mut rng);
        apple.randomize_position(&mut rng, Some(snake.positions()));
        Ok(Game {
            config,
            snake,
            apple,
            surface: Surface::new(grid),
            limiter,
            events,
            out,
            rng,
            points: 0,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn apple_mut(&mut self) -> &mut Apple {
        &mut self.apple
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn limiter(&self) -> &L {
        &self.limiter
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs ticks until the game ends. Limiter and I/O errors come out as
    /// they are; a self-collision error becomes `Outcome::Collided`.
    pub fn run(&mut self) -> Result<Outcome, GameError> {
        info!(
            "starting on a {}x{} board at {} fps",
            self.surface.grid().width,
            self.surface.grid().height,
            self.config.fps()
        );
        loop {
            match self.tick() {
                Ok(None) => {}
                Ok(Some(outcome)) => {
                    info!("game over: {:?} after {} ticks", outcome, self.ticks);
                    return Ok(outcome);
                }
                Err(GameError::SelfCollision { at }) => {
                    warn!("snake bit itself at ({}, {}), ending the game", at.x, at.y);
                    return Ok(Outcome::Collided {
                        points: self.points,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One frame: wait, read input, move, eat, collide, redraw.
    pub fn tick(&mut self) -> Result<Option<Outcome>, GameError> {
        self.limiter.tick(self.config.fps())?;
        self.ticks += 1;

        if handle_keys(&mut self.events, &mut self.snake) == Control::Close {
            return Ok(Some(Outcome::Closed));
        }
        self.snake.update_direction();
        self.snake.move_snake();

        if self.snake.head() == self.apple.position() {
            self.snake.grow();
            self.points += 1;
            info!("apple eaten, {} point(s)", self.points);
            if self
                .apple
                .randomize_position(&mut self.rng, Some(self.snake.positions()))
                .is_none()
            {
                self.draw()?;
                return Ok(Some(Outcome::BoardCleared {
                    points: self.points,
                }));
            }
        }

        if self.snake.bites_itself() {
            match self.config.collision {
                CollisionPolicy::Ignore => {}
                CollisionPolicy::Reset => {
                    warn!(
                        "snake bit itself at length {}, starting over",
                        self.snake.len()
                    );
                    self.snake.reset();
                    self.points = 0;
                }
                CollisionPolicy::Terminate => {
                    return Err(GameError::SelfCollision {
                        at: self.snake.head(),
                    });
                }
            }
        }

        self.draw()?;
        Ok(None)
    }

    fn draw(&mut self) -> Result<(), GameError> {
        self.surface.fill(BOARD_BACKGROUND_COLOR);
        self.snake.draw(&mut self.surface);
        self.apple.draw(&mut self.surface);
        self.surface
            .present(&mut self.out, &format!("Points: {}", self.points))?;
        Ok(())
    }
}
