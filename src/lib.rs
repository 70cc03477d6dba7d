//! Terminal Snake: a snake and an apple on a wrapping grid, driven by a
//! fixed-timestep loop.
//!
//! - `grid`: board geometry, directions and colors
//! - `surface`: the frame buffer objects draw into, and the `GameObject` trait
//! - `snake`, `apple`: the two game objects
//! - `input`: terminal keyboard decoding and the per-tick key handler
//! - `clock`: frame limiters
//! - `game`: the loop tying everything together

pub mod apple;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod surface;

pub use apple::Apple;
pub use clock::{Clock, FrameLimiter, ManualClock, TickBudget};
pub use config::{CollisionPolicy, GameConfig, GameDifficulty};
pub use error::GameError;
pub use game::{Game, Outcome};
pub use grid::{Coordinates, Direction, Grid};
pub use input::{
    handle_keys, Control, EventSource, InputEvent, KeyChannel, KeyDecoder, TerminalInput,
};
pub use snake::Snake;
pub use surface::{GameObject, Paint, Surface};
