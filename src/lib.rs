//! Snake game engine.
//!
//! The [`Engine`] owns the whole simulation and is driven from outside: a scheduler calls
//! [`Engine::advance`] with a timestamp every frame, input handlers submit [`Command`]s, and
//! renderers draw the [`Snapshot`]. The `tui` module holds the terminal front end used by the
//! `snekboard` binary.

pub mod clock;
pub mod effects;
pub mod engine;
pub mod geometry;
pub mod rules;
pub mod score;
pub mod snake;
pub mod speed;
pub mod tui;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use engine::{Command, Engine, EngineConfig, GameState, Snapshot};
pub use geometry::{Coordinate, Direction};
pub use rules::CollisionKind;
pub use score::{FileBackend, HighScoreStore, MemoryBackend, ScoreBackend};
pub use snake::Snake;
pub use speed::{tick_interval, Difficulty, SpeedFactor};
