//! Blocktris — classic falling-block puzzle engine.
//!
//! The engine is clock-free and drawing-free: callers feed timestamps into
//! [`game::GameState::update`], forward player actions, and render the arena
//! and active piece however they like.

pub mod arena;
pub mod config;
pub mod game;
pub mod matrix;
pub mod player;
pub mod shape;

pub use arena::{Arena, Position, Sweep};
pub use config::{ConfigError, GameConfig};
pub use game::{DropResult, GameState, ScoreSink, Spawn};
pub use matrix::{CellValue, Matrix, Rotation};
pub use player::Player;
pub use shape::{PieceKind, ShapeError, create_piece};
