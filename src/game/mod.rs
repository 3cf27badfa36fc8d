//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drawing and sound go through the [`Presenter`] trait.

pub mod action;
pub mod apple;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod game_loop;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use apple::Apple;
pub use collision::CollisionType;
pub use config::{GameConfig, MAX_GRID_SIDE, Rules};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::ConfigError;
pub use game_loop::{GameEvent, GameLoop, LoopStatus, Presenter};
pub use snake::Snake;
pub use state::{Ending, GameState, Grid, Phase, Position};
