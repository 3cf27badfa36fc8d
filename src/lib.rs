//! Classic Snake - grid snake for the terminal
//!
//! This library provides:
//! - Core game logic and the tick loop (game module)
//! - Keyboard input mapping (input module)
//! - TUI rendering and sound cues (render module)
//! - Session metrics shown in the header (metrics module)
//! - Keyboard play (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
