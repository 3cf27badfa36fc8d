use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::ConfigError;
use super::state::{Grid, Position};

/// Largest field side, in cells, the game accepts
pub const MAX_GRID_SIDE: u32 = 1024;

/// Configuration for the game
///
/// Field size and the start position are in pixels and must line up with
/// `cell_size`; [`GameConfig::validate`] turns them into cell units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Title shown on the field border and the terminal
    pub title: String,
    /// Width of the play field in pixels
    pub field_width: u32,
    /// Height of the play field in pixels
    pub field_height: u32,
    /// Side of one square grid cell in pixels
    pub cell_size: u32,
    /// Pixel x of the snake's head at start
    pub start_head_x: u32,
    /// Pixel y of the snake's head at start
    pub start_head_y: u32,
    pub start_direction: Direction,
    /// Initial length of the snake
    pub start_length: usize,
    /// Points per apple
    pub score_increment: u32,
    /// Ticks per second
    pub frames_per_second: u32,
    /// Ring the terminal bell on bites and crashes
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            field_width: 600,
            field_height: 600,
            cell_size: 15,
            start_head_x: 300,
            start_head_y: 300,
            start_direction: Direction::Right,
            start_length: 3,
            score_increment: 10,
            frames_per_second: 15,
            sound: true,
        }
    }
}

/// Validated game rules, in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub grid: Grid,
    pub start_head: Position,
    pub start_direction: Direction,
    pub start_length: usize,
    pub score_increment: u32,
    pub tick_interval: Duration,
}

impl GameConfig {
    /// Create a configuration for a field of `width` x `height` cells,
    /// starting the snake in the middle
    pub fn with_cells(width: u32, height: u32) -> Self {
        let defaults = Self::default();
        let cell = defaults.cell_size;
        Self {
            field_width: width * cell,
            field_height: height * cell,
            start_head_x: width / 2 * cell,
            start_head_y: height / 2 * cell,
            ..defaults
        }
    }

    /// A 10x10 field for tests and quick games
    pub fn small() -> Self {
        Self::with_cells(10, 10)
    }

    /// Read a JSON config file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Check that the field and the start position sit on the cell grid
    /// and convert everything to cell units.
    pub fn validate(&self) -> Result<Rules, ConfigError> {
        let cell_size = self.cell_size;
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.field_width % cell_size != 0 || self.field_height % cell_size != 0 {
            return Err(ConfigError::FieldNotAligned {
                width: self.field_width,
                height: self.field_height,
                cell_size,
            });
        }

        if self.field_width == 0 || self.field_height == 0 {
            return Err(ConfigError::EmptyField {
                width: self.field_width,
                height: self.field_height,
            });
        }

        if self.start_head_x % cell_size != 0 || self.start_head_y % cell_size != 0 {
            return Err(ConfigError::StartNotAligned {
                x: self.start_head_x,
                y: self.start_head_y,
                cell_size,
            });
        }

        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }

        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let grid = Grid::new(self.field_width / cell_size, self.field_height / cell_size);
        if grid.width > MAX_GRID_SIDE || grid.height > MAX_GRID_SIDE {
            return Err(ConfigError::FieldTooLarge {
                width: grid.width,
                height: grid.height,
                max: MAX_GRID_SIDE,
            });
        }

        let start_head = Position::new(
            (self.start_head_x / cell_size) as i32,
            (self.start_head_y / cell_size) as i32,
        );

        // Every starting segment, not just the head, has to be on the field
        let tail_offset = self.start_length as i64 - 1;
        let (dx, dy) = self.start_direction.reverse().delta();
        let tail_x = i64::from(start_head.x) + i64::from(dx) * tail_offset;
        let tail_y = i64::from(start_head.y) + i64::from(dy) * tail_offset;
        let fits = |x: i64, y: i64| {
            (0..i64::from(grid.width)).contains(&x) && (0..i64::from(grid.height)).contains(&y)
        };
        if !fits(start_head.x.into(), start_head.y.into()) || !fits(tail_x, tail_y) {
            return Err(ConfigError::StartOutsideField {
                x: start_head.x,
                y: start_head.y,
                length: self.start_length,
            });
        }

        if self.start_length >= grid.area() {
            return Err(ConfigError::NoRoomForApple {
                length: self.start_length,
            });
        }

        Ok(Rules {
            grid,
            start_head,
            start_direction: self.start_direction,
            start_length: self.start_length,
            score_increment: self.score_increment,
            tick_interval: Duration::from_secs(1) / self.frames_per_second,
        })
    }
}
