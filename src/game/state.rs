use super::action::Direction;
use super::apple::Apple;
use super::collision::CollisionType;
use super::snake::Snake;

/// A position on the game grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The play field, measured in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if a position lies in `[0, width) x [0, height)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && i64::from(pos.x) < i64::from(self.width)
            && pos.y >= 0
            && i64::from(pos.y) < i64::from(self.height)
    }

    /// Number of cells on the field
    pub fn area(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Width and height as coordinates, clamped to `i32::MAX`
    pub fn extent(&self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    /// Every cell, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (width, height) = self.extent();
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The head left the field or ran into the body
    Collision(CollisionType),
    /// The snake covers every cell, so no apple can be placed
    BoardFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver(Ending),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub grid: Grid,
    pub score: u32,
    pub ticks: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, apple: Apple, grid: Grid) -> Self {
        Self {
            snake,
            apple,
            grid,
            score: 0,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The ending, once the game is over
    pub fn ending(&self) -> Option<Ending> {
        match self.phase {
            Phase::Running => None,
            Phase::GameOver(ending) => Some(ending),
        }
    }
}
