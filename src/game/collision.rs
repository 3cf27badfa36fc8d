//! Pure collision and bite predicates.
//!
//! Nothing here mutates state; the engine calls these right after each move.

use super::snake::Snake;
use super::state::{Grid, Position};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// The head is on the apple
pub fn bite(head: Position, apple: Position) -> bool {
    head == apple
}

/// The first segment shares a cell with any later segment
pub fn self_collision<'a, I>(body: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut segments = body.into_iter();
    match segments.next() {
        Some(head) => segments.any(|segment| segment == head),
        None => false,
    }
}

/// The head is outside the field
pub fn boundary_collision(head: Position, grid: Grid) -> bool {
    !grid.contains(head)
}

/// Wall is checked before self, so a head that leaves the field is always a wall hit
pub fn detect(snake: &Snake, grid: Grid) -> Option<CollisionType> {
    if boundary_collision(snake.head(), grid) {
        Some(CollisionType::Wall)
    } else if self_collision(snake.body()) {
        Some(CollisionType::SelfCollision)
    } else {
        None
    }
}
