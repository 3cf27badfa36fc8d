use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::collision;
use super::state::{Grid, Position};

/// Segments reserved beyond the starting length; longer snakes grow the buffer
const RESERVE_AHEAD: usize = 1024;

/// The snake in the game
///
/// The body is a ring buffer with the head at the front, so a move is one
/// push and at most one pop. Turns are buffered in `pending` and only take
/// effect on the next [`Snake::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: Option<Direction>,
    growing: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        Self::with_capacity(head, direction, length, length)
    }

    /// Like [`Snake::new`], reserving room for up to `capacity` segments
    /// up front
    pub fn with_capacity(
        head: Position,
        direction: Direction,
        length: usize,
        capacity: usize,
    ) -> Self {
        let reserve = capacity.min(length.saturating_add(RESERVE_AHEAD));
        let mut body = VecDeque::with_capacity(reserve.max(length));

        // Lay the body out behind the head
        let behind = direction.reverse();
        let mut segment = head;
        for _ in 0..length.max(1) {
            body.push_back(segment);
            segment = segment.moved_in_direction(behind);
        }

        Self {
            body,
            direction,
            pending: None,
            growing: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn body(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Whether the next move keeps the tail
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Check if any segment sits on `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Every cell the snake covers
    pub fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Buffer a turn for the next move.
    ///
    /// The request is checked against the direction the snake is moving in
    /// now, not against an earlier buffered turn, so no sequence of requests
    /// within one tick can reverse the snake. Returns whether it was taken.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    /// Move one cell: apply the buffered turn, push a new head, drop the tail
    /// unless growth was requested.
    pub fn advance(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }

        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Keep the tail on the next move
    pub fn grow(&mut self) {
        self.growing = true;
    }

    pub fn detect_self_collision(&self) -> bool {
        collision::self_collision(self.body.iter())
    }

    pub fn detect_boundary_collision(&self, grid: Grid) -> bool {
        collision::boundary_collision(self.head(), grid)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true, the body has at least a head)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
