use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::state::{Grid, Position};

/// Random draws per cell before falling back to scanning the free cells
const REJECTION_DRAWS_PER_CELL: usize = 4;

/// The apple the snake is chasing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Place a new apple on a free cell, or `None` if every cell is forbidden
    pub fn spawn<R: Rng + ?Sized>(
        grid: Grid,
        forbidden: &HashSet<Position>,
        rng: &mut R,
    ) -> Option<Self> {
        free_cell(grid, forbidden, rng).map(Self::at)
    }

    /// Move the apple to a random cell outside `forbidden`.
    ///
    /// Returns false, leaving the apple where it was, when no free cell is left.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: Grid,
        forbidden: &HashSet<Position>,
        rng: &mut R,
    ) -> bool {
        match free_cell(grid, forbidden, rng) {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }
}

/// Uniform draw over the free cells.
///
/// Rejection sampling is cheap while the snake is short. Once the draws run
/// out the free cells are enumerated, which keeps a nearly full field bounded.
fn free_cell<R: Rng + ?Sized>(
    grid: Grid,
    forbidden: &HashSet<Position>,
    rng: &mut R,
) -> Option<Position> {
    let (width, height) = grid.extent();
    if width == 0 || height == 0 {
        return None;
    }

    for _ in 0..grid.area().saturating_mul(REJECTION_DRAWS_PER_CELL) {
        let pos = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));

        if !forbidden.contains(&pos) {
            return Some(pos);
        }
    }

    grid.positions()
        .filter(|pos| !forbidden.contains(pos))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_relocate_avoids_forbidden() {
        let grid = Grid::new(10, 10);
        let forbidden: HashSet<_> = (0..10).map(|x| Position::new(x, 5)).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut apple = Apple::at(Position::new(0, 0));

        for _ in 0..500 {
            assert!(apple.relocate(grid, &forbidden, &mut rng));
            assert!(!forbidden.contains(&apple.position()));
            assert!(grid.contains(apple.position()));
        }
    }

    #[test]
    fn test_relocate_finds_last_free_cell() {
        let grid = Grid::new(6, 6);
        let last = Position::new(4, 2);
        let forbidden: HashSet<_> = grid.positions().filter(|&p| p != last).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let mut apple = Apple::at(Position::new(0, 0));

        assert!(apple.relocate(grid, &forbidden, &mut rng));
        assert_eq!(apple.position(), last);
    }

    #[test]
    fn test_relocate_on_full_grid_keeps_apple() {
        let grid = Grid::new(3, 3);
        let forbidden: HashSet<_> = grid.positions().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut apple = Apple::at(Position::new(1, 1));

        assert!(!apple.relocate(grid, &forbidden, &mut rng));
        assert_eq!(apple.position(), Position::new(1, 1));
        assert!(Apple::spawn(grid, &forbidden, &mut rng).is_none());
    }

    #[test]
    fn test_spawn_reaches_every_free_cell() {
        let grid = Grid::new(3, 2);
        let forbidden: HashSet<_> = [Position::new(0, 0)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..300 {
            let apple = Apple::spawn(grid, &forbidden, &mut rng).unwrap();
            seen.insert(apple.position());
        }

        assert_eq!(seen.len(), grid.area() - 1);
    }
}
