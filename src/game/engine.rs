use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::Direction,
    apple::Apple,
    collision,
    config::{GameConfig, Rules},
    error::ConfigError,
    snake::Snake,
    state::{Ending, GameState, Phase},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// How the game ended, if it ended this step
    pub ending: Option<Ending>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    rules: Rules,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Validate `config` and create an engine backed by the thread RNG
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        let rules = config.validate()?;
        Ok(Self { rules, rng })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Build the starting state
    pub fn reset(&mut self) -> GameState {
        let rules = self.rules;
        let snake = Snake::with_capacity(
            rules.start_head,
            rules.start_direction,
            rules.start_length,
            rules.grid.area(),
        );

        match Apple::spawn(rules.grid, &snake.occupied(), &mut self.rng) {
            Some(apple) => GameState::new(snake, apple, rules.grid),
            None => {
                // Validation keeps a free cell, but a full field is still a finished game
                let mut state = GameState::new(snake, Apple::at(rules.start_head), rules.grid);
                state.phase = Phase::GameOver(Ending::BoardFilled);
                state
            }
        }
    }

    /// Execute one tick: apply buffered turns, move, check collisions, then
    /// handle a bite.
    pub fn step<I>(&mut self, state: &mut GameState, turns: I) -> StepResult
    where
        I: IntoIterator<Item = Direction>,
    {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    ending: None,
                },
            };
        }

        for direction in turns {
            state.snake.change_direction(direction);
        }

        state.snake.advance();
        state.ticks += 1;

        // A fatal move never scores, even onto the apple cell
        if let Some(collision_type) = collision::detect(&state.snake, state.grid) {
            return Self::finish(state, Ending::Collision(collision_type), false);
        }

        let ate_apple = collision::bite(state.snake.head(), state.apple.position());
        if ate_apple {
            state.score = state.score.saturating_add(self.rules.score_increment);
            state.snake.grow();

            let forbidden = state.snake.occupied();
            if !state.apple.relocate(state.grid, &forbidden, &mut self.rng) {
                return Self::finish(state, Ending::BoardFilled, true);
            }
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_apple,
                ending: None,
            },
        }
    }

    fn finish(state: &mut GameState, ending: Ending, ate_apple: bool) -> StepResult {
        state.phase = Phase::GameOver(ending);
        StepResult {
            terminated: true,
            info: StepInfo {
                ate_apple,
                ending: Some(ending),
            },
        }
    }
}
