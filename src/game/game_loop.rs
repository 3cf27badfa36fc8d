use std::collections::VecDeque;

use anyhow::Result;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::{Action, Direction},
    engine::GameEngine,
    state::{Ending, GameState},
};

/// Something worth a sound cue or an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Bite,
    GameOver(Ending),
}

/// Draws the state and plays cues; called once per tick
pub trait Presenter {
    fn present(&mut self, state: &GameState, events: &[GameEvent]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    /// The game ended and the final frame has been presented
    Finished(Ending),
    /// The player asked to quit
    Quit,
}

impl LoopStatus {
    pub fn is_running(&self) -> bool {
        *self == LoopStatus::Running
    }
}

/// Owns the game for one session and runs the tick sequence:
/// drain input, step the engine, present.
pub struct GameLoop<P, R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    presenter: P,
    inputs: VecDeque<Direction>,
    status: LoopStatus,
}

impl<P: Presenter, R: Rng> GameLoop<P, R> {
    pub fn new(mut engine: GameEngine<R>, presenter: P) -> Self {
        let state = engine.reset();
        let status = match state.ending() {
            Some(ending) => LoopStatus::Finished(ending),
            None => LoopStatus::Running,
        };

        Self {
            engine,
            state,
            presenter,
            inputs: VecDeque::new(),
            status,
        }
    }

    /// Present the starting frame
    pub fn start(&mut self) -> Result<()> {
        tracing::info!(
            grid_width = self.state.grid.width,
            grid_height = self.state.grid.height,
            "game started"
        );
        self.presenter.present(&self.state, &[])
    }

    /// Queue input for the next tick. Quit takes effect right away.
    pub fn push(&mut self, action: Action) {
        match action {
            Action::Turn(direction) => {
                if self.status.is_running() {
                    self.inputs.push_back(direction);
                }
            }
            Action::Quit => {
                tracing::info!(score = self.state.score, "player quit");
                self.status = LoopStatus::Quit;
                self.inputs.clear();
            }
        }
    }

    /// Run one tick. Does nothing once the loop has stopped.
    pub fn tick(&mut self) -> Result<LoopStatus> {
        if !self.status.is_running() {
            return Ok(self.status);
        }

        let result = self.engine.step(&mut self.state, self.inputs.drain(..));

        let mut events = Vec::with_capacity(2);
        if result.info.ate_apple {
            tracing::debug!(score = self.state.score, "apple eaten");
            events.push(GameEvent::Bite);
        }
        if let Some(ending) = result.info.ending {
            tracing::info!(
                ?ending,
                score = self.state.score,
                length = self.state.snake.len(),
                ticks = self.state.ticks,
                "game over"
            );
            events.push(GameEvent::GameOver(ending));
            self.status = LoopStatus::Finished(ending);
        }

        self.presenter.present(&self.state, &events)?;
        Ok(self.status)
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Apple, GameConfig, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        events: Vec<GameEvent>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, _state: &GameState, events: &[GameEvent]) -> Result<()> {
            self.frames += 1;
            self.events.extend_from_slice(events);
            Ok(())
        }
    }

    fn game_loop() -> GameLoop<Recorder, StdRng> {
        let engine = GameEngine::with_rng(&GameConfig::small(), StdRng::seed_from_u64(5)).unwrap();
        let mut game = GameLoop::new(engine, Recorder::default());
        game.state_mut().apple = Apple::at(Position::new(0, 0));
        game
    }

    #[test]
    fn test_start_presents_once() {
        let mut game = game_loop();
        game.start().unwrap();
        assert_eq!(game.presenter().frames, 1);
        assert!(game.presenter().events.is_empty());
    }

    #[test]
    fn test_inputs_are_drained_each_tick() {
        let mut game = game_loop();
        game.push(Action::Turn(Direction::Down));
        game.tick().unwrap();
        assert_eq!(game.state().snake.head(), Position::new(5, 6));

        // Nothing queued, keeps going down
        game.tick().unwrap();
        assert_eq!(game.state().snake.head(), Position::new(5, 7));
        assert_eq!(game.presenter().frames, 2);
    }

    #[test]
    fn test_quit_stops_immediately() {
        let mut game = game_loop();
        game.push(Action::Turn(Direction::Up));
        game.push(Action::Quit);

        assert_eq!(game.status(), LoopStatus::Quit);
        assert_eq!(game.tick().unwrap(), LoopStatus::Quit);
        assert_eq!(game.state().ticks, 0);
        assert_eq!(game.presenter().frames, 0);
    }

    #[test]
    fn test_game_over_presents_final_frame_then_halts() {
        let mut game = game_loop();

        // Head at (5,5) moving right: (6..=9, 5) are safe, the fifth tick hits the wall
        let mut status = LoopStatus::Running;
        while status.is_running() {
            status = game.tick().unwrap();
        }

        assert!(matches!(status, LoopStatus::Finished(Ending::Collision(_))));
        assert_eq!(game.state().ticks, 5);
        assert_eq!(game.presenter().frames, 5);
        assert!(matches!(
            game.presenter().events.last(),
            Some(GameEvent::GameOver(_))
        ));

        assert_eq!(game.tick().unwrap(), status);
        assert_eq!(game.presenter().frames, 5);
    }
}
