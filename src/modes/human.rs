use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, GameConfig, GameEngine, GameLoop, LoopStatus};
use crate::input::InputHandler;
use crate::render::{Chime, Renderer, TerminalPresenter};

type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;
type HumanLoop<'a> = GameLoop<TerminalPresenter<'a, CrosstermBackend<Stderr>>>;

/// Keyboard play in the terminal
pub struct HumanMode {
    engine: GameEngine,
    title: String,
    sound: bool,
    tick_interval: Duration,
    input_handler: InputHandler,
}

impl HumanMode {
    /// Validates `config`; nothing touches the terminal until [`HumanMode::run`]
    pub fn new(config: &GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config)?;
        let tick_interval = engine.rules().tick_interval;

        Ok(Self {
            engine,
            title: config.title.clone(),
            sound: config.sound,
            tick_interval,
            input_handler: InputHandler::new(),
        })
    }

    pub async fn run(self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, SetTitle(&self.title))
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        Self::cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(self, terminal: &mut CrosstermTerminal) -> Result<()> {
        let presenter = TerminalPresenter::new(
            terminal,
            Renderer::new(self.title.clone()),
            Chime::new(self.sound),
        );
        let mut game: HumanLoop<'_> = GameLoop::new(self.engine, presenter);
        game.start()?;

        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately
        tick_timer.tick().await;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => Self::handle_event(&self.input_handler, &mut game, event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => game.push(Action::Quit),
                    }
                }

                // Game logic tick
                _ = tick_timer.tick(), if game.status().is_running() => {
                    game.tick()?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    game.push(Action::Quit);
                }
            }

            if game.status() == LoopStatus::Quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event<B: Backend, W: Write, R: Rng>(
        input_handler: &InputHandler,
        game: &mut GameLoop<TerminalPresenter<'_, B, W>, R>,
        event: Event,
    ) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                // The final frame stays up until any key is pressed
                if let LoopStatus::Finished(_) = game.status() {
                    game.push(Action::Quit);
                    return Ok(());
                }

                if let Some(action) = input_handler.handle_key_event(key) {
                    game.push(action);
                }
            }
            Event::Resize(_, _) => {
                let state = game.state().clone();
                game.presenter_mut().redraw(&state)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Apple, CollisionType, Ending, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::backend::TestBackend;

    type TestLoop<'a> = GameLoop<TerminalPresenter<'a, TestBackend, Vec<u8>>, StdRng>;

    fn test_loop(terminal: &mut Terminal<TestBackend>) -> TestLoop<'_> {
        let engine = GameEngine::with_rng(&GameConfig::small(), StdRng::seed_from_u64(11)).unwrap();
        let presenter = TerminalPresenter::new(
            terminal,
            Renderer::new("Snake"),
            Chime::with_sink(false, Vec::new()),
        );
        let mut game = GameLoop::new(engine, presenter);
        game.state_mut().apple = Apple::at(Position::new(0, 0));
        game
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_mode_initialization() {
        let mode = HumanMode::new(&GameConfig::default()).unwrap();
        assert_eq!(mode.tick_interval, Duration::from_secs(1) / 15);
        assert_eq!(mode.title, "Snake");
    }

    #[test]
    fn test_invalid_config_fails_before_terminal_setup() {
        let config = GameConfig {
            start_head_x: 301,
            ..Default::default()
        };
        let err = HumanMode::new(&config).err().unwrap();
        assert!(err.to_string().contains("not a multiple of the cell size"));
    }

    #[test]
    fn test_keys_steer_while_running() {
        let handler = InputHandler::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        let mut game = test_loop(&mut terminal);

        HumanMode::handle_event(&handler, &mut game, press('x')).unwrap();
        assert_eq!(game.status(), LoopStatus::Running);

        HumanMode::handle_event(&handler, &mut game, press('s')).unwrap();
        game.tick().unwrap();
        assert_eq!(game.state().snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_any_key_after_game_over_quits() {
        let handler = InputHandler::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        let mut game = test_loop(&mut terminal);

        // Straight on into the right wall
        while game.tick().unwrap().is_running() {}
        let wall = LoopStatus::Finished(Ending::Collision(CollisionType::Wall));
        assert_eq!(game.status(), wall);

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        HumanMode::handle_event(&handler, &mut game, release).unwrap();
        assert_eq!(game.status(), wall);

        // Not a movement or quit key, but it still closes the final frame
        HumanMode::handle_event(&handler, &mut game, press('x')).unwrap();
        assert_eq!(game.status(), LoopStatus::Quit);
    }

    #[test]
    fn test_resize_redraws_without_ticking() {
        let handler = InputHandler::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();

        {
            let mut game = test_loop(&mut terminal);
            HumanMode::handle_event(&handler, &mut game, Event::Resize(40, 14)).unwrap();
            assert_eq!(game.status(), LoopStatus::Running);
            assert_eq!(game.state().ticks, 0);
            assert_eq!(game.state().snake.head(), Position::new(5, 5));
        }

        let text = screen(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains(" Snake "));
    }
}
