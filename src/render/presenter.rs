use std::io::{Stderr, Write};

use anyhow::{Context, Result};
use ratatui::{Terminal, backend::Backend};

use super::renderer::Renderer;
use super::sound::{Chime, SoundCue};
use crate::game::{GameEvent, GameState, Presenter};
use crate::metrics::GameMetrics;

/// Draws each tick to a ratatui terminal and rings cues
pub struct TerminalPresenter<'a, B: Backend, W: Write = Stderr> {
    terminal: &'a mut Terminal<B>,
    renderer: Renderer,
    chime: Chime<W>,
    metrics: GameMetrics,
}

impl<'a, B: Backend, W: Write> TerminalPresenter<'a, B, W> {
    pub fn new(terminal: &'a mut Terminal<B>, renderer: Renderer, chime: Chime<W>) -> Self {
        Self {
            terminal,
            renderer,
            chime,
            metrics: GameMetrics::new(),
        }
    }

    /// Draw again without advancing anything, e.g. after a resize
    pub fn redraw(&mut self, state: &GameState) -> Result<()> {
        self.metrics.update();
        let renderer = &self.renderer;
        let metrics = &self.metrics;
        self.terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn chime(&self) -> &Chime<W> {
        &self.chime
    }
}

impl<B: Backend, W: Write> Presenter for TerminalPresenter<'_, B, W> {
    fn present(&mut self, state: &GameState, events: &[GameEvent]) -> Result<()> {
        for event in events {
            let cue = match event {
                GameEvent::Bite => {
                    self.metrics.on_bite();
                    SoundCue::Bite
                }
                GameEvent::GameOver(_) => {
                    self.metrics.on_game_over();
                    SoundCue::Crash
                }
            };
            self.chime.play(cue).context("Failed to play sound cue")?;
        }

        self.redraw(state)
    }
}
