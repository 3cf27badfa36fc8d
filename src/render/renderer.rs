use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, Ending, GameState, Position};
use crate::metrics::GameMetrics;

const HEAD_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
const BODY_STYLE: Style = Style::new().fg(Color::Green);
const APPLE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const GRID_STYLE: Style = Style::new().fg(Color::DarkGray);
const LABEL_STYLE: Style = Style::new().fg(Color::Yellow);
const VALUE_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Each cell is two columns wide so the field looks square
const CELL_COLUMNS: u16 = 2;

pub struct Renderer {
    title: String,
}

impl Renderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let columns = u16::try_from(state.grid.width).unwrap_or(u16::MAX);
        let rows = u16::try_from(state.grid.height).unwrap_or(u16::MAX);
        let field_area = centered(
            chunks[1],
            columns.saturating_mul(CELL_COLUMNS).saturating_add(2),
            rows.saturating_add(2),
        );
        frame.render_widget(self.render_grid(state), field_area);

        if let Some(ending) = state.ending() {
            let popup = centered(chunks[1], 34, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state, ending), popup);
        }

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let apple = state.apple.position();
        let occupied = state.snake.occupied();
        let (width, height) = state.grid.extent();

        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let spans: Vec<Span> = (0..width)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled("██", HEAD_STYLE)
                        } else if occupied.contains(&pos) {
                            Span::styled("▓▓", BODY_STYLE)
                        } else if pos == apple {
                            Span::styled("● ", APPLE_STYLE)
                        } else {
                            Span::styled("· ", GRID_STYLE)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border_style = if state.is_running() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Red)
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(border_style)
                .title(format!(" {} ", self.title)),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", LABEL_STYLE),
            Span::styled(state.score.to_string(), VALUE_STYLE),
            Span::raw("    "),
            Span::styled("Length: ", LABEL_STYLE),
            Span::styled(state.snake.len().to_string(), VALUE_STYLE),
            Span::raw("    "),
            Span::styled("Time: ", LABEL_STYLE),
            Span::styled(metrics.format_time(), VALUE_STYLE),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, ending: Ending) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                ending_message(ending),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled("Final Score: ", LABEL_STYLE),
                Span::styled(state.score.to_string(), VALUE_STYLE),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let text = if state.is_running() {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from("")
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn ending_message(ending: Ending) -> &'static str {
    match ending {
        Ending::Collision(CollisionType::Wall) => "The snake hit a wall",
        Ending::Collision(CollisionType::SelfCollision) => "The snake bit itself",
        Ending::BoardFilled => "The board is full!",
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
