use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Difficulty, GRID_SIZE, GameSnapshot, Lifecycle, Position};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Grid is two columns per cell plus borders
        let grid_width = (GRID_SIZE as u16) * 2 + 2;
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(grid_width),
                Constraint::Min(0),
            ])
            .split(chunks[1])[1];

        if snapshot.over {
            frame.render_widget(self.render_game_over(snapshot), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(snapshot.lifecycle()), chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(GRID_SIZE as usize);

        for y in 0..GRID_SIZE {
            let mut spans = Vec::with_capacity(GRID_SIZE as usize);

            for x in 0..GRID_SIZE {
                let pos = Position::new(x, y);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.lifecycle() {
            Lifecycle::Paused => " Snake (paused) ",
            Lifecycle::Ready => " Snake (ready) ",
            _ => " Snake ",
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(
                snapshot.difficulty.as_str(),
                Style::default().fg(difficulty_color(snapshot.difficulty)),
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let new_record = snapshot.score > 0 && snapshot.score >= snapshot.high_score;

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.snake.len().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if new_record {
            text.push(Line::from(""));
            text.push(Line::from(vec![Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to reset or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, lifecycle: Lifecycle) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let mut spans = match lifecycle {
            Lifecycle::Ready => vec![
                Span::styled("Enter", key),
                Span::raw(" to start | "),
                Span::styled("1/2/3", key),
                Span::raw(" difficulty | "),
            ],
            Lifecycle::Playing | Lifecycle::Paused => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Space", key),
                Span::raw(" pause | "),
                Span::styled("R", key),
                Span::raw(" reset | "),
            ],
            Lifecycle::GameOver => vec![Span::styled("R", key), Span::raw(" reset | ")],
        };
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
