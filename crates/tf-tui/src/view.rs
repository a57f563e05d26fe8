//! Drawing: title bar, transcript, input field and status line.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::pump::PumpState;

/// Visual style of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// A line the player entered (yellow, bold).
    Command,
    /// Text rendered by the logic thread (white).
    Narration,
    /// Pump messages such as the end-of-page marker (cyan, italic).
    System,
}

/// A single transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Visual style of this line.
    pub style: OutputStyle,
    /// The text content.
    pub text: String,
}

impl OutputLine {
    /// Create a line.
    pub fn new(style: OutputStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(format!(" {}", app.pump().title())).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, chunks[0]);

    draw_transcript(frame, app, chunks[1]);
    draw_input(frame, app, chunks[2]);

    let status = Paragraph::new(status_hint(app.pump().state()))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[3]);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .pump()
        .transcript()
        .iter()
        .map(|ol| {
            let (color, modifier) = match ol.style {
                OutputStyle::Command => (Color::Yellow, Modifier::BOLD),
                OutputStyle::Narration => (Color::White, Modifier::empty()),
                OutputStyle::System => (Color::Cyan, Modifier::ITALIC),
            };
            Line::from(Span::styled(
                ol.text.as_str(),
                Style::default().fg(color).add_modifier(modifier),
            ))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: u16 = lines
        .iter()
        .map(|l| {
            if inner_width == 0 {
                1
            } else {
                l.width().max(1).div_ceil(inner_width) as u16
            }
        })
        .sum();

    let visible_height = area.height.saturating_sub(2);
    let max_scroll = total_wrapped.saturating_sub(visible_height);
    let scroll = max_scroll.saturating_sub(app.output_scroll());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let live = app.pump().accepts_input();
    let (border, text) = if live {
        (Color::Green, Color::White)
    } else {
        (Color::DarkGray, Color::DarkGray)
    };

    let input = Paragraph::new(format!("> {}", app.input_text()))
        .style(Style::default().fg(text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(input, area);

    if live {
        let cursor_x = area.x + 1 + 2 + app.input_cursor() as u16;
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}

fn status_hint(state: PumpState) -> &'static str {
    match state {
        PumpState::Idle => "Enter:send  Esc:clear  \u{2191}\u{2193}:scroll  Ctrl+C:quit",
        PumpState::Animating => "Enter:skip  \u{2191}\u{2193}:scroll  Ctrl+C:quit",
        PumpState::PageWait => "Enter:continue  Ctrl+C:quit",
    }
}
