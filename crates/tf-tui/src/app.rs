//! Application state: the pump, the input field and the channel to the logic
//! thread.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tf_core::{PlayerInput, PresentationEnd};

use crate::pump::{Pump, PumpState};

/// The terminal front end.
pub struct App {
    pump: Pump,
    channel: PresentationEnd,
    /// Current input text.
    input_text: String,
    /// Cursor position within input text.
    input_cursor: usize,
    /// Scroll offset from the bottom.
    output_scroll: u16,
    /// Whether the event loop should stop.
    pub should_quit: bool,
}

impl App {
    /// Create an app talking to the logic thread through `channel`.
    pub fn new(channel: PresentationEnd) -> Self {
        Self {
            pump: Pump::new(),
            channel,
            input_text: String::new(),
            input_cursor: 0,
            output_scroll: 0,
            should_quit: false,
        }
    }

    /// The presentation pump.
    pub fn pump(&self) -> &Pump {
        &self.pump
    }

    /// Text in the input field.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Cursor byte offset in the input field.
    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    /// Transcript scroll offset from the bottom.
    pub fn output_scroll(&self) -> u16 {
        self.output_scroll
    }

    /// Pull new directives and advance the pump.
    pub fn update(&mut self, now: Instant) {
        while !self.pump.logic_ended() {
            match self.channel.try_directive() {
                Ok(Some(directive)) => self.pump.push(directive),
                Ok(None) => break,
                Err(_) => {
                    tracing::debug!("logic thread ended");
                    self.pump.end_of_logic();
                }
            }
        }
        self.pump.tick(now);
        if self.pump.should_close(now) {
            self.should_quit = true;
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        let editable = self.pump.state() != PumpState::PageWait;

        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc if editable => {
                self.input_text.clear();
                self.input_cursor = 0;
            }
            KeyCode::Backspace if editable && self.input_cursor > 0 => {
                let prev = self.prev_boundary();
                self.input_text.remove(prev);
                self.input_cursor = prev;
            }
            KeyCode::Left if self.input_cursor > 0 => self.input_cursor = self.prev_boundary(),
            KeyCode::Right if self.input_cursor < self.input_text.len() => {
                self.input_cursor = self.input_text[self.input_cursor..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| self.input_cursor + i)
                    .unwrap_or(self.input_text.len());
            }
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input_text.len(),
            KeyCode::Up => self.output_scroll = self.output_scroll.saturating_add(1),
            KeyCode::Down => self.output_scroll = self.output_scroll.saturating_sub(1),
            KeyCode::Char(c) if editable => {
                self.input_text.insert(self.input_cursor, c);
                self.input_cursor += c.len_utf8();
            }
            _ => {}
        }
    }

    /// Handle mouse scrolling.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.output_scroll = self.output_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollDown => {
                self.output_scroll = self.output_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn prev_boundary(&self) -> usize {
        self.input_text[..self.input_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn submit_input(&mut self) {
        let Some(input) = self.pump.enter(&self.input_text) else {
            return;
        };
        let sent = match input {
            PlayerInput::Line(line) => {
                self.input_text.clear();
                self.input_cursor = 0;
                self.channel.submit(line)
            }
            PlayerInput::PageAck => self.channel.acknowledge_page(),
        };
        if sent.is_err() {
            self.pump.end_of_logic();
        }
        self.output_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use std::time::Duration;
    use tf_core::presentation_channel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn typed_lines_reach_the_logic_thread() {
        let (mut logic, ui) = presentation_channel();
        let mut app = App::new(ui);
        type_line(&mut app, "look cow");
        assert_eq!(logic.read_line().unwrap(), "look cow");
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn page_ack_follows_enter_after_clear() {
        let (mut logic, ui) = presentation_channel();
        let mut app = App::new(ui);
        logic.render("old", Duration::ZERO).unwrap();
        logic.clear().unwrap();
        app.update(Instant::now());
        assert_eq!(app.pump().state(), PumpState::PageWait);

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.input_text(), "");

        app.handle_key(key(KeyCode::Enter));
        logic.await_page_ack().unwrap();
        assert!(app.pump().transcript().is_empty());
    }

    #[test]
    fn editing_keys() {
        let (_logic, ui) = presentation_channel();
        let mut app = App::new(ui);
        for c in "pusj".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.input_text(), "push");
        assert_eq!(app.input_cursor(), 1);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn ctrl_c_quits() {
        let (_logic, ui) = presentation_channel();
        let mut app = App::new(ui);
        let mut event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        event.kind = KeyEventKind::Press;
        app.handle_key(event);
        assert!(app.should_quit);
    }

    #[test]
    fn logic_end_closes_after_grace() {
        let (logic, ui) = presentation_channel();
        let mut app = App::new(ui);
        logic.render("Goodbye.", Duration::ZERO).unwrap();
        drop(logic);

        let start = Instant::now();
        app.update(start);
        assert!(app.pump().logic_ended());
        assert!(!app.should_quit);

        app.update(start + crate::pump::CLOSE_GRACE);
        assert!(app.should_quit);
    }
}
