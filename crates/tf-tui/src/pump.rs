//! The presentation pump.
//!
//! A pure state machine fed with [`Directive`]s and key presses. It reveals
//! text one character at a time, gates page breaks behind an Enter press and
//! decides what to forward to the logic thread. Time is passed in explicitly
//! so the whole protocol can be driven from tests.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tf_core::{Directive, PlayerInput};

use crate::view::{OutputLine, OutputStyle};

/// Shown at the bottom of a finished page.
pub const END_OF_PAGE: &str = "-- press Enter to continue --";

/// How long the window stays up after the logic thread ends.
pub const CLOSE_GRACE: Duration = Duration::from_millis(750);

/// Event poll timeout while text is being revealed.
pub const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// Event poll timeout otherwise.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// What the pump is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    /// Waiting for the player.
    Idle,
    /// Revealing text.
    Animating,
    /// A page is finished; the next Enter acknowledges it.
    PageWait,
}

#[derive(Debug)]
struct Reveal {
    pending: VecDeque<char>,
    delay: Duration,
    next_at: Instant,
}

/// Directive consumer and transcript owner.
#[derive(Debug)]
pub struct Pump {
    state: PumpState,
    queue: VecDeque<Directive>,
    reveal: Option<Reveal>,
    transcript: Vec<OutputLine>,
    title: String,
    logic_ended: bool,
    close_at: Option<Instant>,
}

impl Default for Pump {
    fn default() -> Self {
        Self::new()
    }
}

impl Pump {
    /// An idle pump with an empty transcript.
    pub fn new() -> Self {
        Self {
            state: PumpState::Idle,
            queue: VecDeque::new(),
            reveal: None,
            transcript: Vec::new(),
            title: String::new(),
            logic_ended: false,
            close_at: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> PumpState {
        self.state
    }

    /// Current page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lines on the current page.
    pub fn transcript(&self) -> &[OutputLine] {
        &self.transcript
    }

    /// Whether typed keys currently go into the input field.
    pub fn accepts_input(&self) -> bool {
        self.state == PumpState::Idle
    }

    /// Queue a directive from the logic thread.
    pub fn push(&mut self, directive: Directive) {
        self.queue.push_back(directive);
    }

    /// Note that the logic thread is gone.
    pub fn end_of_logic(&mut self) {
        self.logic_ended = true;
    }

    /// Whether the logic thread has ended.
    pub fn logic_ended(&self) -> bool {
        self.logic_ended
    }

    /// How long the event loop may wait for input.
    pub fn poll_timeout(&self) -> Duration {
        match self.state {
            PumpState::Animating => ANIMATION_POLL,
            PumpState::Idle | PumpState::PageWait => IDLE_POLL,
        }
    }

    /// Whether the grace period after the logic thread ended has run out.
    pub fn should_close(&self, now: Instant) -> bool {
        self.close_at.is_some_and(|at| now >= at)
    }

    /// Advance animation and apply queued directives up to `now`.
    pub fn tick(&mut self, now: Instant) {
        loop {
            if self.state == PumpState::PageWait {
                return;
            }
            if let Some(reveal) = &mut self.reveal {
                let mut revealed = String::new();
                while reveal.next_at <= now {
                    let Some(c) = reveal.pending.pop_front() else {
                        break;
                    };
                    revealed.push(c);
                    reveal.next_at += reveal.delay;
                }
                let finished = reveal.pending.is_empty();
                self.put_str(&revealed);
                if !finished {
                    self.state = PumpState::Animating;
                    return;
                }
                self.reveal = None;
            }

            let Some(directive) = self.queue.pop_front() else {
                break;
            };
            match directive {
                Directive::Clear => {
                    self.begin_block(OutputStyle::System);
                    self.put_str(END_OF_PAGE);
                    self.state = PumpState::PageWait;
                    return;
                }
                Directive::SetTitle(title) => self.title = title,
                Directive::Render { text, char_delay } => {
                    self.begin_block(OutputStyle::Narration);
                    if char_delay.is_zero() {
                        self.put_str(&text);
                    } else {
                        self.reveal = Some(Reveal {
                            pending: text.chars().collect(),
                            delay: char_delay,
                            next_at: now,
                        });
                    }
                }
            }
        }

        self.state = PumpState::Idle;
        if self.logic_ended && self.close_at.is_none() {
            self.close_at = Some(now + CLOSE_GRACE);
        }
    }

    /// Handle an Enter press carrying the text of the input field.
    ///
    /// Returns what must be forwarded to the logic thread, if anything. The
    /// caller clears the input field only when a line is returned.
    pub fn enter(&mut self, line: &str) -> Option<PlayerInput> {
        match self.state {
            PumpState::PageWait => {
                self.transcript.clear();
                self.state = PumpState::Idle;
                Some(PlayerInput::PageAck)
            }
            PumpState::Animating => {
                self.flush();
                self.state = PumpState::Idle;
                None
            }
            PumpState::Idle => {
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                self.begin_block(OutputStyle::Command);
                self.put_str(&format!("> {line}"));
                Some(PlayerInput::Line(line.to_string()))
            }
        }
    }

    /// Show everything up to the next page break at once.
    fn flush(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            let rest: String = reveal.pending.into_iter().collect();
            self.put_str(&rest);
        }
        while let Some(directive) = self.queue.front() {
            if *directive == Directive::Clear {
                break;
            }
            match self.queue.pop_front() {
                Some(Directive::SetTitle(title)) => self.title = title,
                Some(Directive::Render { text, .. }) => {
                    self.begin_block(OutputStyle::Narration);
                    self.put_str(&text);
                }
                _ => {}
            }
        }
    }

    fn begin_block(&mut self, style: OutputStyle) {
        if !self.transcript.is_empty() {
            self.transcript.push(OutputLine::new(style, ""));
        }
        self.transcript.push(OutputLine::new(style, ""));
    }

    fn put_str(&mut self, text: &str) {
        let style = self
            .transcript
            .last()
            .map_or(OutputStyle::Narration, |line| line.style);
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            match self.transcript.last_mut() {
                Some(last) => last.text.push_str(first),
                None => self.transcript.push(OutputLine::new(style, first)),
            }
        }
        for line in lines {
            self.transcript.push(OutputLine::new(style, line));
        }
    }
}
