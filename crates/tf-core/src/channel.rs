//! The two-way hand-off between the logic thread and the presentation loop.
//!
//! Directives flow from logic to presentation, player input flows back. Both
//! directions are unbounded, ordered `mpsc` queues; nothing else is shared.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use crate::error::ChannelError;

/// A presentation instruction sent by the logic thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// End the current page; the next Enter acknowledges it.
    Clear,
    /// Change the page title.
    SetTitle(String),
    /// Show text, revealing one character every `char_delay`.
    Render {
        /// The text to show.
        text: String,
        /// Delay between revealed characters; zero shows the text at once.
        char_delay: Duration,
    },
}

/// Something the player sent to the logic thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A raw, unvalidated line.
    Line(String),
    /// The page break after a [`Directive::Clear`] was acknowledged.
    PageAck,
}

/// Create a connected pair of channel ends.
pub fn presentation_channel() -> (LogicEnd, PresentationEnd) {
    let (directive_tx, directive_rx) = mpsc::channel();
    let (input_tx, input_rx) = mpsc::channel();
    (
        LogicEnd {
            directives: directive_tx,
            input: input_rx,
            backlog: VecDeque::new(),
        },
        PresentationEnd {
            directives: directive_rx,
            input: input_tx,
        },
    )
}

/// The logic thread's end: sends directives, blocks on player input.
#[derive(Debug)]
pub struct LogicEnd {
    directives: Sender<Directive>,
    input: Receiver<PlayerInput>,
    backlog: VecDeque<String>,
}

impl LogicEnd {
    /// Queue a directive.
    pub fn send(&self, directive: Directive) -> Result<(), ChannelError> {
        self.directives
            .send(directive)
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Queue text for display.
    pub fn render(
        &self,
        text: impl Into<String>,
        char_delay: Duration,
    ) -> Result<(), ChannelError> {
        self.send(Directive::Render {
            text: text.into(),
            char_delay,
        })
    }

    /// Queue a page break.
    pub fn clear(&self) -> Result<(), ChannelError> {
        self.send(Directive::Clear)
    }

    /// Queue a title change.
    pub fn set_title(&self, title: impl Into<String>) -> Result<(), ChannelError> {
        self.send(Directive::SetTitle(title.into()))
    }

    /// Block until the player submits a line.
    ///
    /// Stray page acknowledgements are skipped.
    pub fn read_line(&mut self) -> Result<String, ChannelError> {
        if let Some(line) = self.backlog.pop_front() {
            return Ok(line);
        }
        loop {
            match self.recv()? {
                PlayerInput::Line(line) => return Ok(line),
                PlayerInput::PageAck => continue,
            }
        }
    }

    /// Block until the current page break is acknowledged.
    ///
    /// Lines submitted before the page break reached the player are kept for
    /// the next [`read_line`](Self::read_line).
    pub fn await_page_ack(&mut self) -> Result<(), ChannelError> {
        loop {
            match self.recv()? {
                PlayerInput::PageAck => return Ok(()),
                PlayerInput::Line(line) => self.backlog.push_back(line),
            }
        }
    }

    fn recv(&self) -> Result<PlayerInput, ChannelError> {
        self.input.recv().map_err(|_| ChannelError::Disconnected)
    }
}

/// The presentation loop's end: polls directives, forwards input.
#[derive(Debug)]
pub struct PresentationEnd {
    directives: Receiver<Directive>,
    input: Sender<PlayerInput>,
}

impl PresentationEnd {
    /// Take the next directive without blocking.
    ///
    /// `Ok(None)` means nothing is queued right now; `Err` means the logic
    /// thread is gone and everything it sent has been received.
    pub fn try_directive(&self) -> Result<Option<Directive>, ChannelError> {
        match self.directives.try_recv() {
            Ok(directive) => Ok(Some(directive)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelError::Disconnected),
        }
    }

    /// Take every directive queued right now.
    pub fn drain(&self) -> Vec<Directive> {
        self.directives.try_iter().collect()
    }

    /// Forward a line typed by the player.
    pub fn submit(&self, line: impl Into<String>) -> Result<(), ChannelError> {
        self.send(PlayerInput::Line(line.into()))
    }

    /// Acknowledge a page break.
    pub fn acknowledge_page(&self) -> Result<(), ChannelError> {
        self.send(PlayerInput::PageAck)
    }

    fn send(&self, input: PlayerInput) -> Result<(), ChannelError> {
        self.input.send(input).map_err(|_| ChannelError::Disconnected)
    }
}
