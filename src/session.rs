use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::error::{Result, TyperError};
use crate::frame::Frame;
use crate::metrics::{Stats, WpmHistory};

/// Horizontal space taken by the frame around the progress bar.
const WIDTH_PADDING: u16 = 4;

/// Input delivered to a [`Session`] by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// One or more code points produced by the keyboard (or a paste).
    Input(Vec<char>),
    Backspace,
    Cancel,
    Resize { width: u16, height: u16 },
}

impl From<char> for TypingEvent {
    fn from(c: char) -> Self {
        TypingEvent::Input(vec![c])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Cancelled)
    }
}

/// What the event loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Finish,
}

/// Rendering bounds in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A single typing test run against a fixed target text.
#[derive(Debug, Clone)]
pub struct Session {
    target: Vec<char>,
    typed: Vec<char>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    phase: Phase,
    correct_chars: usize,
    backspaces: usize,
    history: WpmHistory,
    max_viewport: Viewport,
    viewport: Viewport,
}

impl Session {
    pub fn new(text: &str, max_viewport: Viewport) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(TyperError::EmptyText);
        }

        let target: Vec<char> = text.chars().collect();
        debug!(chars = target.len(), "session created");

        Ok(Self {
            target,
            typed: Vec::new(),
            started_at: None,
            finished_at: None,
            phase: Phase::NotStarted,
            correct_chars: 0,
            backspaces: 0,
            history: WpmHistory::new(),
            max_viewport,
            viewport: max_viewport,
        })
    }

    pub fn handle_event(&mut self, event: TypingEvent) -> Control {
        self.handle_event_at(event, Instant::now())
    }

    /// Applies `event` as if it happened at `now`.
    pub fn handle_event_at(&mut self, event: TypingEvent, now: Instant) -> Control {
        if self.phase.is_terminal() {
            return Control::Finish;
        }

        match event {
            TypingEvent::Cancel => {
                self.phase = Phase::Cancelled;
                self.finished_at = Some(now);
                info!(typed = self.typed.len(), "session cancelled");
                Control::Finish
            }
            TypingEvent::Resize { width, height } => {
                self.resize(width, height);
                Control::Continue
            }
            TypingEvent::Backspace => self.backspace(now),
            TypingEvent::Input(chars) => self.input(&chars, now),
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport {
            width: width
                .saturating_sub(WIDTH_PADDING)
                .min(self.max_viewport.width),
            height: height.min(self.max_viewport.height),
        };
        trace!(width = self.viewport.width, height = self.viewport.height, "resized");
    }

    fn backspace(&mut self, now: Instant) -> Control {
        if self.typed.pop().is_none() {
            return Control::Continue;
        }
        self.start(now);
        self.backspaces += 1;
        self.update_progress(now)
    }

    fn input(&mut self, chars: &[char], now: Instant) -> Control {
        let Some(&first) = chars.first() else {
            return Control::Continue;
        };
        let Some(&next) = self.target.get(self.typed.len()) else {
            return Control::Continue;
        };
        self.start(now);

        // Line breaks in the target are always inserted so the layout never
        // breaks, and the space typed at the end of a line is swallowed.
        let mut rest = chars;
        if next == '\n' {
            self.typed.push('\n');
            match first {
                ' ' => return self.update_progress(now),
                '\n' => rest = &chars[1..],
                _ => {}
            }
        }

        let room = self.target.len() - self.typed.len();
        self.typed.extend(rest.iter().take(room));

        if first == next {
            self.correct_chars += 1;
        }
        trace!(?first, ?next, typed = self.typed.len(), "input");

        self.update_progress(now)
    }

    fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.phase = Phase::InProgress;
        }
    }

    fn update_progress(&mut self, now: Instant) -> Control {
        if self.percent_complete() >= 1.0 {
            self.phase = Phase::Completed;
            self.finished_at = Some(now);
            info!(
                chars = self.typed.len(),
                correct = self.correct_chars,
                backspaces = self.backspaces,
                "session completed"
            );
            return Control::Finish;
        }
        Control::Continue
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn percent_complete(&self) -> f64 {
        self.typed.len() as f64 / self.target.len() as f64
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn backspaces(&self) -> usize {
        self.backspaces
    }

    pub fn wpm_history(&self) -> &[f64] {
        self.history.samples()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Time since the clock started, frozen once the session has ended.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.finished_at.unwrap_or(now);
        self.started_at
            .map(|start| end.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// Live statistics at `now` without touching the WPM history.
    pub fn stats(&self, now: Instant) -> Stats {
        Stats::compute(
            &self.typed,
            self.correct_chars,
            self.backspaces,
            self.elapsed(now),
        )
    }

    /// Produces the data for one render and records a WPM sample for it.
    pub fn frame(&mut self, now: Instant) -> Frame<'_> {
        let stats = self.stats(now);
        self.history.sample(self.typed.len(), stats.wpm);
        Frame::new(
            &self.target,
            &self.typed,
            self.percent_complete(),
            stats,
            self.history.samples(),
        )
    }
}
