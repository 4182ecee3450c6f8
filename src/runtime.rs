use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::session::TypingEvent;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    /// Maps a terminal event onto session input. Keys the test does not care
    /// about (Enter, arrows, releases) map to `None`.
    pub fn to_typing_event(&self) -> Option<TypingEvent> {
        match self {
            AppEvent::Key(key) => translate_key(key),
            AppEvent::Paste(text) => Some(TypingEvent::Input(text.chars().collect())),
            AppEvent::Resize(width, height) => Some(TypingEvent::Resize {
                width: *width,
                height: *height,
            }),
            AppEvent::Tick => None,
        }
    }
}

fn translate_key(key: &KeyEvent) -> Option<TypingEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TypingEvent::Cancel)
        }
        KeyCode::Esc => Some(TypingEvent::Cancel),
        KeyCode::Backspace => Some(TypingEvent::Backspace),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => Some(TypingEvent::Input(vec![c])),
        _ => None,
    }
}

/// Source of terminal events (keyboard, paste, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Paste(text)) => AppEvent::Paste(text),
                Ok(CtEvent::Resize(width, height)) => AppEvent::Resize(width, height),
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event read failed");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                // no producer left; keep the tick cadence instead of spinning
                std::thread::sleep(self.ticker.interval());
                AppEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::sync::mpsc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        assert_eq!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize(100, 30)).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_eq!(runner.step(), AppEvent::Resize(100, 30));
    }

    #[test]
    fn chars_become_input() {
        assert_eq!(
            key(KeyCode::Char('a'), KeyModifiers::NONE).to_typing_event(),
            Some(TypingEvent::Input(vec!['a']))
        );
        assert_eq!(
            key(KeyCode::Char('A'), KeyModifiers::SHIFT).to_typing_event(),
            Some(TypingEvent::Input(vec!['A']))
        );
    }

    #[test]
    fn ctrl_c_and_esc_cancel() {
        assert_eq!(
            key(KeyCode::Char('c'), KeyModifiers::CONTROL).to_typing_event(),
            Some(TypingEvent::Cancel)
        );
        assert_eq!(
            key(KeyCode::Esc, KeyModifiers::NONE).to_typing_event(),
            Some(TypingEvent::Cancel)
        );
    }

    #[test]
    fn other_control_chords_are_dropped() {
        assert_eq!(
            key(KeyCode::Char('w'), KeyModifiers::CONTROL).to_typing_event(),
            None
        );
    }

    #[test]
    fn backspace_paste_and_resize() {
        assert_eq!(
            key(KeyCode::Backspace, KeyModifiers::NONE).to_typing_event(),
            Some(TypingEvent::Backspace)
        );
        assert_eq!(
            AppEvent::Paste("hi".into()).to_typing_event(),
            Some(TypingEvent::Input(vec!['h', 'i']))
        );
        assert_eq!(
            AppEvent::Resize(90, 20).to_typing_event(),
            Some(TypingEvent::Resize {
                width: 90,
                height: 20
            })
        );
    }

    #[test]
    fn irrelevant_events_are_dropped() {
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE).to_typing_event(), None);
        assert_eq!(key(KeyCode::Left, KeyModifiers::NONE).to_typing_event(), None);
        assert_eq!(AppEvent::Tick.to_typing_event(), None);

        let release = AppEvent::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(release.to_typing_event(), None);
    }
}
