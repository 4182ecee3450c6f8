use std::fmt;
use std::time::Instant;

use crate::metrics::{mean, std_dev, Stats};
use crate::session::{Phase, Session};

/// Results printed after the terminal is restored.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub phase: Phase,
    pub stats: Stats,
    pub avg_wpm: f64,
    pub wpm_std_dev: f64,
}

impl Summary {
    pub fn from_session(session: &Session, now: Instant) -> Self {
        let history = session.wpm_history();
        Self {
            phase: session.phase(),
            stats: session.stats(now),
            avg_wpm: mean(history).unwrap_or(0.0),
            wpm_std_dev: std_dev(history).unwrap_or(0.0),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        write!(
            f,
            "time: {:.0}s   {:.2} wpm   {:.2} bpm   {} words   {} backspaces ({:.2}%)   avg {:.2} wpm ± {:.2}",
            s.elapsed.as_secs_f64(),
            s.wpm,
            s.cpm,
            s.word_count,
            s.backspaces,
            s.backspace_rate,
            self.avg_wpm,
            self.wpm_std_dev,
        )
    }
}
