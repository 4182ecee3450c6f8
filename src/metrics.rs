use std::time::Duration;

/// Average word length used by typing tests. WPM samples are only taken once
/// the typed buffer is longer than this.
pub const CHARS_PER_WORD: usize = 5;

/// Code points above this are treated as wide script characters.
pub const WIDE_CHAR_THRESHOLD: u32 = 0xFF;

/// Counts words the way a simple text editor does: every run of ASCII
/// letters or digits is one word. A wide character counts as a word the
/// moment it is seen and also keeps the current run open, so the run it
/// belongs to is counted once more when it closes.
pub fn word_count(input: &[char]) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for &c in input {
        if c as u32 > WIDE_CHAR_THRESHOLD {
            count += 1;
            in_word = true;
        } else if c.is_ascii_alphanumeric() {
            in_word = true;
        } else if in_word {
            count += 1;
            in_word = false;
        }
    }

    if in_word {
        count += 1;
    }

    count
}

/// `count / minutes`, or zero when fewer than two characters are typed or no
/// time has passed yet.
pub fn per_minute(count: f64, typed_len: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if typed_len <= 1 || minutes <= 0.0 {
        return 0.0;
    }
    count / minutes
}

/// Backspaces as a percentage of correctly typed characters.
pub fn backspace_rate(backspaces: usize, correct: usize) -> f64 {
    if correct == 0 {
        return 0.0;
    }
    backspaces as f64 / correct as f64 * 100.0
}

/// Arithmetic mean, `None` for an empty series.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation, `None` for an empty series.
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let avg = mean(samples)?;
    let variance = samples
        .iter()
        .map(|value| (value - avg) * (value - avg))
        .sum::<f64>()
        / samples.len() as f64;
    Some(variance.sqrt())
}

/// Snapshot of the live statistics for one render.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub elapsed: Duration,
    pub word_count: usize,
    pub wpm: f64,
    pub cpm: f64,
    pub correct_chars: usize,
    pub backspaces: usize,
    pub backspace_rate: f64,
}

impl Stats {
    pub fn compute(
        typed: &[char],
        correct_chars: usize,
        backspaces: usize,
        elapsed: Duration,
    ) -> Self {
        let word_count = word_count(typed);
        Self {
            elapsed,
            word_count,
            wpm: per_minute(word_count as f64, typed.len(), elapsed),
            cpm: per_minute(correct_chars as f64, typed.len(), elapsed),
            correct_chars,
            backspaces,
            backspace_rate: backspace_rate(backspaces, correct_chars),
        }
    }
}

/// Append-only series of per-frame WPM samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WpmHistory {
    samples: Vec<f64>,
}

impl WpmHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `wpm` if the typed buffer is long enough to make it meaningful.
    /// Returns whether a sample was taken.
    pub fn sample(&mut self, typed_len: usize, wpm: f64) -> bool {
        if typed_len > CHARS_PER_WORD {
            self.samples.push(wpm);
            true
        } else {
            false
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
