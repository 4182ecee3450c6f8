use std::time::Duration;

use crate::metrics::Stats;

/// How a stretch of the target text should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Correct,
    Incorrect,
    Untyped,
}

/// A run of target characters sharing one [`CharClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub class: CharClass,
    pub text: String,
}

/// Splits the target into correct, incorrect and untyped runs.
///
/// Incorrect runs hold the *target* characters, not what was typed, so the
/// text on screen never shifts while typing.
pub fn partition(target: &[char], typed: &[char]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    let classes = target.iter().enumerate().map(|(idx, &expected)| {
        let class = match typed.get(idx) {
            Some(&c) if c == expected => CharClass::Correct,
            Some(_) => CharClass::Incorrect,
            None => CharClass::Untyped,
        };
        (class, expected)
    });

    for (class, c) in classes {
        match segments.last_mut() {
            Some(last) if last.class == class => last.text.push(c),
            _ => segments.push(Segment {
                class,
                text: c.to_string(),
            }),
        }
    }

    segments
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub percent: f64,
    pub segments: Vec<Segment>,
    pub stats: Stats,
    pub wpm_history: &'a [f64],
}

impl<'a> Frame<'a> {
    pub fn new(
        target: &[char],
        typed: &[char],
        percent: f64,
        stats: Stats,
        wpm_history: &'a [f64],
    ) -> Self {
        Self {
            percent,
            segments: partition(target, typed),
            stats,
            wpm_history,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }
}
