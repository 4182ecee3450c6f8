use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

static LANG_DIR: Dir = include_dir!("src/lang");

/// A word list bundled with the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Loads `<name>.json` from the bundled word lists.
    pub fn load(name: &str) -> Option<Self> {
        let file = LANG_DIR.get_file(format!("{name}.json"))?;
        let contents = file.contents_utf8()?;
        match serde_json::from_str(contents) {
            Ok(lang) => Some(lang),
            Err(err) => {
                warn!(%err, name, "unable to deserialize word list");
                None
            }
        }
    }
}

/// Produces random word sequences from a [`Language`].
#[derive(Debug, Clone)]
pub struct WordGenerator {
    words: Vec<String>,
}

impl WordGenerator {
    pub fn new(language: Language) -> Self {
        Self {
            words: language.words,
        }
    }

    /// Generator over the bundled English list.
    pub fn english() -> Self {
        let words = Language::load("english")
            .map(|lang| lang.words)
            .unwrap_or_default();
        Self { words }
    }

    pub fn generate(&self, count: usize) -> String {
        self.generate_with(&mut rand::thread_rng(), count)
    }

    /// Picks `count` words with replacement, separated by single spaces.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String {
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            match self.words.choose(rng) {
                Some(word) => picked.push(word.as_str()),
                None => break,
            }
        }
        picked.join(" ")
    }
}
