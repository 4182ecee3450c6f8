use std::fs;
use std::path::PathBuf;

use itertools::Itertools;
use tracing::debug;

use crate::error::{Result, TyperError};
use crate::word_generator::WordGenerator;

/// Where the text to type comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    File(PathBuf),
    Random { words: usize },
    Literal(String),
}

impl TextSource {
    /// Loads the raw, un-normalized text.
    pub fn load(&self) -> Result<String> {
        match self {
            TextSource::File(path) => {
                fs::read_to_string(path).map_err(|source| TyperError::Io {
                    path: path.clone(),
                    source,
                })
            }
            TextSource::Random { words } => Ok(WordGenerator::english().generate(*words)),
            TextSource::Literal(text) => Ok(text.clone()),
        }
    }
}

/// Post-processing applied to loaded text before a session starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub max_words: Option<usize>,
    pub min_word_length: Option<usize>,
    pub alphanumeric_only: bool,
}

/// Normalizes `raw` for typing. Fails if nothing typeable is left.
pub fn prepare(raw: &str, opts: &TextOptions) -> Result<String> {
    let mut text = collapse_whitespace(&trim_lines(raw));

    if opts.alphanumeric_only {
        text = strip_non_alphanumeric(&text);
    }
    if let Some(min) = opts.min_word_length {
        text = drop_short_words(&text, min);
    }
    if let Some(max) = opts.max_words {
        text = truncate_words(&text, max).to_string();
    }

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(TyperError::EmptyText);
    }
    debug!(chars = text.chars().count(), "text prepared");
    Ok(text)
}

/// Trims every line and drops the blank ones.
pub fn trim_lines(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("\n")
}

/// Replaces runs of spaces, tabs and carriage returns with a single space and
/// runs of newlines with a single newline.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending: Option<char> = None;

    for c in s.chars() {
        match c {
            '\n' => pending = Some('\n'),
            ' ' | '\t' | '\r' => {
                if pending.is_none() {
                    pending = Some(' ');
                }
            }
            _ => {
                if let Some(sep) = pending.take() {
                    out.push(sep);
                }
                out.push(c);
            }
        }
    }

    out.trim().to_string()
}

/// Keeps letters, numbers and spaces.
pub fn strip_non_alphanumeric(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect()
}

/// Removes words shorter than `min` characters.
pub fn drop_short_words(s: &str, min: usize) -> String {
    s.split_whitespace()
        .filter(|word| word.chars().count() >= min)
        .join(" ")
}

/// Cuts `s` right after its `n`-th word, keeping the original separators.
pub fn truncate_words(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }

    let mut words = 0;
    let mut in_word = false;
    for (idx, c) in s.char_indices() {
        if c.is_whitespace() {
            if in_word {
                words += 1;
                if words == n {
                    return &s[..idx];
                }
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_trim_lines() {
        assert_eq!(trim_lines("  one \n\n   \n two\n"), "one\ntwo");
        assert_eq!(trim_lines(""), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  \t b\r\nc"), "a b\nc");
        assert_eq!(collapse_whitespace("  hello   world  "), "hello world");
        assert_eq!(collapse_whitespace("one\n\n\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_collapse_whitespace_newline_wins() {
        assert_eq!(collapse_whitespace("one \n two"), "one\ntwo");
    }

    #[test]
    fn test_strip_non_alphanumeric() {
        assert_eq!(strip_non_alphanumeric("foo-bar, baz!"), "foobar baz");
        assert_eq!(strip_non_alphanumeric("héllo 世界 42"), "héllo 世界 42");
        assert_eq!(strip_non_alphanumeric("a\nb"), "ab");
    }

    #[test]
    fn test_drop_short_words() {
        assert_eq!(drop_short_words("a bb ccc dddd", 3), "ccc dddd");
        assert_eq!(drop_short_words("a b", 5), "");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two  three four", 3), "one two  three");
        assert_eq!(truncate_words("one\ntwo three", 2), "one\ntwo");
        assert_eq!(truncate_words("one two", 5), "one two");
        assert_eq!(truncate_words("one two", 0), "");
    }

    #[test]
    fn test_prepare_defaults() {
        let text = prepare("  The quick\t\tbrown\n\n  fox  \n", &TextOptions::default()).unwrap();
        assert_eq!(text, "The quick brown\nfox");
    }

    #[test]
    fn test_prepare_with_options() {
        let opts = TextOptions {
            max_words: Some(2),
            min_word_length: Some(3),
            alphanumeric_only: true,
        };
        let text = prepare("a cat, a dog; and more", &opts).unwrap();
        assert_eq!(text, "cat dog");
    }

    #[test]
    fn test_prepare_rejects_empty() {
        assert_matches!(
            prepare(" \n \n", &TextOptions::default()),
            Err(TyperError::EmptyText)
        );
        let opts = TextOptions {
            alphanumeric_only: true,
            ..TextOptions::default()
        };
        assert_matches!(prepare("!!! ???", &opts), Err(TyperError::EmptyText));
    }

    #[test]
    fn test_load_literal() {
        let source = TextSource::Literal("hi there".to_string());
        assert_eq!(source.load().unwrap(), "hi there");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from a file").unwrap();

        let source = TextSource::File(file.path().to_path_buf());
        assert_eq!(source.load().unwrap(), "from a file");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = TextSource::File(dir.path().join("missing.txt"));
        assert_matches!(source.load(), Err(TyperError::Io { .. }));
    }

    #[test]
    fn test_load_random() {
        let text = TextSource::Random { words: 7 }.load().unwrap();
        assert_eq!(text.split_whitespace().count(), 7);
    }
}
