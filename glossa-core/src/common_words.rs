//! Common-word lists
//!
//! Short texts carry too few n-grams for the statistical classifier to be
//! sure of itself. Counting how many words appear in each language's list
//! of very frequent words is a cheap correction for those cases.

use crate::error::{CoreError, Result};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Counts words of a text that belong to per-language common-word lists
pub trait CommonWordCounter: Send + Sync {
    /// `(code, count)` for every language with at least one known word,
    /// in code order
    fn known_words_per_language(&self, text: &str) -> Vec<(String, usize)>;
}

/// Whitespace-separated words, trimmed of surrounding punctuation and
/// lower-cased
pub fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// In-memory common-word lists keyed by language code
#[derive(Debug, Clone, Default)]
pub struct CommonWords {
    lists: BTreeMap<String, HashSet<String>>,
}

impl CommonWords {
    /// Build from `(code, words)` pairs
    pub fn from_lists<C, W, I>(lists: impl IntoIterator<Item = (C, I)>) -> Self
    where
        C: Into<String>,
        W: AsRef<str>,
        I: IntoIterator<Item = W>,
    {
        let lists = lists
            .into_iter()
            .map(|(code, words)| {
                let set = words
                    .into_iter()
                    .map(|w| w.as_ref().trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (code.into(), set)
            })
            .collect();
        Self { lists }
    }

    /// Load `<code>.txt` files from a directory, one word per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let io_err = |source| CoreError::WordListIo {
            path: dir.to_path_buf(),
            source,
        };

        let mut lists = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).map_err(|source| CoreError::WordListIo {
                path: path.clone(),
                source,
            })?;
            lists.insert(code.to_string(), parse_word_list(&content));
        }

        log::debug!(
            "Loaded common-word lists for {} languages from {}",
            lists.len(),
            dir.display()
        );
        Ok(Self { lists })
    }

    /// Languages with a list
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Number of lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// True when no list is loaded
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl CommonWordCounter for CommonWords {
    fn known_words_per_language(&self, text: &str) -> Vec<(String, usize)> {
        let words: Vec<String> = split_words(text).collect();
        self.lists
            .iter()
            .filter_map(|(code, list)| {
                let count = words.iter().filter(|w| list.contains(*w)).count();
                (count > 0).then(|| (code.clone(), count))
            })
            .collect()
    }
}

/// Parse a one-word-per-line list
pub(crate) fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
