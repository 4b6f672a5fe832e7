//! Natural-language word lookup used by the classifiers.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

/// Minimum length of a word that can count as a real dictionary word.
pub const MINIMUM_WORD_LENGTH: usize = 2;

const BUNDLED_WORDS: &str = include_str!("../../data/words.txt");

static BUNDLED: Lazy<Arc<WordList>> = Lazy::new(|| Arc::new(WordList::parse(BUNDLED_WORDS)));

/// Capability: is this a real word?
pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

/// Case-insensitive word set.
///
/// Words shorter than [`MINIMUM_WORD_LENGTH`] are never accepted, and a trailing plural
/// `s`/`es` is accepted when the singular is listed.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a newline separated list; blank lines and `#` comments are skipped.
    pub fn parse(body: &str) -> Self {
        Self::from_words(body.lines().map(str::trim).filter(|line| !line.starts_with('#')))
    }

    /// Load a word list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list at {}", path.display()))?;
        Ok(Self::parse(&body))
    }

    /// The word list compiled into the crate.
    pub fn bundled() -> Arc<WordList> {
        Arc::clone(&BUNDLED)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        if word.chars().count() < MINIMUM_WORD_LENGTH {
            return false;
        }
        let lower = word.to_ascii_lowercase();
        if self.words.contains(&lower) {
            return true;
        }
        for stem in [lower.strip_suffix("es"), lower.strip_suffix('s')].into_iter().flatten() {
            if stem.len() >= MINIMUM_WORD_LENGTH && self.words.contains(stem) {
                return true;
            }
        }
        false
    }
}
