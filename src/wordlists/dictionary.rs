//! Dictionary of valid words
//!
//! Loaded once at startup and shared read-only between requests.

use super::embedded::{FALLBACK_WORDS, WORDS};
use super::loader::{load_from_file, words_from_slice};
use crate::core::Word;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::path::Path;
use tracing::{info, warn};

/// Set of valid 5-letter words
///
/// Never empty: every constructor falls back to a built-in list.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
    index: FxHashSet<Word>,
}

impl Dictionary {
    /// Build a dictionary from a word list
    ///
    /// Duplicates are dropped. An empty list falls back to [`FALLBACK_WORDS`].
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        let words = if words.is_empty() {
            warn!("word list is empty, using fallback words");
            words_from_slice(FALLBACK_WORDS)
        } else {
            words
        };

        let mut index = FxHashSet::default();
        let words: Vec<Word> = words
            .into_iter()
            .filter(|w| index.insert(w.clone()))
            .collect();

        Self { words, index }
    }

    /// Dictionary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(words_from_slice(WORDS))
    }

    /// Load from an optional word list file
    ///
    /// A missing, unreadable or empty file is not fatal: the embedded
    /// dictionary is used instead.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            let dictionary = Self::embedded();
            info!(words = dictionary.len(), "using embedded dictionary");
            return dictionary;
        };

        match load_from_file(path) {
            Ok(words) if !words.is_empty() => {
                info!(path = %path.display(), words = words.len(), "loaded word list");
                Self::new(words)
            }
            Ok(_) => {
                warn!(path = %path.display(), "word list has no valid words, using embedded dictionary");
                Self::embedded()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read word list, using embedded dictionary");
                Self::embedded()
            }
        }
    }

    /// Check whether a word (any case) is in the dictionary
    #[must_use]
    pub fn is_valid(&self, word: &str) -> bool {
        Word::new(word).is_ok_and(|w| self.contains(&w))
    }

    /// Check membership of an already validated word
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    /// Pick a word uniformly at random
    #[must_use]
    pub fn random_word(&self) -> &Word {
        self.random_word_with(&mut rand::rng())
    }

    /// Pick a word uniformly at random using the given generator
    pub fn random_word_with<R: Rng>(&self, rng: &mut R) -> &Word {
        &self.words[rng.random_range(0..self.words.len())]
    }

    /// Number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true once constructed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in load order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::embedded()
    }
}
