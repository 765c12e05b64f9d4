//! Word lists and the game dictionary
//!
//! Provides the embedded word list compiled into the binary, a file loader for
//! external lists, and the `Dictionary` used to validate guesses and pick
//! solutions.

mod dictionary;
mod embedded;
pub mod loader;

pub use dictionary::Dictionary;
pub use embedded::{FALLBACK_WORDS, WORDS, WORDS_COUNT};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_words_are_valid() {
        for &word in WORDS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
        }
    }

    #[test]
    fn fallback_words_are_valid() {
        assert!(!FALLBACK_WORDS.is_empty());
        assert_eq!(loader::words_from_slice(FALLBACK_WORDS).len(), FALLBACK_WORDS.len());
    }

    #[test]
    fn embedded_list_is_not_empty() {
        assert!(WORDS_COUNT > 0);
    }
}
