//! Keyboard status aggregation
//!
//! Folds a sequence of guesses into the best-known status of every letter A-Z.

use super::feedback::{Feedback, LetterStatus};
use super::word::Word;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of keys tracked (A-Z)
pub const ALPHABET_SIZE: usize = 26;

/// Best-known status of a single key
///
/// Variants are declared in priority order, so `Ord` gives the upgrade rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    #[default]
    Unused,
    Absent,
    Present,
    Correct,
}

impl From<LetterStatus> for KeyStatus {
    fn from(status: LetterStatus) -> Self {
        match status {
            LetterStatus::Absent => Self::Absent,
            LetterStatus::Present => Self::Present,
            LetterStatus::Correct => Self::Correct,
        }
    }
}

/// Aggregated status for every letter, indexed by `letter - b'A'`
///
/// Serializes as a JSON object keyed by uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStatuses([KeyStatus; ALPHABET_SIZE]);

impl Default for KeyStatuses {
    fn default() -> Self {
        Self([KeyStatus::Unused; ALPHABET_SIZE])
    }
}

impl KeyStatuses {
    /// Compute key statuses for a guess history against a solution
    ///
    /// Feedback is recomputed for every guess. Statuses only ever upgrade,
    /// so the result does not depend on the order of the guesses.
    ///
    /// # Examples
    /// ```
    /// use wordle_server::core::{KeyStatus, KeyStatuses, Word};
    ///
    /// let solution = Word::new("apple").unwrap();
    /// let guesses = [Word::new("alloy").unwrap()];
    ///
    /// let keys = KeyStatuses::from_guesses(&guesses, &solution);
    /// assert_eq!(keys.get(b'A'), KeyStatus::Correct);
    /// assert_eq!(keys.get(b'L'), KeyStatus::Present);
    /// assert_eq!(keys.get(b'O'), KeyStatus::Absent);
    /// assert_eq!(keys.get(b'Z'), KeyStatus::Unused);
    /// ```
    #[must_use]
    pub fn from_guesses<'a, I>(guesses: I, solution: &Word) -> Self
    where
        I: IntoIterator<Item = &'a Word>,
    {
        let mut keys = Self::default();
        for guess in guesses {
            keys.record(guess, Feedback::calculate(guess, solution));
        }
        keys
    }

    /// Merge one scored guess into the aggregate
    pub fn record(&mut self, guess: &Word, feedback: Feedback) {
        for (&letter, &status) in guess.chars().iter().zip(feedback.statuses()) {
            self.upgrade(letter, status.into());
        }
    }

    /// Raise a letter's status if `status` has strictly higher priority
    ///
    /// Non-letters are ignored.
    pub fn upgrade(&mut self, letter: u8, status: KeyStatus) {
        if let Some(slot) = Self::index(letter).map(|i| &mut self.0[i])
            && status > *slot
        {
            *slot = status;
        }
    }

    /// Status of a letter (either case); non-letters read as `Unused`
    #[must_use]
    pub fn get(&self, letter: u8) -> KeyStatus {
        Self::index(letter).map_or(KeyStatus::Unused, |i| self.0[i])
    }

    /// Iterate `(letter, status)` pairs from A to Z
    pub fn iter(&self) -> impl Iterator<Item = (char, KeyStatus)> + '_ {
        (b'A'..=b'Z').zip(self.0.iter()).map(|(l, &s)| (char::from(l), s))
    }

    fn index(letter: u8) -> Option<usize> {
        let upper = letter.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| usize::from(upper - b'A'))
    }
}

impl Serialize for KeyStatuses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ALPHABET_SIZE))?;
        for (letter, status) in self.iter() {
            let mut buf = [0u8; 4];
            map.serialize_entry(letter.encode_utf8(&mut buf), &status)?;
        }
        map.end()
    }
}
