//! Per-letter feedback for a single guess
//!
//! Each position of a guess is classified as:
//! - `Correct` (right letter, right position)
//! - `Present` (letter in the solution, wrong position)
//! - `Absent` (letter not in the solution, after duplicates are consumed)

use super::word::{WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};

/// Status of one guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    /// Emoji tile for this status
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Feedback for a guess: one status per letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback([LetterStatus; WORD_LENGTH]);

impl Feedback {
    /// All letters correct
    pub const PERFECT: Self = Self([LetterStatus::Correct; WORD_LENGTH]);

    /// Calculate the feedback when `guess` is played against `solution`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches as correct and consume that solution letter
    /// 2. Second pass: for every remaining position, consume the leftmost
    ///    unconsumed occurrence of the guessed letter and mark it present,
    ///    otherwise mark it absent
    ///
    /// A letter is therefore credited at most as many times as it occurs in
    /// the solution.
    ///
    /// # Examples
    /// ```
    /// use wordle_server::core::{Feedback, LetterStatus::*, Word};
    ///
    /// let guess = Word::new("alloy").unwrap();
    /// let solution = Word::new("apple").unwrap();
    ///
    /// let feedback = Feedback::calculate(&guess, &solution);
    /// assert_eq!(feedback.statuses(), &[Correct, Present, Absent, Absent, Absent]);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, solution: &Word) -> Self {
        let mut result = [LetterStatus::Absent; WORD_LENGTH];
        let mut consumed = [false; WORD_LENGTH];

        // Allow: Index needed to compare guess[i] with solution[i] and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess.char_at(i) == solution.char_at(i) {
                result[i] = LetterStatus::Correct;
                consumed[i] = true;
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == LetterStatus::Correct {
                continue;
            }

            let letter = guess.char_at(i);
            let available =
                (0..WORD_LENGTH).find(|&j| !consumed[j] && solution.char_at(j) == letter);

            if let Some(j) = available {
                result[i] = LetterStatus::Present;
                consumed[j] = true;
            }
        }

        Self(result)
    }

    /// Statuses in letter order
    #[inline]
    #[must_use]
    pub const fn statuses(&self) -> &[LetterStatus; WORD_LENGTH] {
        &self.0
    }

    /// Check if every letter is correct
    #[inline]
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self == Self::PERFECT
    }

    /// Count the positions with the given status
    #[must_use]
    pub fn count(self, status: LetterStatus) -> usize {
        self.0.iter().filter(|&&s| s == status).count()
    }

    /// Convert feedback to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.0.iter().map(|s| s.emoji()).collect()
    }
}
