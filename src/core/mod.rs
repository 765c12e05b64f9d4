//! Core domain types for Wordle
//!
//! This module contains the pure game rules with no I/O.
//! Scoring a guess and aggregating keyboard state are deterministic functions of
//! their inputs.

mod feedback;
mod keyboard;
mod word;

pub use feedback::{Feedback, LetterStatus};
pub use keyboard::{ALPHABET_SIZE, KeyStatus, KeyStatuses};
pub use word::{WORD_LENGTH, Word, WordError};
