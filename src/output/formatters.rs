//! Formatting utilities for terminal output

use crate::core::{Feedback, KeyStatus, KeyStatuses, Word};
use colored::{ColoredString, Colorize};

/// Keyboard rows in QWERTY order
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// A letter as a colored tile
#[must_use]
pub fn tile(letter: char, status: KeyStatus) -> ColoredString {
    let text = format!(" {letter} ");
    match status {
        KeyStatus::Correct => text.black().on_green().bold(),
        KeyStatus::Present => text.black().on_yellow().bold(),
        KeyStatus::Absent => text.white().on_bright_black(),
        KeyStatus::Unused => text.normal(),
    }
}

/// Guess letters colored by their feedback
#[must_use]
pub fn format_guess(guess: &Word, feedback: Feedback) -> String {
    guess
        .chars()
        .iter()
        .zip(feedback.statuses())
        .map(|(&letter, &status)| tile(char::from(letter), status.into()).to_string())
        .collect()
}

/// Keyboard rows with each key colored by its status
#[must_use]
pub fn format_keyboard(keys: &KeyStatuses) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let tiles: String = row
                .bytes()
                .map(|letter| tile(char::from(letter), keys.get(letter)).to_string())
                .collect();
            format!("{}{tiles}", " ".repeat(indent))
        })
        .collect()
}
