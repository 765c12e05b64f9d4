//! Display functions for command results

use super::formatters::{format_guess, format_keyboard};
use crate::core::{Feedback, KeyStatuses, LetterStatus, Word};
use colored::Colorize;

/// Print the feedback and keyboard for one guess against a solution
pub fn print_score(guess: &Word, solution: &Word) {
    let feedback = Feedback::calculate(guess, solution);
    let keys = KeyStatuses::from_guesses([guess], solution);

    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "Guess {} against {}",
        guess.text().bright_white().bold(),
        solution.text().bright_yellow().bold()
    );
    println!("{}", "─".repeat(40).cyan());

    println!("\n  {}  {}", format_guess(guess, feedback), feedback.to_emoji());
    println!(
        "\n  correct: {}  present: {}  absent: {}\n",
        feedback.count(LetterStatus::Correct),
        feedback.count(LetterStatus::Present),
        feedback.count(LetterStatus::Absent)
    );

    for row in format_keyboard(&keys) {
        println!("  {row}");
    }
    println!();

    if feedback.is_perfect() {
        println!("{}", "✅ Solved!".green().bold());
    }
}
