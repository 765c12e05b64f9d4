//! Terminal output formatting
//!
//! Colored rendering of feedback and keyboard state for the CLI.

pub mod display;
pub mod formatters;

pub use display::print_score;
