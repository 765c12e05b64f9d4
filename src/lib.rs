//! Wordle Server
//!
//! A Wordle game backend: scores guesses, tracks keyboard state and persists
//! game sessions behind a small JSON API.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_server::core::{Feedback, KeyStatus, KeyStatuses, Word};
//!
//! let guess = Word::new("paper").unwrap();
//! let solution = Word::new("apple").unwrap();
//!
//! let feedback = Feedback::calculate(&guess, &solution);
//! println!("{}", feedback.to_emoji());
//!
//! let keys = KeyStatuses::from_guesses([&guess], &solution);
//! assert_eq!(keys.get(b'P'), KeyStatus::Correct);
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod wordlists;

// Game sessions and rules
pub mod game;

// Session persistence
pub mod store;

// HTTP API
pub mod server;

pub mod config;
pub mod logging;

// Terminal output formatting
pub mod output;
