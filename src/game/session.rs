//! Game session record
//!
//! One session is one game: a hidden solution plus an append-only guess history.

use crate::core::{Feedback, KeyStatuses, Word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of guesses per game
pub const MAX_ATTEMPTS: usize = 6;

/// A submitted guess with the feedback computed at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub statuses: Feedback,
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

/// Persisted state of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub game_id: String,
    pub solution: Word,
    #[serde(default)]
    pub guesses: Vec<GuessRecord>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub won: bool,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    /// Start a new game with a fresh random identifier
    #[must_use]
    pub fn new(solution: Word) -> Self {
        Self {
            game_id: Uuid::new_v4().to_string(),
            solution,
            guesses: Vec::new(),
            game_over: false,
            won: false,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match (self.game_over, self.won) {
            (false, _) => GameStatus::Active,
            (true, true) => GameStatus::Won,
            (true, false) => GameStatus::Lost,
        }
    }

    /// Guesses left before the game is lost; never negative
    #[must_use]
    pub const fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.guesses.len())
    }

    /// Score `word`, append it and settle the outcome flags
    ///
    /// Callers check that the session is active and below the attempt limit.
    pub fn apply_guess(&mut self, word: Word) -> Feedback {
        let statuses = Feedback::calculate(&word, &self.solution);
        let won = word == self.solution;

        self.guesses.push(GuessRecord { word, statuses });
        self.won = won;
        self.game_over = won || self.guesses.len() >= MAX_ATTEMPTS;

        statuses
    }

    /// Keyboard state derived from the guess history
    #[must_use]
    pub fn key_statuses(&self) -> KeyStatuses {
        KeyStatuses::from_guesses(self.guesses.iter().map(|g| &g.word), &self.solution)
    }

    /// Apply a partial update as a document store would
    pub fn apply_update(&mut self, update: &SessionUpdate) {
        if let Some(guesses) = &update.guesses {
            self.guesses.clone_from(guesses);
        }
        if let Some(won) = update.won {
            self.won = won;
        }
        self.game_over = update.game_over;
    }
}

/// Fields written back after a request mutates a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub guesses: Option<Vec<GuessRecord>>,
    pub won: Option<bool>,
    pub game_over: bool,
}

impl SessionUpdate {
    /// Write the guess list and both flags
    #[must_use]
    pub fn after_guess(session: &GameSession) -> Self {
        Self {
            guesses: Some(session.guesses.clone()),
            won: Some(session.won),
            game_over: session.game_over,
        }
    }

    /// Only mark the game as over
    #[must_use]
    pub const fn finish() -> Self {
        Self {
            guesses: None,
            won: None,
            game_over: true,
        }
    }

    /// Names of the fields this update writes, in document casing
    #[must_use]
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut paths = Vec::with_capacity(3);
        if self.guesses.is_some() {
            paths.push("guesses");
        }
        if self.won.is_some() {
            paths.push("won");
        }
        paths.push("gameOver");
        paths
    }
}
