//! Game errors

use crate::core::WordError;
use crate::store::StoreError;
use thiserror::Error;

/// Why a guess was rejected before touching any session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Guess must be 5 letters")]
    WrongLength,
    #[error("Guess must contain only letters")]
    NonAlphabetic,
    #[error("Not a valid word")]
    UnknownWord,
}

impl From<WordError> for GuessError {
    fn from(error: WordError) -> Self {
        match error {
            WordError::InvalidLength(_) => Self::WrongLength,
            WordError::InvalidCharacters => Self::NonAlphabetic,
        }
    }
}

/// Errors from game operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Invalid(#[from] GuessError),
    #[error("Game not found")]
    NotFound,
    #[error("Game is already over")]
    AlreadyFinished,
    #[error("Maximum attempts reached")]
    AttemptsExceeded,
    #[error("session store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for GameError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Missing(_) => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
