//! Game session controller
//!
//! Validates guesses, enforces the attempt limit and terminal states, and
//! persists each change through a [`SessionStore`].

use super::error::{GameError, GuessError};
use super::locks::SessionLocks;
use super::session::{GameSession, GameStatus, GuessRecord, MAX_ATTEMPTS, SessionUpdate};
use crate::core::{KeyStatuses, Word};
use crate::store::SessionStore;
use crate::wordlists::Dictionary;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const WIN_MESSAGE: &str = "Correct! You won!";
pub const SUBMITTED_MESSAGE: &str = "Guess submitted";
pub const IN_PROGRESS_MESSAGE: &str = "Game in progress";
pub const LOST_MESSAGE: &str = "Game over";

/// Result of a successful guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub guesses: Vec<GuessRecord>,
    pub key_statuses: KeyStatuses,
    pub game_over: bool,
    pub won: bool,
    pub message: String,
    /// Revealed only when the game was lost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Word>,
}

/// Public view of a session; never includes the solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub guesses: Vec<GuessRecord>,
    pub remaining_attempts: usize,
    pub game_over: bool,
    pub won: bool,
    pub message: String,
}

impl From<&GameSession> for GameState {
    fn from(session: &GameSession) -> Self {
        let message = match session.status() {
            GameStatus::Active => IN_PROGRESS_MESSAGE,
            GameStatus::Won => WIN_MESSAGE,
            GameStatus::Lost => LOST_MESSAGE,
        };

        Self {
            guesses: session.guesses.clone(),
            remaining_attempts: session.remaining_attempts(),
            game_over: session.game_over,
            won: session.won,
            message: message.to_string(),
        }
    }
}

/// Check a raw guess before any session is read
///
/// The guess is uppercased, then checked for length, alphabet and
/// dictionary membership in that order.
///
/// # Errors
/// Returns the first [`GuessError`] the guess fails.
pub fn validate_guess(dictionary: &Dictionary, raw: &str) -> Result<Word, GuessError> {
    let word = Word::new(raw)?;
    if !dictionary.contains(&word) {
        return Err(GuessError::UnknownWord);
    }
    Ok(word)
}

/// Coordinates game sessions
///
/// Submissions for the same game id are serialized inside this process, so
/// concurrent requests cannot lose each other's guesses. Several processes
/// sharing one store are not coordinated.
pub struct GameController {
    dictionary: Arc<Dictionary>,
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl GameController {
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            dictionary,
            store,
            locks: SessionLocks::new(),
        }
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Start a game with a random solution
    ///
    /// # Errors
    /// Returns `GameError::Store` if the session cannot be saved.
    pub async fn create_game(&self) -> Result<GameSession, GameError> {
        let session = GameSession::new(self.dictionary.random_word().clone());
        self.store.create(&session).await?;

        info!(game_id = %session.game_id, "created game");
        Ok(session)
    }

    /// Submit a guess to an active game
    ///
    /// # Errors
    /// - `Invalid` if the guess is malformed or not a dictionary word
    /// - `NotFound` if the game does not exist
    /// - `AlreadyFinished` if the game is over
    /// - `AttemptsExceeded` if the game somehow holds a full guess list
    ///   while active; the game is marked over before returning
    /// - `Store` if the session cannot be read or written
    pub async fn submit_guess(&self, game_id: &str, raw: &str) -> Result<GuessOutcome, GameError> {
        let word = validate_guess(&self.dictionary, raw)?;

        let _guard = self.locks.acquire(game_id).await;

        let mut session = self.store.get(game_id).await?.ok_or(GameError::NotFound)?;

        if session.game_over {
            return Err(GameError::AlreadyFinished);
        }

        if session.guesses.len() >= MAX_ATTEMPTS {
            warn!(
                game_id,
                guesses = session.guesses.len(),
                "active game already at attempt limit, closing it"
            );
            self.store.update(game_id, &SessionUpdate::finish()).await?;
            return Err(GameError::AttemptsExceeded);
        }

        let feedback = session.apply_guess(word);
        self.store
            .update(game_id, &SessionUpdate::after_guess(&session))
            .await?;

        debug!(
            game_id,
            attempt = session.guesses.len(),
            feedback = %feedback.to_emoji(),
            "guess recorded"
        );

        let (message, solution) = match session.status() {
            GameStatus::Won => {
                info!(game_id, attempts = session.guesses.len(), "game won");
                (WIN_MESSAGE.to_string(), None)
            }
            GameStatus::Lost => {
                info!(game_id, "game lost");
                (
                    format!("Game over. The word was {}.", session.solution),
                    Some(session.solution.clone()),
                )
            }
            GameStatus::Active => (SUBMITTED_MESSAGE.to_string(), None),
        };

        Ok(GuessOutcome {
            key_statuses: session.key_statuses(),
            guesses: session.guesses,
            game_over: session.game_over,
            won: session.won,
            message,
            solution,
        })
    }

    /// Current state of a game without the solution
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Store` on read failure.
    pub async fn get_state(&self, game_id: &str) -> Result<GameState, GameError> {
        let session = self.load(game_id).await?;
        Ok(GameState::from(&session))
    }

    /// Keyboard state for a game
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Store` on read failure.
    pub async fn get_key_statuses(&self, game_id: &str) -> Result<KeyStatuses, GameError> {
        let session = self.load(game_id).await?;
        Ok(session.key_statuses())
    }

    async fn load(&self, game_id: &str) -> Result<GameSession, GameError> {
        self.store.get(game_id).await?.ok_or(GameError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, KeyStatus, LetterStatus};
    use crate::store::{MemoryStore, StoreError};
    use crate::wordlists::loader::words_from_slice;
    use async_trait::async_trait;

    const WORDS: &[&str] = &["apple", "paper", "alloy", "lemon", "ghost", "train", "smile"];

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(Dictionary::new(words_from_slice(WORDS)))
    }

    fn controller() -> (GameController, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (GameController::new(dictionary(), store.clone()), store)
    }

    /// Seed a game with a known solution
    async fn seeded(store: &MemoryStore, solution: &str) -> String {
        let session = GameSession::new(Word::new(solution).unwrap());
        let id = session.game_id.clone();
        store.put(session).await;
        id
    }

    #[test]
    fn validation_order() {
        let dictionary = dictionary();
        assert_eq!(validate_guess(&dictionary, "ab3de"), Err(GuessError::NonAlphabetic));
        assert_eq!(validate_guess(&dictionary, "ABCDEF"), Err(GuessError::WrongLength));
        assert_eq!(validate_guess(&dictionary, "ZZZZZ"), Err(GuessError::UnknownWord));
        assert_eq!(validate_guess(&dictionary, "ab3"), Err(GuessError::WrongLength));
        assert_eq!(validate_guess(&dictionary, ""), Err(GuessError::WrongLength));
        assert_eq!(validate_guess(&dictionary, "apple").unwrap().text(), "APPLE");
    }

    #[tokio::test]
    async fn create_game_persists_dictionary_solution() {
        let (controller, store) = controller();
        let session = controller.create_game().await.unwrap();

        let stored = store.get(&session.game_id).await.unwrap().unwrap();
        assert_eq!(stored, session);
        assert!(controller.dictionary().contains(&stored.solution));
        assert_eq!(stored.solution.text().len(), 5);
        assert!(stored.guesses.is_empty());
        assert!(!stored.game_over);
        assert!(!stored.won);
    }

    #[tokio::test]
    async fn correct_first_guess_wins() {
        let (controller, _store) = controller();
        let session = controller.create_game().await.unwrap();

        let outcome = controller
            .submit_guess(&session.game_id, session.solution.text())
            .await
            .unwrap();

        assert!(outcome.won);
        assert!(outcome.game_over);
        assert_eq!(outcome.message, WIN_MESSAGE);
        assert_eq!(outcome.guesses.len(), 1);
        assert_eq!(outcome.guesses[0].statuses, Feedback::PERFECT);
        assert!(outcome.solution.is_none());
    }

    #[tokio::test]
    async fn guess_is_scored_and_persisted() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;

        let outcome = controller.submit_guess(&id, "alloy").await.unwrap();
        assert!(!outcome.game_over);
        assert_eq!(outcome.message, SUBMITTED_MESSAGE);
        assert_eq!(
            outcome.guesses[0].statuses.statuses(),
            &[
                LetterStatus::Correct,
                LetterStatus::Present,
                LetterStatus::Absent,
                LetterStatus::Absent,
                LetterStatus::Absent
            ]
        );
        assert_eq!(outcome.key_statuses.get(b'L'), KeyStatus::Present);

        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.guesses, outcome.guesses);
    }

    #[tokio::test]
    async fn lowercase_guess_is_accepted() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;

        let outcome = controller.submit_guess(&id, "PaPeR").await.unwrap();
        assert_eq!(outcome.guesses[0].word.text(), "PAPER");
    }

    #[tokio::test]
    async fn six_misses_lose_and_reveal_solution() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;

        for attempt in 1..MAX_ATTEMPTS {
            let outcome = controller.submit_guess(&id, "paper").await.unwrap();
            assert!(!outcome.game_over, "attempt {attempt}");
        }

        let last = controller.submit_guess(&id, "lemon").await.unwrap();
        assert!(last.game_over);
        assert!(!last.won);
        assert_eq!(last.message, "Game over. The word was APPLE.");
        assert_eq!(last.solution.as_ref().map(Word::text), Some("APPLE"));

        let err = controller.submit_guess(&id, "apple").await.unwrap_err();
        assert!(matches!(err, GameError::AlreadyFinished));

        let state = controller.get_state(&id).await.unwrap();
        assert_eq!(state.message, LOST_MESSAGE);
        assert_eq!(state.remaining_attempts, 0);
    }

    #[tokio::test]
    async fn won_game_rejects_further_guesses() {
        let (controller, store) = controller();
        let id = seeded(&store, "ghost").await;

        controller.submit_guess(&id, "train").await.unwrap();
        controller.submit_guess(&id, "ghost").await.unwrap();

        let err = controller.submit_guess(&id, "smile").await.unwrap_err();
        assert!(matches!(err, GameError::AlreadyFinished));

        let state = controller.get_state(&id).await.unwrap();
        assert_eq!(state.guesses.len(), 2);
        assert!(state.won && state.game_over);
        assert_eq!(state.message, WIN_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_guesses_do_not_mutate() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;
        let before = store.get(&id).await.unwrap();

        for raw in ["ab3de", "ABCDEF", "ZZZZZ"] {
            let err = controller.submit_guess(&id, raw).await.unwrap_err();
            assert!(matches!(err, GameError::Invalid(_)), "{raw}");
        }

        assert_eq!(store.get(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn validation_runs_before_lookup() {
        let (controller, _store) = controller();
        let err = controller.submit_guess("missing", "ZZZZZ").await.unwrap_err();
        assert!(matches!(err, GameError::Invalid(GuessError::UnknownWord)));

        let err = controller.submit_guess("missing", "apple").await.unwrap_err();
        assert!(matches!(err, GameError::NotFound));
    }

    #[tokio::test]
    async fn full_active_game_is_closed() {
        let (controller, store) = controller();

        // Inconsistent record: six guesses but still active
        let mut session = GameSession::new(Word::new("apple").unwrap());
        for _ in 0..MAX_ATTEMPTS {
            session.apply_guess(Word::new("paper").unwrap());
        }
        session.game_over = false;
        let id = session.game_id.clone();
        store.put(session).await;

        let err = controller.submit_guess(&id, "lemon").await.unwrap_err();
        assert!(matches!(err, GameError::AttemptsExceeded));

        let stored = store.get(&id).await.unwrap().unwrap();
        assert!(stored.game_over);
        assert!(!stored.won);
        assert_eq!(stored.guesses.len(), MAX_ATTEMPTS);

        let err = controller.submit_guess(&id, "lemon").await.unwrap_err();
        assert!(matches!(err, GameError::AlreadyFinished));
    }

    #[tokio::test]
    async fn state_hides_solution_and_counts_attempts() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;

        let state = controller.get_state(&id).await.unwrap();
        assert_eq!(state.remaining_attempts, MAX_ATTEMPTS);
        assert_eq!(state.message, IN_PROGRESS_MESSAGE);

        controller.submit_guess(&id, "paper").await.unwrap();
        let state = controller.get_state(&id).await.unwrap();
        assert_eq!(state.remaining_attempts, MAX_ATTEMPTS - 1);

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("solution").is_none());
        assert_eq!(json["remainingAttempts"], 5);
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;
        controller.submit_guess(&id, "alloy").await.unwrap();

        let before = store.get(&id).await.unwrap();
        let state1 = controller.get_state(&id).await.unwrap();
        let keys1 = controller.get_key_statuses(&id).await.unwrap();
        let state2 = controller.get_state(&id).await.unwrap();
        let keys2 = controller.get_key_statuses(&id).await.unwrap();

        assert_eq!(state1, state2);
        assert_eq!(keys1, keys2);
        assert_eq!(store.get(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn key_statuses_aggregate_history() {
        let (controller, store) = controller();
        let id = seeded(&store, "apple").await;
        controller.submit_guess(&id, "lemon").await.unwrap();
        controller.submit_guess(&id, "alloy").await.unwrap();

        let keys = controller.get_key_statuses(&id).await.unwrap();
        assert_eq!(keys.get(b'A'), KeyStatus::Correct);
        assert_eq!(keys.get(b'L'), KeyStatus::Present);
        assert_eq!(keys.get(b'E'), KeyStatus::Present);
        assert_eq!(keys.get(b'M'), KeyStatus::Absent);
        assert_eq!(keys.get(b'Z'), KeyStatus::Unused);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let (controller, _store) = controller();
        assert!(matches!(
            controller.get_state("missing").await,
            Err(GameError::NotFound)
        ));
        assert!(matches!(
            controller.get_key_statuses("missing").await,
            Err(GameError::NotFound)
        ));
    }

    #[tokio::test]
    async fn concurrent_guesses_are_not_lost() {
        let (controller, store) = controller();
        let controller = Arc::new(controller);
        let id = seeded(&store, "apple").await;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let controller = Arc::clone(&controller);
                let id = id.clone();
                tokio::spawn(async move { controller.submit_guess(&id, "paper").await })
            })
            .collect();

        let mut accepted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(GameError::AlreadyFinished) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, MAX_ATTEMPTS);
        assert_eq!(rejected, 10 - MAX_ATTEMPTS);

        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.guesses.len(), MAX_ATTEMPTS);
        assert!(stored.game_over);
    }

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get(&self, _game_id: &str) -> Result<Option<GameSession>, StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn create(&self, _session: &GameSession) -> Result<(), StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn update(&self, _game_id: &str, _update: &SessionUpdate) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let controller = GameController::new(dictionary(), Arc::new(FailingStore));

        assert!(matches!(controller.create_game().await, Err(GameError::Store(_))));
        assert!(matches!(
            controller.submit_guess("id", "apple").await,
            Err(GameError::Store(_))
        ));
        assert!(matches!(controller.get_state("id").await, Err(GameError::Store(_))));
    }
}
