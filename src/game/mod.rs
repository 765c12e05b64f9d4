//! Game sessions and their lifecycle
//!
//! A session is `Active` until it is won or runs out of attempts; both end
//! states are final.

mod controller;
mod error;
mod locks;
mod session;

pub use controller::{
    GameController, GameState, GuessOutcome, IN_PROGRESS_MESSAGE, LOST_MESSAGE,
    SUBMITTED_MESSAGE, WIN_MESSAGE, validate_guess,
};
pub use error::{GameError, GuessError};
pub use locks::{SessionGuard, SessionLocks};
pub use session::{GameSession, GameStatus, GuessRecord, MAX_ATTEMPTS, SessionUpdate};
