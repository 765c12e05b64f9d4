//! Route handlers

use super::AppState;
use super::error::ApiError;
use crate::core::{KeyStatuses, Word};
use crate::game::{GameState, GuessOutcome};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CREATED_MESSAGE: &str = "New game created successfully";

/// Response to `POST /game`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: String,
    pub message: String,
    /// Only filled in debug mode; `null` otherwise
    pub solution: Option<Word>,
}

/// Body of `POST /game/{game_id}/guess`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

pub async fn hello() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Hey, I am the Wordle API",
        "status": 200
    }))
}

pub async fn create_game(
    State(state): State<AppState>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let session = state.controller.create_game().await?;

    let solution = state.debug.then(|| {
        debug!(game_id = %session.game_id, solution = %session.solution, "debug mode, returning solution");
        session.solution.clone()
    });

    Ok(Json(CreateGameResponse {
        game_id: session.game_id,
        message: CREATED_MESSAGE.to_string(),
        solution,
    }))
}

pub async fn submit_guess(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessOutcome>, ApiError> {
    let Json(request) = body?;
    let outcome = state
        .controller
        .submit_guess(&game_id, &request.guess)
        .await?;
    Ok(Json(outcome))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    Ok(Json(state.controller.get_state(&game_id).await?))
}

pub async fn get_key_statuses(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<KeyStatuses>, ApiError> {
    Ok(Json(state.controller.get_key_statuses(&game_id).await?))
}
