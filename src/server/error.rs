//! HTTP error responses

use crate::game::GameError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// Error returned by a handler, rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::NotFound => Self::new(StatusCode::NOT_FOUND, error.to_string()),
            GameError::Invalid(_) | GameError::AlreadyFinished | GameError::AttemptsExceeded => {
                Self::new(StatusCode::BAD_REQUEST, error.to_string())
            }
            GameError::Store(source) => {
                error!(error = %source, "session store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// Malformed request bodies keep axum's status but use the `{"error": ...}` shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, message = %self.message, "request failed");
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GuessError;
    use crate::store::StoreError;

    #[test]
    fn status_mapping() {
        let cases = [
            (GameError::Invalid(GuessError::WrongLength), StatusCode::BAD_REQUEST),
            (GameError::Invalid(GuessError::UnknownWord), StatusCode::BAD_REQUEST),
            (GameError::AlreadyFinished, StatusCode::BAD_REQUEST),
            (GameError::AttemptsExceeded, StatusCode::BAD_REQUEST),
            (GameError::NotFound, StatusCode::NOT_FOUND),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status, status);
        }
    }

    #[test]
    fn store_detail_is_not_exposed() {
        let error = ApiError::from(GameError::Store(StoreError::Status {
            status: 403,
            body: "secret detail".to_string(),
        }));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message.contains("secret"));
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::from(GameError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
