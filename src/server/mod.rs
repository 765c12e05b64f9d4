//! HTTP server
//!
//! Routes under the configured prefix:
//! - `POST /game` start a game
//! - `POST /game/{game_id}/guess` submit a guess
//! - `GET /game/{game_id}` read game state
//! - `GET /game/{game_id}/key-statuses` read keyboard state
//!
//! `GET /api/hello` is always mounted as a liveness check.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{CREATED_MESSAGE, CreateGameResponse, GuessRequest};

use crate::config::{ServerConfig, StoreBackend};
use crate::game::GameController;
use crate::store::{FirestoreStore, MemoryStore, SessionStore};
use crate::wordlists::Dictionary;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<GameController>,
    /// Return the solution from `POST /game`
    pub debug: bool,
}

/// Build the application router
///
/// # Errors
/// Returns an error if an allowed origin is not a valid header value.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let game_routes = Router::new()
        .route("/game", post(handlers::create_game))
        .route("/game/{game_id}", get(handlers::get_game))
        .route("/game/{game_id}/guess", post(handlers::submit_guess))
        .route(
            "/game/{game_id}/key-statuses",
            get(handlers::get_key_statuses),
        );

    let prefix = config.api_prefix();
    let router = if prefix.is_empty() {
        game_routes
    } else {
        Router::new().nest(&prefix, game_routes)
    };

    Ok(router
        .route("/api/hello", get(handlers::hello))
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// CORS policy restricted to the configured origins
///
/// # Errors
/// Returns an error if an origin cannot be used as a header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .with_context(|| format!("invalid allowed origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]))
}

/// Construct the configured session store
///
/// # Errors
/// Returns an error if the Firestore settings are incomplete.
pub fn build_store(config: &ServerConfig) -> Result<Arc<dyn SessionStore>> {
    match config.store {
        StoreBackend::Memory => {
            warn!("using in-memory session store; games are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Firestore => {
            let store = FirestoreStore::new(config.firestore()?);
            info!(collection = store.collection_url(), "using firestore session store");
            Ok(Arc::new(store))
        }
    }
}

/// Run the server until Ctrl-C
///
/// # Errors
/// Returns an error if the store cannot be configured or the address cannot be bound.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let dictionary = Arc::new(Dictionary::load(config.word_list.as_deref()));
    info!(words = dictionary.len(), "dictionary loaded");

    let store = build_store(&config)?;
    if config.debug {
        warn!("debug mode: new games return their solution");
    }

    let state = AppState {
        controller: Arc::new(GameController::new(dictionary, store)),
        debug: config.debug,
    };
    let router = build_router(state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(address = %config.bind, prefix = %config.api_prefix(), "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
