//! Server configuration
//!
//! Every setting is a CLI flag with an environment variable fallback.

use crate::store::FirestoreConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where sessions are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// In-process map; sessions vanish on restart
    Memory,
    /// Firestore REST API or emulator
    Firestore,
}

/// Settings for `serve`
#[derive(Debug, Clone, Parser)]
#[command(name = "serve", about = "Run the game server")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "WORDLE_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Word list file, one word per line (default: embedded dictionary)
    #[arg(long, env = "WORDLE_WORD_LIST")]
    pub word_list: Option<PathBuf>,

    /// Origins allowed to call the API (repeatable or comma separated)
    #[arg(
        long = "allowed-origin",
        env = "WORDLE_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = [
            "http://localhost:3000",
            "http://localhost:3001",
            "http://127.0.0.1:3000",
            "http://127.0.0.1:3001",
        ]
    )]
    pub allowed_origins: Vec<String>,

    /// Path prefix for the game routes
    #[arg(long, env = "WORDLE_API_PREFIX", default_value = "/api/wordle")]
    pub api_prefix: String,

    /// Include the solution when a game is created
    #[arg(long, env = "WORDLE_DEBUG")]
    pub debug: bool,

    /// Session store backend
    #[arg(long, env = "WORDLE_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    pub store: StoreBackend,

    /// Firestore project id (required with --store firestore)
    #[arg(long, env = "FIRESTORE_PROJECT_ID")]
    pub firestore_project: Option<String>,

    /// Firestore base URL; point at the emulator for local runs
    #[arg(
        long,
        env = "FIRESTORE_ENDPOINT",
        default_value = "https://firestore.googleapis.com"
    )]
    pub firestore_endpoint: String,

    /// OAuth bearer token for Firestore
    #[arg(long, env = "FIRESTORE_TOKEN", hide_env_values = true)]
    pub firestore_token: Option<String>,

    /// Collection holding game documents
    #[arg(long, env = "WORDLE_COLLECTION", default_value = "wordle_games")]
    pub collection: String,
}

impl ServerConfig {
    /// Prefix with a leading slash and no trailing slash; empty means root
    #[must_use]
    pub fn api_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Firestore connection settings
    ///
    /// # Errors
    /// Returns an error if no project id is configured.
    pub fn firestore(&self) -> Result<FirestoreConfig> {
        let project_id = self
            .firestore_project
            .clone()
            .filter(|p| !p.trim().is_empty())
            .context("--firestore-project (FIRESTORE_PROJECT_ID) is required for the firestore store")?;

        Ok(FirestoreConfig {
            project_id,
            endpoint: self.firestore_endpoint.clone(),
            collection: self.collection.clone(),
            token: self.firestore_token.clone(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::parse_from(["serve"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerConfig {
        ServerConfig::try_parse_from(std::iter::once("serve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn prefix_normalized() {
        let mut config = parse(&[]);
        config.api_prefix = "api/wordle/".to_string();
        assert_eq!(config.api_prefix(), "/api/wordle");

        config.api_prefix = "/".to_string();
        assert_eq!(config.api_prefix(), "");
    }

    #[test]
    fn origins_comma_separated() {
        let config = parse(&["--allowed-origin", "http://a.test,http://b.test"]);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn firestore_backend_flags() {
        let config = parse(&[
            "--store",
            "firestore",
            "--firestore-project",
            "demo",
            "--firestore-endpoint",
            "http://localhost:8080",
        ]);
        assert_eq!(config.store, StoreBackend::Firestore);

        let firestore = config.firestore().unwrap();
        assert_eq!(firestore.project_id, "demo");
        assert_eq!(firestore.endpoint, "http://localhost:8080");
    }

    #[test]
    fn firestore_requires_project() {
        let mut config = parse(&["--store", "firestore"]);
        config.firestore_project = None;
        assert!(config.firestore().is_err());
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(ServerConfig::try_parse_from(["serve", "--bind", "not-an-address"]).is_err());
    }
}
