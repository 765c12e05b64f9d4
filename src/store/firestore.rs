//! Firestore REST session store
//!
//! Talks to the Firestore v1 REST API (or the local emulator) with `reqwest`.
//! Sessions are stored one document per game in a single collection, using
//! Firestore's typed value encoding.

use super::{SessionStore, StoreError};
use crate::game::{GameSession, SessionUpdate};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value, json};
use tracing::debug;

/// Connection settings for [`FirestoreStore`]
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// Base URL, e.g. `https://firestore.googleapis.com` or `http://localhost:8080`
    pub endpoint: String,
    pub collection: String,
    /// OAuth bearer token; the emulator accepts requests without one
    pub token: Option<String>,
}

/// Session store backed by a Firestore collection
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    collection_url: String,
    token: Option<String>,
}

impl FirestoreStore {
    #[must_use]
    pub fn new(config: FirestoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, config: FirestoreConfig) -> Self {
        let collection_url = format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            config.endpoint.trim_end_matches('/'),
            config.project_id,
            config.collection
        );

        Self {
            client,
            collection_url,
            token: config.token,
        }
    }

    /// URL of the collection holding the game documents
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn document_url(&self, game_id: &str) -> String {
        format!("{}/{game_id}", self.collection_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SessionStore for FirestoreStore {
    async fn get(&self, game_id: &str) -> Result<Option<GameSession>, StoreError> {
        if !is_document_id(game_id) {
            return Ok(None);
        }

        let response = self
            .authorize(self.client.get(self.document_url(game_id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Value = Self::check(response).await?.json().await?;
        decode_document(game_id, &document).map(Some)
    }

    async fn create(&self, session: &GameSession) -> Result<(), StoreError> {
        let fields = encode_session(session)?;

        let response = self
            .authorize(self.client.post(&self.collection_url))
            .query(&[("documentId", session.game_id.as_str())])
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::Conflict(session.game_id.clone()));
        }

        Self::check(response).await?;
        debug!(game_id = %session.game_id, "created firestore document");
        Ok(())
    }

    async fn update(&self, game_id: &str, update: &SessionUpdate) -> Result<(), StoreError> {
        if !is_document_id(game_id) {
            return Err(StoreError::Missing(game_id.to_string()));
        }

        let fields = encode_update(update)?;
        let mut query: Vec<(&str, &str)> = update
            .field_paths()
            .into_iter()
            .map(|path| ("updateMask.fieldPaths", path))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let response = self
            .authorize(self.client.patch(self.document_url(game_id)))
            .query(&query)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::Missing(game_id.to_string()));
        }

        Self::check(response).await?;
        Ok(())
    }
}

/// Game ids are generated UUIDs; anything else never names a document
fn is_document_id(game_id: &str) -> bool {
    !game_id.is_empty()
        && game_id.len() <= 128
        && game_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn encode_session(session: &GameSession) -> Result<Map<String, Value>, StoreError> {
    let value = serde_json::to_value(session)?;

    let mut fields = match value {
        Value::Object(map) => encode_fields(&map),
        _ => Map::new(),
    };
    fields.insert(
        "createdAt".to_string(),
        json!({
            "timestampValue": session.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        }),
    );
    Ok(fields)
}

fn encode_update(update: &SessionUpdate) -> Result<Map<String, Value>, StoreError> {
    let mut fields = Map::new();
    if let Some(guesses) = &update.guesses {
        let value = serde_json::to_value(guesses)?;
        fields.insert("guesses".to_string(), encode_value(&value));
    }
    if let Some(won) = update.won {
        fields.insert("won".to_string(), json!({ "booleanValue": won }));
    }
    fields.insert(
        "gameOver".to_string(),
        json!({ "booleanValue": update.game_over }),
    );
    Ok(fields)
}

fn decode_document(game_id: &str, document: &Value) -> Result<GameSession, StoreError> {
    let decode_error = |reason: String| StoreError::Decode {
        game_id: game_id.to_string(),
        reason,
    };

    let fields = match document.get("fields") {
        Some(Value::Object(fields)) => fields.clone(),
        Some(_) => return Err(decode_error("fields is not an object".to_string())),
        None => Map::new(),
    };

    let plain = decode_fields(&fields).map_err(decode_error)?;
    serde_json::from_value(Value::Object(plain)).map_err(|e| decode_error(e.to_string()))
}

fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Convert a plain JSON value into Firestore's typed representation
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, String> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Convert a Firestore typed value back into plain JSON
///
/// Timestamps and references decode to their string form.
fn decode_value(value: &Value) -> Result<Value, String> {
    let Value::Object(typed) = value else {
        return Err(format!("expected typed value, got {value}"));
    };

    let Some((kind, inner)) = typed.iter().next() else {
        return Err("empty typed value".to_string());
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue" => {
            Ok(inner.clone())
        }
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| format!("bad integerValue {s}: {e}")),
            other => Ok(other.clone()),
        },
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map_or_else(|| Ok(Vec::new()), |items| items.iter().map(decode_value).collect())
            .map(Value::Array),
        "mapValue" => match inner.get("fields") {
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            _ => Ok(Value::Object(Map::new())),
        },
        other => Err(format!("unsupported value type {other}")),
    }
}
