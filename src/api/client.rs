use crate::api::types::{ActionPayload, Envelope};
use crate::api::{ActionAck, ApiError, GameApi, RosterCharacter};
use crate::state::CharacterSnapshot;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

/// Artifacts MMO HTTP client with bearer-token auth.
pub struct HttpGameApi {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpGameApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// Unwrap the `{ "data": ... }` envelope or classify the failure.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn action(
        &self,
        name: &str,
        action: &str,
        body: Option<Value>,
    ) -> Result<ActionAck, ApiError> {
        let path = format!("/my/{}/action/{}", name, action);
        let payload: ActionPayload = self.post_json(&path, body).await?;
        debug!(
            character = %name,
            action = %action,
            cooldown = payload.cooldown.remaining_seconds,
            "Action accepted"
        );
        Ok(ActionAck {
            cooldown_seconds: payload.cooldown.remaining_seconds,
        })
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn fetch_roster(&self) -> Result<Vec<RosterCharacter>, ApiError> {
        self.get_json("/my/characters").await
    }

    async fn fetch_character(&self, name: &str) -> Result<CharacterSnapshot, ApiError> {
        let path = format!("/characters/{}", name);
        let mut snapshot: CharacterSnapshot = self.get_json(&path).await?;
        snapshot.inventory.retain(|item| item.quantity > 0);
        Ok(snapshot)
    }

    async fn move_character(&self, name: &str, x: i32, y: i32) -> Result<ActionAck, ApiError> {
        self.action(name, "move", Some(json!({ "x": x, "y": y }))).await
    }

    async fn gather(&self, name: &str) -> Result<ActionAck, ApiError> {
        self.action(name, "gathering", None).await
    }

    async fn craft(&self, name: &str, code: &str, quantity: i32) -> Result<ActionAck, ApiError> {
        self.action(
            name,
            "crafting",
            Some(json!({ "code": code, "quantity": quantity })),
        )
        .await
    }
}
