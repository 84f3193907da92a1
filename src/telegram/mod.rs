pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use types::{ApiResponse, Update};

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram api error: {0}")]
    Api(String),
}

/// Minimal Bot API client: long-polled `getUpdates` plus `sendMessage`.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        // No client-wide timeout; getUpdates holds the connection open for
        // the long-poll window. Each request sets its own limit.
        TelegramClient {
            http: reqwest::Client::new(),
            base_url: format!("{API_BASE}/bot{token}"),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, TransportError> {
        let url = format!("{}/{}", self.base_url, method);
        let response: ApiResponse<T> = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .json(&params)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TransportError::Api(
                response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        response
            .result
            .ok_or_else(|| TransportError::Api("missing result".to_string()))
    }

    /// Fetches pending updates, blocking server-side for up to the poll
    /// window. `offset` acknowledges everything before it.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        let _: types::Message = self
            .call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await?;
        Ok(())
    }
}
