//! Push notification provider client
//!
//! Speaks the legacy FCM-style HTTP API: one endpoint, three payload
//! shapes (single token, registration_ids fan-out, /topics/ broadcast).

use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("push provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("push provider returned an unexpected payload: {0}")]
    Payload(String),
}

/// Outbound push channel. Implemented over HTTP in production and by
/// stubs in tests.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Notify one device; returns the provider's success flag.
    async fn notify_single(
        &self,
        token: &str,
        title: &str,
        body: &str,
    ) -> Result<bool, ProviderError>;

    /// Notify many devices; returns one flag per recipient, in order.
    async fn notify_multiple(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> Result<Vec<bool>, ProviderError>;

    /// Broadcast to a topic; returns the provider's success flag.
    async fn notify_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
    ) -> Result<bool, ProviderError>;
}

pub struct HttpPushClient {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

impl HttpPushClient {
    /// Build a client with a bounded request timeout. The provider is
    /// blocking I/O from the caller's perspective; an unreachable
    /// provider must fail the delivery, not hang the request.
    pub fn new(endpoint: &str, server_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            server_key: server_key.to_string(),
        })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(format!("{}/fcm/send", self.endpoint))
            .header("Authorization", format!("key={}", self.server_key))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn notification_payload(title: &str, body: &str) -> Value {
    json!({ "title": title, "body": body })
}

#[async_trait]
impl PushProvider for HttpPushClient {
    async fn notify_single(
        &self,
        token: &str,
        title: &str,
        body: &str,
    ) -> Result<bool, ProviderError> {
        let response = self
            .post(json!({
                "to": token,
                "notification": notification_payload(title, body),
            }))
            .await?;

        Ok(response
            .get("success")
            .and_then(Value::as_i64)
            .unwrap_or(0)
            > 0)
    }

    async fn notify_multiple(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> Result<Vec<bool>, ProviderError> {
        let response = self
            .post(json!({
                "registration_ids": tokens,
                "notification": notification_payload(title, body),
            }))
            .await?;

        // per-recipient results: an entry without an "error" key succeeded
        let results = response
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::Payload("missing 'results' array".to_string()))?;

        Ok(results.iter().map(|r| r.get("error").is_none()).collect())
    }

    async fn notify_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
    ) -> Result<bool, ProviderError> {
        let response = self
            .post(json!({
                "to": format!("/topics/{}", topic),
                "notification": notification_payload(title, body),
            }))
            .await?;

        // topic sends answer with a message_id on success
        Ok(response.get("message_id").is_some()
            || response.get("success").and_then(Value::as_i64).unwrap_or(0) > 0)
    }
}
