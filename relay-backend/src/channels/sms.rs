//! SMS provider client
//!
//! Fire-and-forget: the wire call's outcome is not consulted. Once the
//! send has been invoked the message counts as delivered; transport
//! errors are logged and otherwise ignored.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::push::ProviderError;

/// Outbound SMS channel.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    async fn send(&self, contact: &str, subject: &str, body: &str);
}

pub struct HttpSmsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpSmsClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl SmsProvider for HttpSmsClient {
    async fn send(&self, contact: &str, subject: &str, body: &str) {
        let result = self
            .client
            .post(format!("{}/sms/send", self.endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "to": contact,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await;

        match result {
            Ok(_) => log::info!("sms sent to {}: {}", contact, subject),
            Err(e) => log::warn!("sms send to {} failed: {}", contact, e),
        }
    }
}
