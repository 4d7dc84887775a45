//! Notification dispatcher - routes a delivery to its channel and
//! records history for what was sent
//!
//! The dispatcher is the request-level use case: resolve recipients under
//! the token policy, hand the delivery to the right channel, and on
//! success persist the notification (or message) plus its recipient
//! relations. Delivery failure means no persistence at all.

use std::sync::Arc;

use super::{DeliveryResult, DeliveryTarget, PushProvider, SmsProvider};
use crate::config::TokenPolicy;
use crate::contact::is_valid_contact;
use crate::db::Database;
use crate::errors::ApiError;
use crate::models::Message;

/// Result of a token dispatch. `notification_id` is only present when
/// delivery succeeded and the history row was written - never a stale
/// value from an earlier call.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub success: bool,
    pub notification_id: Option<i64>,
}

/// Prefix the fixed salutation to an outbound SMS body. Clients without
/// a stored name get an empty slot, matching the wire format history.
pub fn format_sms_body(name: Option<&str>, message: &str) -> String {
    format!("Dear Mr/Mrs {}, {}", name.unwrap_or(""), message)
}

pub struct NotificationDispatcher {
    db: Arc<Database>,
    push: Arc<dyn PushProvider>,
    sms: Arc<dyn SmsProvider>,
    token_policy: TokenPolicy,
}

impl NotificationDispatcher {
    pub fn new(
        db: Arc<Database>,
        push: Arc<dyn PushProvider>,
        sms: Arc<dyn SmsProvider>,
        token_policy: TokenPolicy,
    ) -> Self {
        Self {
            db,
            push,
            sms,
            token_policy,
        }
    }

    /// Route one delivery to its channel and normalize the result shape.
    ///
    /// An empty token list fails before any provider call. Provider
    /// transport errors are logged and reported as failed deliveries,
    /// never bubbled up as server faults.
    pub async fn deliver(
        &self,
        target: &DeliveryTarget,
        title: &str,
        body: &str,
    ) -> Result<DeliveryResult, ApiError> {
        match target {
            DeliveryTarget::Token(token) => {
                match self.push.notify_single(token, title, body).await {
                    Ok(ok) => Ok(DeliveryResult::Single(ok)),
                    Err(e) => {
                        log::warn!("single push delivery failed: {}", e);
                        Ok(DeliveryResult::Single(false))
                    }
                }
            }
            DeliveryTarget::Tokens(tokens) => {
                if tokens.is_empty() {
                    return Err(ApiError::EmptyRecipientList);
                }
                match self.push.notify_multiple(tokens, title, body).await {
                    Ok(flags) => Ok(DeliveryResult::PerRecipient(flags)),
                    Err(e) => {
                        log::warn!("multi push delivery failed: {}", e);
                        // keep the per-recipient shape; an empty flag list
                        // already reduces to failure
                        Ok(DeliveryResult::PerRecipient(Vec::new()))
                    }
                }
            }
            DeliveryTarget::Topic(topic) => {
                match self.push.notify_topic(topic, title, body).await {
                    Ok(ok) => Ok(DeliveryResult::Single(ok)),
                    Err(e) => {
                        log::warn!("topic push delivery failed: {}", e);
                        Ok(DeliveryResult::Single(false))
                    }
                }
            }
            DeliveryTarget::Contact { contact, name } => {
                if !is_valid_contact(contact) {
                    return Err(ApiError::InvalidContact(contact.clone()));
                }
                let sms_body = format_sms_body(name.as_deref(), body);
                self.sms.send(contact, title, &sms_body).await;
                // fire-and-forget channel: invoked means delivered
                Ok(DeliveryResult::Single(true))
            }
        }
    }

    /// Send a notification to a list of device tokens and record it.
    pub async fn send_to_tokens(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> Result<DispatchOutcome, ApiError> {
        let recipients = self
            .db
            .resolve_tokens(tokens, self.token_policy)
            .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

        let result = self
            .deliver(&DeliveryTarget::Tokens(recipients.clone()), title, body)
            .await?;
        if !result.succeeded() {
            return Ok(DispatchOutcome {
                success: false,
                notification_id: None,
            });
        }

        let notification_id = self
            .db
            .record_notification(title, body, &recipients)
            .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

        Ok(DispatchOutcome {
            success: true,
            notification_id: Some(notification_id),
        })
    }

    /// Send a notification to one device token and record it.
    pub async fn send_to_token(
        &self,
        token: &str,
        title: &str,
        body: &str,
    ) -> Result<DispatchOutcome, ApiError> {
        let candidate = [token.to_string()];
        let recipients = self
            .db
            .resolve_tokens(&candidate, self.token_policy)
            .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;
        // under the filter policy an unregistered token leaves nothing to send to
        let Some(recipient) = recipients.first() else {
            return Err(ApiError::EmptyRecipientList);
        };

        let result = self
            .deliver(&DeliveryTarget::Token(recipient.clone()), title, body)
            .await?;
        if !result.succeeded() {
            return Ok(DispatchOutcome {
                success: false,
                notification_id: None,
            });
        }

        let notification_id = self
            .db
            .record_notification(title, body, &recipients)
            .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

        Ok(DispatchOutcome {
            success: true,
            notification_id: Some(notification_id),
        })
    }

    /// Broadcast a notification to a topic.
    ///
    /// Topic broadcasts are not recorded; delivery history exists only
    /// for token and SMS sends. Known gap inherited from the observed
    /// design, kept deliberately.
    pub async fn broadcast_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
    ) -> Result<bool, ApiError> {
        let result = self
            .deliver(&DeliveryTarget::Topic(topic.to_string()), title, body)
            .await?;
        Ok(result.succeeded())
    }

    /// Send an SMS to a contact and record the message against its client.
    ///
    /// The contact is validated before anything is sent or stored. The
    /// stored body is the salutation-prefixed text that actually went out.
    pub async fn send_sms(
        &self,
        contact: &str,
        name: Option<&str>,
        subject: &str,
        message: &str,
    ) -> Result<Message, ApiError> {
        let target = DeliveryTarget::Contact {
            contact: contact.to_string(),
            name: name.map(|s| s.to_string()),
        };
        self.deliver(&target, subject, message).await?;

        let sms_body = format_sms_body(name, message);
        self.db
            .record_sms_message(contact, subject, &sms_body)
            .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))
    }
}
