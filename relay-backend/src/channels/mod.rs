//! Delivery channels - push (single, multi, topic) and SMS
//!
//! Each channel reports its own result shape; `DeliveryResult` is the
//! tagged union the dispatcher reduces to one success flag.

pub mod dispatcher;
pub mod push;
pub mod sms;

pub use dispatcher::NotificationDispatcher;
pub use push::{HttpPushClient, PushProvider};
pub use sms::{HttpSmsClient, SmsProvider};

/// Where one dispatch should be delivered.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    /// Single-device push.
    Token(String),
    /// Multi-device push fan-out.
    Tokens(Vec<String>),
    /// Broadcast to every device subscribed to a named topic.
    Topic(String),
    /// SMS to a phone contact, with the client name for the salutation.
    Contact {
        contact: String,
        name: Option<String>,
    },
}

/// Outcome reported by a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Single(bool),
    PerRecipient(Vec<bool>),
}

impl DeliveryResult {
    /// Reduce to one overall flag.
    ///
    /// Multi-recipient sends take the FIRST per-recipient flag, not the
    /// AND of all of them: a partial failure after the first recipient
    /// still reports success. Long-standing provider-contract behavior,
    /// pinned by regression tests. An empty result list is a failure.
    pub fn succeeded(&self) -> bool {
        match self {
            DeliveryResult::Single(ok) => *ok,
            DeliveryResult::PerRecipient(flags) => flags.first().copied().unwrap_or(false),
        }
    }
}
