use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered SMS recipient, keyed by contact number.
///
/// Created implicitly on the first SMS send to an unseen contact,
/// never deleted by this service.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub contact: String,
    pub name: Option<String>,
}

/// One SMS message sent to a client. Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: i64,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub client_id: i64,
}

/// One push notification sent to a set of tokens. Immutable once stored.
/// Recipients are recorded in the notification_tokens relation.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// One registered push-delivery destination. Token values are unique.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub id: i64,
    pub value: String,
}
