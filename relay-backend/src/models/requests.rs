//! Request bodies for the dispatch endpoints
//!
//! Every field is optional at the serde level so a missing field surfaces
//! as a malformed-body error with a useful message instead of a framework
//! deserialization failure.

use serde::Deserialize;

/// Body for POST /smss. Either `contact` or `id` selects the client.
#[derive(Debug, Deserialize)]
pub struct SendSmsRequest {
    pub contact: Option<String>,
    pub id: Option<i64>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Body for POST /notifications/tokens.
#[derive(Debug, Deserialize)]
pub struct SendToTokensRequest {
    pub tokens: Option<Vec<String>>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Body for POST /notifications/token.
#[derive(Debug, Deserialize)]
pub struct SendToTokenRequest {
    pub token: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Body for POST /notifications/topic.
#[derive(Debug, Deserialize)]
pub struct TopicBroadcastRequest {
    pub topic: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}
