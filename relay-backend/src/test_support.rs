//! Shared stubs and fixtures for unit tests

use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

use crate::AppState;
use crate::channels::NotificationDispatcher;
use crate::channels::push::{ProviderError, PushProvider};
use crate::channels::sms::SmsProvider;
use crate::config::TokenPolicy;
use crate::db::Database;

/// Push provider stub with configurable results and a call counter.
pub struct StubPush {
    pub single_result: bool,
    pub multi_results: Vec<bool>,
    pub topic_result: bool,
    pub transport_error: bool,
    pub calls: AtomicUsize,
    pub last_tokens: Mutex<Vec<String>>,
}

impl StubPush {
    pub fn new() -> Self {
        Self {
            single_result: true,
            multi_results: vec![true],
            topic_result: true,
            transport_error: false,
            calls: AtomicUsize::new(0),
            last_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn with_multi_results(mut self, results: Vec<bool>) -> Self {
        self.multi_results = results;
        self
    }

    pub fn with_topic_result(mut self, ok: bool) -> Self {
        self.topic_result = ok;
        self
    }

    pub fn with_transport_failure(mut self) -> Self {
        self.transport_error = true;
        self
    }

    fn transport_failure(&self) -> ProviderError {
        ProviderError::Payload("stubbed transport failure".to_string())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushProvider for StubPush {
    async fn notify_single(
        &self,
        token: &str,
        _title: &str,
        _body: &str,
    ) -> Result<bool, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.transport_error {
            return Err(self.transport_failure());
        }
        *self.last_tokens.lock().unwrap() = vec![token.to_string()];
        Ok(self.single_result)
    }

    async fn notify_multiple(
        &self,
        tokens: &[String],
        _title: &str,
        _body: &str,
    ) -> Result<Vec<bool>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.transport_error {
            return Err(self.transport_failure());
        }
        *self.last_tokens.lock().unwrap() = tokens.to_vec();
        Ok(self.multi_results.clone())
    }

    async fn notify_topic(
        &self,
        _topic: &str,
        _title: &str,
        _body: &str,
    ) -> Result<bool, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.transport_error {
            return Err(self.transport_failure());
        }
        Ok(self.topic_result)
    }
}

/// SMS provider stub recording (contact, subject, body) per send.
pub struct StubSms {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl StubSms {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SmsProvider for StubSms {
    async fn send(&self, contact: &str, subject: &str, body: &str) {
        self.sent.lock().unwrap().push((
            contact.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
    }
}

/// Fresh on-disk database in a temp dir. Keep the TempDir alive for the
/// duration of the test.
pub fn test_db() -> (Arc<Database>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.db");
    let db = Database::new(path.to_str().unwrap()).unwrap();
    (Arc::new(db), dir)
}

/// App state wired with stub providers, for handler tests.
pub fn stub_state(
    push: Arc<StubPush>,
    sms: Arc<StubSms>,
    policy: TokenPolicy,
) -> (web::Data<AppState>, TempDir) {
    let (db, dir) = test_db();
    let dispatcher = Arc::new(NotificationDispatcher::new(db.clone(), push, sms, policy));
    let state = web::Data::new(AppState { db, dispatcher });
    (state, dir)
}
