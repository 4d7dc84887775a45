pub mod clients;
pub mod health;
pub mod notifications;
pub mod sms;
pub mod tokens;

use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// Fallback for a matched path with no matching method. Registered as the
/// default on every resource and scope so a 405 keeps the JSON error
/// contract instead of actix's empty-body default.
pub(crate) async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "success": false,
        "error": 405,
        "message": "Method Not Allowed"
    }))
}

/// Parse a raw request body, distinguishing an absent body from a
/// malformed one. Field presence is checked by the individual handlers
/// so each missing field gets named in the error message.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::MissingBody);
    }
    serde_json::from_slice(body)
        .map_err(|_| ApiError::MalformedBody("not a valid JSON object".to_string()))
}
