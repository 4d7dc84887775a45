//! Request-level error taxonomy
//!
//! Every error that can surface from a handler renders the same JSON body:
//! `{"success": false, "error": <status>, "message": <human string>}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    #[error("Request body is missing")]
    MissingBody,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Recipient token list is empty")]
    EmptyRecipientList,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Error occurred while inserting in database: {0}")]
    DatabaseInsertion(String),
}

impl ApiError {
    pub fn missing_field(name: &str) -> Self {
        ApiError::MalformedBody(format!("missing required field '{}'", name))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidContact(_)
            | ApiError::MissingBody
            | ApiError::MalformedBody(_)
            | ApiError::EmptyRecipientList => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseInsertion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidContact("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::EmptyRecipientList.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Client").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DatabaseInsertion("disk full".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let resp = ApiError::missing_field("tokens").error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::InvalidContact("+1".to_string()).to_string(),
            "Invalid contact: +1"
        );
        assert_eq!(
            ApiError::missing_field("subject").to_string(),
            "Malformed request body: missing required field 'subject'"
        );
        assert_eq!(ApiError::NotFound("Client").to_string(), "Client not found");
    }
}
