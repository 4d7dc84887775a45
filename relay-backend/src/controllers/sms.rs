use actix_web::{HttpResponse, web};

use super::parse_body;
use crate::AppState;
use crate::contact::is_valid_contact;
use crate::errors::ApiError;
use crate::models::{Client, SendSmsRequest};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/smss")
            .route(web::post().to(send_sms))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

/// Send an SMS to a client and record the message.
///
/// The client is selected by `contact` (created on first use) or by `id`
/// (404 when unknown, matching the legacy lookup variant).
async fn send_sms(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let req: SendSmsRequest = parse_body(&body)?;
    let subject = req.subject.ok_or_else(|| ApiError::missing_field("subject"))?;
    let message = req.message.ok_or_else(|| ApiError::missing_field("message"))?;

    let (contact, name) = match (req.contact, req.id) {
        (Some(contact), _) => {
            if !is_valid_contact(&contact) {
                return Err(ApiError::InvalidContact(contact));
            }
            // pick up the stored name for the salutation when the
            // contact is already known; creation happens on persist
            let name = data
                .db
                .get_client_by_contact(&contact)
                .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?
                .and_then(|c: Client| c.name);
            (contact, name)
        }
        (None, Some(id)) => {
            let client = data
                .db
                .get_client(id)
                .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?
                .ok_or(ApiError::NotFound("Client"))?;
            (client.contact, client.name)
        }
        (None, None) => return Err(ApiError::missing_field("contact")),
    };

    let stored = data
        .dispatcher
        .send_sms(&contact, name.as_deref(), &subject, &message)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message_id": stored.id,
    })))
}
