use actix_web::{HttpResponse, web};
use serde_json::json;

use super::parse_body;
use crate::AppState;
use crate::channels::dispatcher::DispatchOutcome;
use crate::errors::ApiError;
use crate::models::{SendToTokenRequest, SendToTokensRequest, TopicBroadcastRequest};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("/tokens", web::post().to(send_to_tokens))
            .route("/token", web::post().to(send_to_token))
            .route("/topic", web::post().to(broadcast_topic))
            .route("/{id}", web::get().to(get_notification))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

fn outcome_response(outcome: DispatchOutcome) -> HttpResponse {
    let mut body = json!({ "success": outcome.success });
    // absent on failure, never null or stale
    if let Some(id) = outcome.notification_id {
        body["notification_id"] = json!(id);
    }
    HttpResponse::Ok().json(body)
}

/// Fan a notification out to a list of device tokens.
async fn send_to_tokens(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let req: SendToTokensRequest = parse_body(&body)?;
    let tokens = req.tokens.ok_or_else(|| ApiError::missing_field("tokens"))?;
    let title = req.title.ok_or_else(|| ApiError::missing_field("title"))?;
    let text = req.body.ok_or_else(|| ApiError::missing_field("body"))?;

    let outcome = data.dispatcher.send_to_tokens(&tokens, &title, &text).await?;
    Ok(outcome_response(outcome))
}

/// Send a notification to a single device token.
async fn send_to_token(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let req: SendToTokenRequest = parse_body(&body)?;
    let token = req.token.ok_or_else(|| ApiError::missing_field("token"))?;
    let title = req.title.ok_or_else(|| ApiError::missing_field("title"))?;
    let text = req.body.ok_or_else(|| ApiError::missing_field("body"))?;

    let outcome = data.dispatcher.send_to_token(&token, &title, &text).await?;
    Ok(outcome_response(outcome))
}

/// Broadcast a notification to a topic.
///
/// The only path where a delivery failure surfaces as a server error:
/// 200 `{success:true}` or 500 `{success:false}`.
async fn broadcast_topic(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let req: TopicBroadcastRequest = parse_body(&body)?;
    let topic = req.topic.ok_or_else(|| ApiError::missing_field("topic"))?;
    let title = req.title.ok_or_else(|| ApiError::missing_field("title"))?;
    let text = req.body.ok_or_else(|| ApiError::missing_field("body"))?;

    let ok = data.dispatcher.broadcast_topic(&topic, &title, &text).await?;
    if ok {
        Ok(HttpResponse::Ok().json(json!({ "success": true })))
    } else {
        Ok(HttpResponse::InternalServerError().json(json!({ "success": false })))
    }
}

/// Reconstruct delivery history: a notification and the tokens it went to.
async fn get_notification(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    // parsed by hand so a non-numeric id renders the JSON error shape
    // instead of a framework extraction failure
    let id: i64 = path
        .into_inner()
        .parse()
        .map_err(|_| ApiError::NotFound("Notification"))?;

    let notification = data
        .db
        .get_notification(id)
        .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?
        .ok_or(ApiError::NotFound("Notification"))?;
    let recipients = data
        .db
        .get_notification_tokens(id)
        .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "id": notification.id,
        "title": notification.title,
        "body": notification.body,
        "sent_at": notification.sent_at.to_rfc3339(),
        "tokens": recipients.iter().map(|t| t.value.as_str()).collect::<Vec<_>>(),
    })))
}
