use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::AppState;
use crate::errors::ApiError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/clients/{id}")
            .route(web::get().to(get_client))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

/// A client and its full message history.
async fn get_client(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    // parsed by hand so a non-numeric id renders the JSON error shape
    // instead of a framework extraction failure
    let id: i64 = path
        .into_inner()
        .parse()
        .map_err(|_| ApiError::NotFound("Client"))?;

    let client = data
        .db
        .get_client(id)
        .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?
        .ok_or(ApiError::NotFound("Client"))?;
    let messages = data
        .db
        .get_client_messages(id)
        .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "id": client.id,
        "contact": client.contact,
        "name": client.name,
        "messages": messages,
    })))
}
