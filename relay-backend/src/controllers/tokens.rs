use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::AppState;
use crate::errors::ApiError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/tokens")
            .route(web::get().to(list_tokens))
            .default_service(web::route().to(super::method_not_allowed)),
    );
}

/// List every registered delivery token.
async fn list_tokens(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let tokens = data
        .db
        .list_tokens()
        .map_err(|e| ApiError::DatabaseInsertion(e.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({ "tokens": tokens })))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::config::TokenPolicy;
    use crate::test_support::{StubPush, StubSms, stub_state};

    #[actix_web::test]
    async fn test_list_registered_tokens() {
        let (state, _dir) = stub_state(
            Arc::new(StubPush::new()),
            Arc::new(StubSms::new()),
            TokenPolicy::Upsert,
        );
        state
            .db
            .resolve_tokens(&["A".to_string(), "B".to_string()], TokenPolicy::Upsert)
            .unwrap();
        let app =
            test::init_service(App::new().app_data(state).configure(super::config)).await;

        let req = test::TestRequest::get().uri("/tokens").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let tokens = body["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0]["value"], json!("A"));
    }
}
