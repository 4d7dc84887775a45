use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod channels;
mod config;
mod contact;
mod controllers;
mod db;
mod errors;
mod models;
#[cfg(test)]
mod test_support;

use channels::{HttpPushClient, HttpSmsClient, NotificationDispatcher};
use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub dispatcher: Arc<NotificationDispatcher>,
}

/// Unmatched routes still answer with the uniform JSON error shape
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": 404,
        "message": "Not Found"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("Initializing database at {}", config.database_url);
    let db = Arc::new(Database::new(&config.database_url).expect("Failed to initialize database"));

    let timeout = Duration::from_secs(config.provider_timeout_secs);
    let push = Arc::new(
        HttpPushClient::new(&config.push_endpoint, &config.push_server_key, timeout)
            .expect("Failed to build push client"),
    );
    let sms = Arc::new(
        HttpSmsClient::new(&config.sms_endpoint, &config.sms_api_key, timeout)
            .expect("Failed to build sms client"),
    );

    log::info!(
        "Initializing notification dispatcher (token policy: {:?})",
        config.token_policy
    );
    let dispatcher = Arc::new(NotificationDispatcher::new(
        db.clone(),
        push,
        sms,
        config.token_policy,
    ));

    log::info!("Starting relay server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                dispatcher: Arc::clone(&dispatcher),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::sms::config)
            .configure(controllers::notifications::config)
            .configure(controllers::clients::config)
            .configure(controllers::tokens::config)
            .default_service(web::route().to(not_found))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
