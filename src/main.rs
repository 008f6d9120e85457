use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::Result;
use tracing::{info, warn};

use linkgate::api::{SessionService, api_routes};
use linkgate::config::AppConfig;
use linkgate::services::{LinkService, frontend_routes, redirect_routes};
use linkgate::storage::StorageFactory;
use linkgate::system::logging::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = init_logging(&config.logging);

    let store = StorageFactory::create(&config.storage).await?;
    info!("Using storage backend: {}", store.backend_name());

    if config.auth.password_protected() {
        if config.auth.session_secret.is_some() {
            info!("Management API is password protected (cookie sessions enabled)");
        } else {
            info!("Management API is password protected (legacy header mode)");
        }
    } else {
        warn!("No password configured; the management API is open");
    }

    let links = Arc::new(LinkService::new(
        store.clone(),
        config.links.random_path_length,
    ));
    let session = SessionService::from_config(&config.auth);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(links.clone()))
            .app_data(web::Data::new(session.clone()))
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .wrap(DefaultHeaders::new().add(("Connection", "keep-alive")))
            .configure(api_routes)
            .configure(frontend_routes)
            .configure(redirect_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .bind(&bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Received shutdown signal, stopping server");
        }
    }

    Ok(())
}
