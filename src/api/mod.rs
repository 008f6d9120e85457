//! HTTP API
//!
//! JSON endpoints under `/api`. Handlers receive the configuration and
//! services as shared application data; nothing here reads globals.

use actix_web::web;

pub mod auth;
pub mod constants;
pub mod domains;
pub mod health;
pub mod helpers;
pub mod links;
pub mod session;

pub use session::{SessionClaims, SessionService};

pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/auth/status", web::get().to(auth::status))
            .route("/auth/verify", web::post().to(auth::verify))
            .route("/auth/session", web::get().to(auth::session))
            .route("/auth/logout", web::post().to(auth::logout))
            .route("/domains", web::get().to(domains::domains))
            .route("/links", web::post().to(links::create_link))
            .route("/links", web::put().to(links::update_link))
            .route("/links", web::delete().to(links::delete_link))
            .route("/list-links", web::get().to(links::list_links))
            .route("/health", web::get().to(health::health)),
    );
}
