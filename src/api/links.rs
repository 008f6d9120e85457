//! Link management endpoints
//!
//! Thin wrappers that check credentials, hand the body to
//! [`LinkService`], and translate results into the wire JSON shapes.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use serde::Deserialize;
use serde_json::json;
use tracing::trace;

use super::helpers::{check_credentials, error_from, error_response};
use super::session::SessionService;
use crate::config::AppConfig;
use crate::services::{CreateLinkInput, LinkService, UpdateLinkInput};

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteLinkRequest {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListLinksQuery {
    pub domain: Option<String>,
}

pub async fn create_link(
    req: HttpRequest,
    body: web::Json<CreateLinkInput>,
    links: web::Data<Arc<LinkService>>,
    config: web::Data<AppConfig>,
    session: web::Data<Option<SessionService>>,
) -> ActixResult<impl Responder> {
    if !check_credentials(&req, &config.auth, session.get_ref().as_ref()) {
        return Ok(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let host = req.connection_info().host().to_string();
    trace!("Create link request on host {}", host);

    match links
        .create(body.into_inner(), &host, &config.links.domains)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(created)),
        Err(e) => Ok(error_from(&e)),
    }
}

pub async fn update_link(
    req: HttpRequest,
    body: web::Json<UpdateLinkInput>,
    links: web::Data<Arc<LinkService>>,
    config: web::Data<AppConfig>,
    session: web::Data<Option<SessionService>>,
) -> ActixResult<impl Responder> {
    let authorized = check_credentials(&req, &config.auth, session.get_ref().as_ref());
    if !authorized {
        return Ok(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    // With a password configured, any authorized caller is an admin and
    // may edit past the window. Open deployments get window-gated edits.
    let is_admin = config.auth.password_protected();

    match links
        .update(body.into_inner(), is_admin, &config.links.domains)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(updated)),
        Err(e) => Ok(error_from(&e)),
    }
}

pub async fn delete_link(
    req: HttpRequest,
    body: web::Json<DeleteLinkRequest>,
    links: web::Data<Arc<LinkService>>,
    config: web::Data<AppConfig>,
    session: web::Data<Option<SessionService>>,
) -> ActixResult<impl Responder> {
    if !check_credentials(&req, &config.auth, session.get_ref().as_ref()) {
        return Ok(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let Some(path) = body.path.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "A valid path is required.",
        ));
    };

    match links.delete(path).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "message": "Deleted" }))),
        Err(e) => Ok(error_from(&e)),
    }
}

pub async fn list_links(
    req: HttpRequest,
    query: web::Query<ListLinksQuery>,
    links: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let host = req.connection_info().host().to_string();

    match links.list(query.domain.as_deref(), &host).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(json!({ "links": entries }))),
        Err(e) => Ok(error_from(&e)),
    }
}
