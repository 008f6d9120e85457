//! Authentication endpoints
//!
//! `status` tells the frontend whether to show a login gate, `verify`
//! checks the configured secrets and mints the session cookie, `session`
//! validates it, `logout` clears it. With a password but no session
//! secret the service runs in legacy mode: `verify` answers with a bare
//! flag and callers keep sending the password header.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::constants::SESSION_COOKIE_NAME;
use super::helpers::{CookieBuilder, constant_time_eq, error_response};
use super::session::SessionService;
use crate::config::AppConfig;

const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub password: Option<String>,
    pub username: Option<String>,
    pub remember: Option<bool>,
}

pub async fn status(config: web::Data<AppConfig>) -> ActixResult<impl Responder> {
    Ok(HttpResponse::Ok().json(json!({
        "passwordProtected": config.auth.password_protected()
    })))
}

pub async fn verify(
    body: web::Json<VerifyRequest>,
    config: web::Data<AppConfig>,
    session: web::Data<Option<SessionService>>,
) -> ActixResult<impl Responder> {
    let Some(password) = config
        .auth
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
    else {
        // No gate configured; everyone is verified.
        return Ok(HttpResponse::Ok()
            .append_header((header::CACHE_CONTROL, NO_STORE))
            .json(json!({ "verified": true })));
    };

    let provided = body.password.as_deref().unwrap_or("");
    let mut verified = constant_time_eq(provided, password);

    if verified && let Some(expected) = config.auth.admin_username.as_deref() {
        verified = body.username.as_deref() == Some(expected);
    }

    if !verified {
        warn!("Login attempt rejected");
        return Ok(HttpResponse::Unauthorized()
            .append_header((header::CACHE_CONTROL, NO_STORE))
            .json(json!({ "verified": false, "error": "Incorrect password." })));
    }

    match session.get_ref() {
        Some(service) => {
            let remember = body.remember == Some(true);
            let (token, max_age) = match service.issue(body.username.clone(), remember) {
                Ok(minted) => minted,
                Err(e) => {
                    error!("Failed to mint session token: {}", e);
                    return Ok(error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An unexpected error occurred.",
                    ));
                }
            };

            info!("Login successful, session issued for {}s", max_age);
            let cookie = CookieBuilder::new(&config.auth).session_cookie(token, max_age);
            Ok(HttpResponse::Ok()
                .cookie(cookie)
                .append_header((header::CACHE_CONTROL, NO_STORE))
                .json(json!({ "verified": true })))
        }
        None => {
            // Legacy mode: no cookie, the client keeps the password.
            info!("Login successful (legacy mode, no session cookie)");
            Ok(HttpResponse::Ok()
                .append_header((header::CACHE_CONTROL, NO_STORE))
                .json(json!({ "verified": true })))
        }
    }
}

pub async fn session(
    req: HttpRequest,
    config: web::Data<AppConfig>,
    session: web::Data<Option<SessionService>>,
) -> ActixResult<impl Responder> {
    fn authenticated(payload: Option<&super::session::SessionClaims>) -> HttpResponse {
        let mut body = json!({ "authenticated": payload.is_some() });
        if let Some(claims) = payload {
            body["payload"] = serde_json::to_value(claims).unwrap_or_default();
        }
        HttpResponse::Ok()
            .append_header((header::CACHE_CONTROL, "no-store"))
            .json(body)
    }

    if !config.auth.password_protected() {
        return Ok(HttpResponse::Ok()
            .append_header((header::CACHE_CONTROL, "no-store"))
            .json(json!({ "authenticated": true })));
    }

    let Some(service) = session.get_ref() else {
        return Ok(authenticated(None));
    };

    let claims = req
        .cookie(SESSION_COOKIE_NAME)
        .and_then(|cookie| service.validate(cookie.value()).ok());

    Ok(authenticated(claims.as_ref()))
}

pub async fn logout(config: web::Data<AppConfig>) -> ActixResult<impl Responder> {
    info!("Session logout");
    let cookie = CookieBuilder::new(&config.auth).expired_session_cookie();
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "loggedOut": true })))
}
