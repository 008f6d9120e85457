//! API helper functions

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::error;

use super::constants::{PASSWORD_HEADER, SESSION_COOKIE_NAME};
use super::session::SessionService;
use crate::config::AuthConfig;
use crate::errors::LinkgateError;

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "error": message }))
}

/// Map a service error to its HTTP response. Internal errors are logged
/// and masked with a generic message.
pub fn error_from(err: &LinkgateError) -> HttpResponse {
    let status = err.http_status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("{} {}: {}", err.code(), err.error_type(), err.message());
        error_response(status, "An unexpected error occurred.")
    } else {
        error_response(status, err.message())
    }
}

pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Whether the request carries valid management credentials: the password
/// header, or a valid session cookie when cookie sessions are enabled.
/// Always true when no password is configured.
pub fn check_credentials(
    req: &HttpRequest,
    auth: &AuthConfig,
    session: Option<&SessionService>,
) -> bool {
    let Some(password) = auth.password.as_deref().filter(|p| !p.is_empty()) else {
        return true;
    };

    if let Some(provided) = req
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|h| h.to_str().ok())
        && constant_time_eq(provided, password)
    {
        return true;
    }

    if let Some(service) = session
        && let Some(cookie) = req.cookie(SESSION_COOKIE_NAME)
        && service.validate(cookie.value()).is_ok()
    {
        return true;
    }

    false
}

/// Builds the `link_session` cookie in its issued and cleared forms.
pub struct CookieBuilder {
    secure: bool,
}

impl CookieBuilder {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            secure: auth.cookie_secure,
        }
    }

    pub fn session_cookie(&self, token: String, max_age_secs: u64) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME.to_string(), token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(actix_web::cookie::time::Duration::seconds(
            max_age_secs as i64,
        ));
        cookie
    }

    pub fn expired_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME.to_string(), String::new());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(actix_web::cookie::time::Duration::ZERO);
        cookie
    }
}
