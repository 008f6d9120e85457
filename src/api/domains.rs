//! Allowed-domain listing

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use serde_json::json;

use crate::config::AppConfig;

/// Configured domain allow-list, falling back to the request host when
/// none is configured.
pub async fn domains(
    req: HttpRequest,
    config: web::Data<AppConfig>,
) -> ActixResult<impl Responder> {
    let mut domains = config.links.domains.clone();
    if domains.is_empty() {
        domains.push(req.connection_info().host().to_string());
    }

    Ok(HttpResponse::Ok().json(json!({ "domains": domains })))
}
