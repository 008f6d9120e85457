//! Storage liveness probe

use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::json;
use tracing::error;

use crate::services::LinkService;

pub async fn health(links: web::Data<Arc<LinkService>>) -> ActixResult<impl Responder> {
    let backend = links.store().backend_name();

    let probe = tokio::time::timeout(Duration::from_secs(5), links.store().keys(1)).await;
    match probe {
        Ok(Ok(_)) => Ok(HttpResponse::Ok().json(json!({
            "status": "ok",
            "storage": backend,
        }))),
        Ok(Err(e)) => {
            error!("Storage health probe failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "storage": backend,
                "error": e.error_type(),
            })))
        }
        Err(_) => {
            error!("Storage health probe timed out");
            Ok(HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "storage": backend,
                "error": "timeout",
            })))
        }
    }
}
