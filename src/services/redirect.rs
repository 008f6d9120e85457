//! Short-path resolution
//!
//! The catch-all route for everything outside `/api` and `/assets`.
//! A hit turns into a cloaking page, a crawler preview, or a 302; every
//! miss and every failure falls through to the SPA shell, never to an
//! error page.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, warn};

use super::bot;
use super::frontend::FrontendService;
use super::links::LinkService;
use super::pages;
use crate::storage::LinkRecord;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let captured = path.into_inner();

        // The API, static assets, and the root are never short paths.
        if captured.is_empty()
            || captured.starts_with("api/")
            || captured.starts_with("assets/")
        {
            return FrontendService::spa_fallback();
        }

        match links.resolve(&captured).await {
            Ok(Some(record)) => Self::dispatch(&req, &captured, record),
            Ok(None) => {
                debug!("No link stored at {}", captured);
                FrontendService::spa_fallback()
            }
            Err(e) => {
                // Fail open: a broken store degrades to the frontend 404,
                // not an error page.
                warn!("Link lookup failed for {}: {}", captured, e);
                FrontendService::spa_fallback()
            }
        }
    }

    fn dispatch(req: &HttpRequest, path: &str, record: LinkRecord) -> HttpResponse {
        if record.cloaking {
            debug!("Serving cloaking page for {}", path);
            return Self::html_page(pages::cloak_page(&record, path));
        }

        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if bot::is_bot(user_agent) {
            if record.embeds == Some(false) {
                debug!("Crawler hit {} with previews disabled", path);
                return Self::html_page(pages::empty_shell());
            }
            if let Some(metadata) = record.metadata.clone() {
                debug!("Serving crawler preview for {}", path);
                let host = req.connection_info().host().to_string();
                let base_host = record.domain.as_deref().unwrap_or(&host);
                let short_url = format!("https://{base_host}/{path}");
                return Self::html_page(pages::preview_page(&record, &metadata, &short_url));
            }
            // Crawler with nothing to preview follows the redirect.
        }

        HttpResponse::Found()
            .insert_header((header::LOCATION, record.url))
            .finish()
    }

    fn html_page(body: String) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body)
    }
}

pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/{path:.*}",
        web::get().to(RedirectService::handle_redirect),
    )
    .route(
        "/{path:.*}",
        web::head().to(RedirectService::handle_redirect),
    );
}
