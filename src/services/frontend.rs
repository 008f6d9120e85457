use actix_web::{HttpResponse, web};
use rust_embed::RustEmbed;
use tracing::debug;

/// Built frontend bundle, embedded at compile time.
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

pub struct FrontendService;

impl FrontendService {
    /// Serve the SPA shell. Also used as the pass-through target for
    /// every path the redirect lookup declines to handle.
    pub fn spa_fallback() -> HttpResponse {
        match StaticAssets::get("index.html") {
            Some(file) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(file.data.into_owned()),
            None => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body("Not Found"),
        }
    }

    pub async fn handle_index() -> HttpResponse {
        debug!("Serving frontend index page");
        Self::spa_fallback()
    }

    pub async fn handle_static(path: web::Path<String>) -> HttpResponse {
        let rel = path.into_inner();
        debug!("Serving static file: {}", rel);

        let content_type = match rel.rsplit('.').next() {
            Some("css") => "text/css",
            Some("js") => "application/javascript",
            Some("json") => "application/json",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("woff") => "font/woff",
            Some("woff2") => "font/woff2",
            _ => "application/octet-stream",
        };

        match StaticAssets::get(&format!("assets/{rel}")) {
            Some(file) => HttpResponse::Ok()
                .content_type(content_type)
                .body(file.data.into_owned()),
            None => HttpResponse::NotFound().body("File not found"),
        }
    }
}

pub fn frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(FrontendService::handle_index))
        .route("/", web::head().to(FrontendService::handle_index))
        .route(
            "/assets/{path:.*}",
            web::get().to(FrontendService::handle_static),
        )
        .route(
            "/assets/{path:.*}",
            web::head().to(FrontendService::handle_static),
        );
}
