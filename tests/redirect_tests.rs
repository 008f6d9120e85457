//! Redirect route tests
//!
//! The critical path: short path -> 302, cloaking page, or crawler
//! preview, with every failure falling open to the SPA shell.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use linkgate::api::{SessionService, api_routes};
use linkgate::config::AppConfig;
use linkgate::services::{LinkService, frontend_routes, redirect_routes};
use linkgate::storage::memory::MemoryStorage;
use linkgate::storage::{KvStore, LinkMetadata, LinkRecord};

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const TWITTER_UA: &str = "Twitterbot/1.0";

macro_rules! init_app {
    ($store:expr, $config:expr) => {{
        let links = Arc::new(LinkService::new($store.clone(), 6));
        let session = SessionService::from_config(&$config.auth);
        test::init_service(
            App::new()
                .app_data(web::Data::new($config.clone()))
                .app_data(web::Data::new(links))
                .app_data(web::Data::new(session))
                .configure(api_routes)
                .configure(frontend_routes)
                .configure(redirect_routes),
        )
        .await
    }};
}

fn memory_store() -> Arc<dyn KvStore> {
    Arc::new(MemoryStorage::new())
}

fn record(url: &str) -> LinkRecord {
    LinkRecord {
        url: url.to_string(),
        created_at: Some(chrono::Utc::now().timestamp_millis()),
        embeds: Some(true),
        metadata: None,
        cloaking: false,
        domain: None,
    }
}

async fn put_record(store: &Arc<dyn KvStore>, path: &str, record: &LinkRecord) {
    store.put(path, &record.to_json().unwrap()).await.unwrap();
}

// =============================================================================
// Plain redirects
// =============================================================================

#[actix_rt::test]
async fn test_created_link_redirects_to_normalized_url() {
    let store = memory_store();
    let config = AppConfig::default();
    let app = init_app!(store, config);

    // Create with a bare destination; the stored URL gains https://.
    let req = TestRequest::post()
        .uri("/api/links")
        .set_json(serde_json::json!({ "url": "example.com", "customPath": "promo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = TestRequest::get()
        .uri("/promo")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com"
    );
}

#[actix_rt::test]
async fn test_head_request_also_redirects() {
    let store = memory_store();
    put_record(&store, "promo", &record("https://example.com")).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/promo")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_rt::test]
async fn test_nested_paths_resolve() {
    let store = memory_store();
    put_record(&store, "2024/launch", &record("https://example.com/l")).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/2024/launch")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

// =============================================================================
// Cloaking
// =============================================================================

#[actix_rt::test]
async fn test_cloaking_serves_iframe_page() {
    let store = memory_store();
    let mut rec = record("https://example.com/hidden");
    rec.cloaking = true;
    rec.metadata = Some(LinkMetadata {
        title: Some("My Page".to_string()),
        description: Some("A page".to_string()),
        image: None,
    });
    put_record(&store, "cloaked", &rec).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/cloaked")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("<iframe src=\"https://example.com/hidden\""));
    assert!(html.contains("<title>My Page</title>"));
}

#[actix_rt::test]
async fn test_cloaking_wins_over_bot_detection() {
    let store = memory_store();
    let mut rec = record("https://example.com/hidden");
    rec.cloaking = true;
    put_record(&store, "cloaked", &rec).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/cloaked")
        .insert_header((header::USER_AGENT, TWITTER_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("<iframe"));
}

// =============================================================================
// Crawler previews
// =============================================================================

#[actix_rt::test]
async fn test_bot_with_metadata_gets_preview_not_redirect() {
    let store = memory_store();
    let mut rec = record("https://example.com/article");
    rec.metadata = Some(LinkMetadata {
        title: Some("Article".to_string()),
        description: Some("Worth reading".to_string()),
        image: Some("https://example.com/cover.png".to_string()),
    });
    put_record(&store, "article", &rec).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/article")
        .insert_header((header::USER_AGENT, TWITTER_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("og:title\" content=\"Article\""));
    assert!(html.contains("twitter:card\" content=\"summary_large_image\""));
}

#[actix_rt::test]
async fn test_bot_with_embeds_disabled_gets_empty_shell() {
    let store = memory_store();
    let mut rec = record("https://example.com/article");
    rec.embeds = Some(false);
    rec.metadata = Some(LinkMetadata {
        title: Some("Article".to_string()),
        description: None,
        image: None,
    });
    put_record(&store, "quiet", &rec).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/quiet")
        .insert_header((header::USER_AGENT, TWITTER_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("<body></body>"));
    assert!(!html.contains("og:title"));
}

#[actix_rt::test]
async fn test_bot_without_metadata_follows_redirect() {
    let store = memory_store();
    put_record(&store, "plain", &record("https://example.com")).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/plain")
        .insert_header((header::USER_AGENT, TWITTER_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_rt::test]
async fn test_human_with_metadata_still_redirects() {
    let store = memory_store();
    let mut rec = record("https://example.com/article");
    rec.metadata = Some(LinkMetadata {
        title: Some("Article".to_string()),
        description: None,
        image: None,
    });
    put_record(&store, "article", &rec).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/article")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

// =============================================================================
// Pass-through / fail-open
// =============================================================================

#[actix_rt::test]
async fn test_unknown_path_falls_through_to_frontend() {
    let store = memory_store();
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/no-such-link")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("linkgate"));
}

#[actix_rt::test]
async fn test_malformed_record_falls_through_to_frontend() {
    let store = memory_store();
    store.put("broken", "this is not json").await.unwrap();
    store.put("nourl", r#"{"createdAt":1}"#).await.unwrap();
    let config = AppConfig::default();
    let app = init_app!(store, config);

    for path in ["/broken", "/nourl"] {
        let req = TestRequest::get()
            .uri(path)
            .insert_header((header::USER_AGENT, CHROME_UA))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::LOCATION).is_none());
    }
}

#[actix_rt::test]
async fn test_root_serves_frontend() {
    let store = memory_store();
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("linkgate"));
}

#[actix_rt::test]
async fn test_unknown_api_path_is_not_treated_as_short_link() {
    let store = memory_store();
    // Even a stored record under api/ must not shadow the API namespace.
    put_record(&store, "api/evil", &record("https://example.com")).await;
    let config = AppConfig::default();
    let app = init_app!(store, config);

    let req = TestRequest::get()
        .uri("/api/evil")
        .insert_header((header::USER_AGENT, CHROME_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.status(), StatusCode::FOUND);
}
