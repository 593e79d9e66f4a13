//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use faqbot_core::FaqbotConfig;
use faqbot_core::FaqEntry;
use faqbot_core::faq::attach_tracking_image;
use faqbot_matcher::Matcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server. Read-only after startup.
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub templates_dir: PathBuf,
}

impl AppState {
    pub fn new(matcher: Matcher, templates_dir: PathBuf) -> Self {
        Self {
            matcher: Arc::new(matcher),
            templates_dir,
        }
    }
}

fn cors_layer() -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    // Example: FAQBOT_CORS_ORIGINS=https://shop.example.com,https://help.example.com
    if let Ok(origins_str) = std::env::var("FAQBOT_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();
        cors.allow_origin(origins)
    } else {
        cors.allow_origin(Any)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    build_router_from_arc(Arc::new(state), static_dir)
}

pub fn build_router_from_arc(shared: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(super::routes::index_page))
        .route("/health", get(super::routes::health_check))
        .route("/faqs", get(super::routes::list_faqs))
        .route("/api/message", post(super::routes::api_message))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Copy the configured seed image into `<static_dir>/uploads` and return its URL.
pub fn seed_upload(source: &Path, static_dir: &Path) -> Option<String> {
    if !source.exists() {
        return None;
    }
    let name = source.file_name()?.to_string_lossy().replace(' ', "_");
    let uploads = static_dir.join("uploads");
    let result = std::fs::create_dir_all(&uploads)
        .and_then(|_| std::fs::copy(source, uploads.join(&name)));
    match result {
        Ok(_) => {
            tracing::info!("Copied uploaded image to: {}", uploads.join(&name).display());
            Some(format!("/static/uploads/{name}"))
        }
        Err(e) => {
            tracing::warn!("Could not copy uploaded image: {e}");
            None
        }
    }
}

/// The corpus to serve, with the seed image attached when one is configured.
pub fn prepare_corpus(config: &FaqbotConfig) -> Vec<FaqEntry> {
    let mut corpus = config.corpus();
    if let Some(seed) = &config.gateway.seed_image {
        let static_dir = Path::new(&config.gateway.static_dir);
        if let Some(url) = seed_upload(Path::new(seed), static_dir) {
            attach_tracking_image(&mut corpus, &url);
        }
    }
    corpus
}

/// Start the HTTP server.
pub async fn start(config: &FaqbotConfig) -> anyhow::Result<()> {
    let gateway = &config.gateway;
    let static_dir = PathBuf::from(&gateway.static_dir);
    if let Err(e) = std::fs::create_dir_all(static_dir.join("uploads")) {
        tracing::warn!("Could not create static dir {}: {e}", static_dir.display());
    }

    let corpus = prepare_corpus(config);
    let matcher = Matcher::new(corpus, config.matcher.clone());
    tracing::info!(
        "FAQ matcher ready ({} entries, threshold {})",
        matcher.entries().len(),
        config.matcher.threshold
    );

    let state = AppState::new(matcher, PathBuf::from(&gateway.templates_dir));
    let app = build_router(state, &static_dir);

    let addr = format!("{}:{}", gateway.host, gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Starting chatbot on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use faqbot_core::config::MatcherConfig;
    use faqbot_core::faq::default_faqs;
    use tower::ServiceExt;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("faqbot-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_router(templates: &Path, static_dir: &Path) -> Router {
        let state = AppState::new(
            Matcher::new(default_faqs(), MatcherConfig::default()),
            templates.to_path_buf(),
        );
        build_router(state, static_dir)
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = test_router(Path::new("/nonexistent"), Path::new("/nonexistent"));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_faqs_route_ids_contiguous() {
        let app = test_router(Path::new("/nonexistent"), Path::new("/nonexistent"));
        let resp = app
            .oneshot(Request::builder().uri("/faqs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(resp).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), default_faqs().len());
        assert!(items.iter().enumerate().all(|(i, it)| it["id"] == i));
    }

    #[tokio::test]
    async fn test_message_route() {
        let app = test_router(Path::new("/nonexistent"), Path::new("/nonexistent"));
        let req = Request::builder()
            .method("POST")
            .uri("/api/message")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message": "What is your return policy?"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["intent_id"], 2);
        assert!(json["reply"].as_str().unwrap().contains("30 days"));
        assert!(json.get("image").is_none());
    }

    #[tokio::test]
    async fn test_message_route_without_content_type() {
        let app = test_router(Path::new("/nonexistent"), Path::new("/nonexistent"));
        let req = Request::builder()
            .method("POST")
            .uri("/api/message")
            .body(Body::from("{broken"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["method"], "empty");
        assert_eq!(json["score"], 0.0);
    }

    #[tokio::test]
    async fn test_index_and_static() {
        let templates = temp_dir("templates");
        let static_dir = temp_dir("static");
        std::fs::write(templates.join("index.html"), "<h1>Help</h1>").unwrap();
        std::fs::write(static_dir.join("app.js"), "console.log(1);").unwrap();

        let app = test_router(&templates, &static_dir);
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Help</h1>");

        let resp = app
            .oneshot(Request::builder().uri("/static/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let _ = std::fs::remove_dir_all(templates);
        let _ = std::fs::remove_dir_all(static_dir);
    }

    #[test]
    fn test_prepare_corpus_seeds_image() {
        let src_dir = temp_dir("seed-src");
        let source = src_dir.join("order status.png");
        std::fs::write(&source, b"png").unwrap();
        let static_dir = temp_dir("seed-static");

        let mut config = FaqbotConfig::default();
        config.gateway.static_dir = static_dir.to_string_lossy().to_string();
        config.gateway.seed_image = Some(source.to_string_lossy().to_string());

        let corpus = prepare_corpus(&config);
        assert_eq!(corpus[1].image.as_deref(), Some("/static/uploads/order_status.png"));
        assert!(static_dir.join("uploads").join("order_status.png").exists());

        let _ = std::fs::remove_dir_all(src_dir);
        let _ = std::fs::remove_dir_all(static_dir);
    }

    #[test]
    fn test_missing_seed_image_is_ignored() {
        let mut config = FaqbotConfig::default();
        config.gateway.seed_image = Some("/nonexistent/seed.png".into());
        let corpus = prepare_corpus(&config);
        assert!(corpus.iter().all(|e| e.image.is_none()));
    }
}
