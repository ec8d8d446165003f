//! End-to-end tests: dashboard controller against a local analysis backend

use axiom_core::cache::{FileStore, MemoryStore, SnapshotStore, EMAILS_KEY, SUMMARY_KEY};
use axiom_core::source::{EmailSource, HttpEmailSource};
use axiom_core::{DashboardController, DashboardError, FilterCategory, Phase};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to serve `router` on an ephemeral port
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend_payload() -> serde_json::Value {
    json!({
        "emails": [
            {
                "id": "m1",
                "from": "Alice <alice@example.com>",
                "subject": "Invoice 4411 is wrong",
                "date": "Mon, 3 Feb 2025 09:00:00 +0000",
                "body": "I am frustrated, this invoice has been wrong for weeks.",
                "score_custom": 0.9,
                "score_gemini": 0.8,
                "combined_score": 0.86,
                "is_frustrated": true
            },
            {
                "id": "m2",
                "from": "Bob <bob@example.com>",
                "subject": "Team lunch",
                "date": "Mon, 3 Feb 2025 10:00:00 +0000",
                "body": "Pizza on Friday?",
                "score_custom": 0.1,
                "score_gemini": 0.05,
                "is_frustrated": false
            }
        ],
        "frustration_summary": "Incorrect **invoices** caused frustration."
    })
}

/// Backend that counts requests and always answers with `payload`
async fn counting_backend(payload: serde_json::Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = (hits.clone(), payload);

    let router = Router::new()
        .route(
            "/fetch_predicted_emails",
            get(
                |State((hits, payload)): State<(Arc<AtomicUsize>, serde_json::Value)>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(payload)
                },
            ),
        )
        .with_state(state);

    (spawn_backend(router).await, hits)
}

fn http_source(base_url: &str) -> Arc<dyn EmailSource> {
    Arc::new(HttpEmailSource::new(base_url, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_http_source_decodes_backend_response() {
    let (url, _) = counting_backend(backend_payload()).await;

    let fetched = http_source(&url).fetch().await.unwrap();

    assert_eq!(fetched.emails.len(), 2);
    assert_eq!(fetched.emails[0].id.as_deref(), Some("m1"));
    assert!(fetched.emails[0].is_frustrated);
    assert_eq!(fetched.emails[0].combined_score, Some(0.86));
    // Filled from the raw scores: 0.6 * 0.1 + 0.4 * 0.05
    let combined = fetched.emails[1].combined_score.unwrap();
    assert!((combined - 0.08).abs() < 1e-9);
    assert_eq!(
        fetched.frustration_summary,
        "Incorrect **invoices** caused frustration."
    );
}

#[tokio::test]
async fn test_http_source_500_is_fetch_failure() {
    let router = Router::new().route(
        "/fetch_predicted_emails",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Gmail quota exceeded") }),
    );
    let url = spawn_backend(router).await;

    let result = http_source(&url).fetch().await;
    match result {
        Err(DashboardError::Fetch(message)) => assert!(message.contains("500")),
        other => panic!("expected fetch failure, got {:?}", other.map(|f| f.emails.len())),
    }
}

#[tokio::test]
async fn test_http_source_wrong_shape_is_malformed() {
    let router = Router::new().route(
        "/fetch_predicted_emails",
        get(|| async { Json(json!({ "emails": "not a list", "frustration_summary": "" })) }),
    );
    let url = spawn_backend(router).await;

    let result = http_source(&url).fetch().await;
    assert!(matches!(result, Err(DashboardError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_http_source_non_json_is_malformed() {
    let router = Router::new().route(
        "/fetch_predicted_emails",
        get(|| async { "<html>proxy error page</html>" }),
    );
    let url = spawn_backend(router).await;

    let result = http_source(&url).fetch().await;
    assert!(matches!(result, Err(DashboardError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_mount_without_cache_fetches_once_and_caches() {
    let (url, hits) = counting_backend(backend_payload()).await;
    let cache = MemoryStore::new();
    let mut dashboard = DashboardController::new(http_source(&url), Arc::new(cache.clone()));

    dashboard.mount().await;

    assert_eq!(dashboard.phase(), &Phase::Ready);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(cache.get(EMAILS_KEY).unwrap().is_some());
    assert_eq!(
        cache.get(SUMMARY_KEY).unwrap().as_deref(),
        Some("Incorrect **invoices** caused frustration.")
    );

    dashboard.set_filter(FilterCategory::Frustrated);
    dashboard.set_query("inv alice");
    let view = dashboard.view();
    assert_eq!(view.emails.len(), 1);
    assert_eq!(view.emails[0].position, 0);
    assert_eq!(view.stats.total, 2);
    assert_eq!(view.stats.frustrated_pct, 50.0);
    assert!(view.last_refreshed_at.is_some());
}

#[tokio::test]
async fn test_mount_with_failing_backend() {
    let router = Router::new().route(
        "/fetch_predicted_emails",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let url = spawn_backend(router).await;
    let cache = MemoryStore::new();
    let mut dashboard = DashboardController::new(http_source(&url), Arc::new(cache.clone()));

    dashboard.mount().await;

    assert!(matches!(dashboard.phase(), Phase::Failed(_)));
    assert!(cache.is_empty().unwrap());
    let view = dashboard.view();
    assert!(!view.loading);
    assert!(view.error.is_some());
}

#[tokio::test]
async fn test_file_cache_restores_next_session_without_fetch() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("axiom-cache.json");
    let (url, hits) = counting_backend(backend_payload()).await;

    {
        let cache = Arc::new(FileStore::open(&cache_path).unwrap());
        let mut dashboard = DashboardController::new(http_source(&url), cache);
        dashboard.mount().await;
        assert_eq!(dashboard.phase(), &Phase::Ready);
    }

    let cache = Arc::new(FileStore::open(&cache_path).unwrap());
    let mut dashboard = DashboardController::new(http_source(&url), cache);
    dashboard.mount().await;

    assert_eq!(dashboard.phase(), &Phase::Ready);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(dashboard.documents().len(), 2);
    assert_eq!(dashboard.documents()[1].subject, "Team lunch");
}

#[tokio::test]
async fn test_logout_then_mount_fetches_again() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("axiom-cache.json");
    let (url, hits) = counting_backend(backend_payload()).await;

    let cache = Arc::new(FileStore::open(&cache_path).unwrap());
    let mut dashboard = DashboardController::new(http_source(&url), cache.clone());
    dashboard.mount().await;
    dashboard.logout().unwrap();

    assert!(cache.get(EMAILS_KEY).unwrap().is_none());
    assert!(cache.get(SUMMARY_KEY).unwrap().is_none());

    dashboard.mount().await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
