// comanda-client/tests/http_retry.rs
// Retry policy tests against in-process servers

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use comanda_client::{ClientConfig, ClientError, HttpClient};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url)
        .with_timeout(1)
        .with_retry_base_delay_ms(10)
        .build_client()
}

/// Router that answers `/items` with `failures` errors of `status` before
/// succeeding, counting every hit.
fn flaky_router(status: StatusCode, failures: usize) -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/items",
        get(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    (status, Json(json!({"status": "error", "message": "boom"})))
                        .into_response()
                } else {
                    Json(json!({"status": "success", "data": {"attempt": n + 1}}))
                        .into_response()
                }
            }
        }),
    );
    (app, hits)
}

#[tokio::test]
async fn three_server_errors_exhaust_all_attempts() {
    let (app, hits) = flaky_router(StatusCode::INTERNAL_SERVER_ERROR, 3);
    let client = test_client(&spawn(app).await);

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::Server(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn one_server_error_then_success_uses_second_attempt() {
    let (app, hits) = flaky_router(StatusCode::INTERNAL_SERVER_ERROR, 1);
    let client = test_client(&spawn(app).await);

    let payload = client.get_json("items", &[]).await.unwrap();
    assert_eq!(payload["attempt"], 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let (app, hits) = flaky_router(StatusCode::NOT_FOUND, 99);
    let client = test_client(&spawn(app).await);

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bad_request_is_not_retried() {
    let (app, hits) = flaky_router(StatusCode::BAD_REQUEST, 99);
    let client = test_client(&spawn(app).await);

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn request_timeout_status_is_retried() {
    let (app, hits) = flaky_router(StatusCode::REQUEST_TIMEOUT, 1);
    let client = test_client(&spawn(app).await);

    let payload = client.get_json("items", &[]).await.unwrap();
    assert_eq!(payload["attempt"], 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rate_limit_status_is_retried() {
    let (app, hits) = flaky_router(StatusCode::TOO_MANY_REQUESTS, 1);
    let client = test_client(&spawn(app).await);

    let payload = client.get_json("items", &[]).await.unwrap();
    assert_eq!(payload["attempt"], 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let (app, hits) = flaky_router(StatusCode::UNAUTHORIZED, 99);
    let client = test_client(&spawn(app).await);

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_handler_times_out_and_retries_as_network_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/items",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Json(json!({"status": "success", "data": null}))
            }
        }),
    );
    let client = ClientConfig::new(spawn(app).await)
        .with_timeout(1)
        .with_max_attempts(2)
        .with_retry_base_delay_ms(10)
        .build_client();

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::Network(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn envelope_failure_on_ok_status_is_an_error() {
    let app = Router::new().route(
        "/items",
        get(|| async { Json(json!({"status": "error", "message": "name taken"})) }),
    );
    let client = test_client(&spawn(app).await);

    let result = client.get_json("items", &[]).await;
    assert!(matches!(result, Err(ClientError::Validation(msg)) if msg == "name taken"));
}

#[tokio::test]
async fn bearer_token_is_injected_and_removable() {
    let app = Router::new().route(
        "/whoami",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({"status": "success", "data": {"auth": auth}}))
        }),
    );
    let client = test_client(&spawn(app).await);

    let payload = client.get_json("whoami", &[]).await.unwrap();
    assert_eq!(payload["auth"], serde_json::Value::Null);

    client.set_token("secret-token");
    let payload = client.get_json("whoami", &[]).await.unwrap();
    assert_eq!(payload["auth"], "Bearer secret-token");

    client.clear_token();
    let payload = client.get_json("whoami", &[]).await.unwrap();
    assert_eq!(payload["auth"], serde_json::Value::Null);
}

#[tokio::test]
async fn only_defined_query_params_are_serialized() {
    let app = Router::new().route(
        "/items",
        get(|axum::extract::RawQuery(raw): axum::extract::RawQuery| async move {
            Json(json!({"status": "success", "data": {"query": raw.unwrap_or_default()}}))
        }),
    );
    let client = test_client(&spawn(app).await);

    let payload = client
        .get_json(
            "items",
            &[
                ("search", Some("sate".to_string())),
                ("category", None),
                ("page", Some("2".to_string())),
            ],
        )
        .await
        .unwrap();
    let raw = payload["query"].as_str().unwrap();
    assert!(raw.contains("search=sate"));
    assert!(raw.contains("page=2"));
    assert!(!raw.contains("category"));
}
