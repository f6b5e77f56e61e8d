//! Shared helpers for driving the mock router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use fakeazure::config::Config;
use fakeazure::AppState;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

pub fn app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default()));
    (fakeazure::api::router(state.clone()), state)
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str, authorization: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = authorization {
        builder = builder.header("authorization", auth);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// Issue a token through the tenant endpoint and return the header value
/// a client would present.
pub async fn bearer(app: &Router, query: &str) -> String {
    let resp = post(app, &format!("/tenant-1/oauth2/v2.0/token{}", query)).await;
    assert_eq!(resp.status, StatusCode::OK, "token issuance failed: {}", resp.text());
    format!("Bearer {}", resp.json()["access_token"].as_str().unwrap())
}
