//! End-to-end over a real listener, the way client suites talk to the mock.

use std::net::SocketAddr;
use std::sync::Arc;

use fakeazure::config::Config;
use fakeazure::models::oauth::OAuthResponse;
use fakeazure::AppState;

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config {
        base_url: format!("http://{}", addr),
        ..Config::default()
    };
    let app = fakeazure::api::router(Arc::new(AppState::new(config)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_client_credentials_then_secret() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let token: OAuthResponse = client
        .post(format!("http://{}/tenant/oauth2/v2.0/token", addr))
        .form(&[
            ("client_id", "app"),
            ("client_secret", "secret"),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 30);

    let resp = client
        .get(format!("http://{}/keyvault/prod/secrets/api-key/v7", addr))
        .bearer_auth(&token.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["id"],
        format!("http://{}/keyvault/prod/secrets/api-key/v7", addr)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_and_verify() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let token: OAuthResponse = client
                .get(format!("http://{}/metadata/identity/oauth2/token", addr))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            client
                .get(format!("http://{}/keyvault/v{}/keys/k{}", addr, i, i))
                .bearer_auth(&token.access_token)
                .send()
                .await
                .unwrap()
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), reqwest::StatusCode::OK);
    }
}
