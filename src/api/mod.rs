use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::request_id_middleware;
use crate::AppState;

pub mod keyvault;
pub mod oauth;
pub mod params;

/// Build the full mock router with state attached.
///
/// Static prefixes (`/keyvault`, `/metadata`) win over the `:tenantId`
/// segment of the OAuth route.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        // OAuth
        .route("/:tenantId/oauth2/v2.0/token", post(oauth::tenant_token))
        .route(
            "/metadata/identity/oauth2/token",
            get(oauth::managed_identity_token),
        )
        // Secrets
        .route(
            "/keyvault/:vaultName/secrets/:secretName",
            get(keyvault::get_secret_default),
        )
        .route(
            "/keyvault/:vaultName/secrets/:secretName/:secretVersion",
            get(keyvault::get_secret_version),
        )
        // Certificates
        .route(
            "/keyvault/:vaultName/certificates/:certificateName",
            get(keyvault::get_certificate_default),
        )
        .route(
            "/keyvault/:vaultName/certificates/:certificateName/:certificateVersion",
            get(keyvault::get_certificate_version),
        )
        // Keys
        .route(
            "/keyvault/:vaultName/keys/:keyName",
            get(keyvault::get_key_default),
        )
        .route(
            "/keyvault/:vaultName/keys/:keyName/:keyVersion",
            get(keyvault::get_key_version),
        )
        .fallback(fallback_404)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
