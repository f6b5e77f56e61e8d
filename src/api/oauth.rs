use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use super::params::{self, PathParams, QueryParams};
use crate::errors::AppError;
use crate::models::oauth::{OAuthRequest, OAuthResponse};
use crate::simulate::{self, Endpoint};
use crate::store::tokens::{bearer_key, generate_token};
use crate::AppState;

/// POST /{tenantId}/oauth2/v2.0/token — client credentials exchange
pub async fn tenant_token(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    form: Option<Form<OAuthRequest>>,
) -> Result<Response, AppError> {
    let tenant_id = params::required(&path, "tenantId")?;

    if let Some(Form(req)) = &form {
        tracing::debug!(
            tenant = %tenant_id,
            client_id = req.client_id.as_deref().unwrap_or(""),
            grant_type = req.grant_type.as_deref().unwrap_or(""),
            "token request"
        );
    }

    issue_token(&state, Endpoint::TenantToken, &query)
}

/// GET /metadata/identity/oauth2/token — instance metadata style token
pub async fn managed_identity_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QueryParams>,
) -> Result<Response, AppError> {
    issue_token(&state, Endpoint::ManagedIdentityToken, &query)
}

fn issue_token(
    state: &AppState,
    endpoint: Endpoint,
    query: &QueryParams,
) -> Result<Response, AppError> {
    // both endpoints report the code parameter as 'withcode'
    let code = params::optional_int(query, endpoint.code_param(), endpoint, "withcode")?
        .unwrap_or(0);
    let expiry = params::optional_int(query, "withexpiry", endpoint, "withexpiry")?
        .unwrap_or(state.config.default_expiry_secs);

    if let Some(canned) = simulate::simulate(endpoint, code, None) {
        tracing::debug!(?endpoint, code, "simulated oauth response");
        return Ok(canned.into_response());
    }

    let token = generate_token();
    let expires_at = state.tokens.issue(bearer_key(&token), expiry);
    tracing::info!(?endpoint, expires_at, "issued bearer token");

    Ok(Json(OAuthResponse::bearer(token, expiry)).into_response())
}
