use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};

use super::params::{self, PathParams, QueryParams};
use crate::errors::AppError;
use crate::models::keyvault::{CertificateBundle, KeyBundle, ResourceRef, SecretBundle};
use crate::simulate::{self, Endpoint};
use crate::store::tokens::{now_unix, TokenStatus};
use crate::AppState;

/// Version served when a secret is requested without one.
pub const DEFAULT_SECRET_VERSION: &str = "9bdcdbefc49446dd9a28e04f55e10340";
/// Version served when a key or certificate is requested without one.
pub const DEFAULT_KEY_VERSION: &str = "9bdcdbefc49446dd9a2a9b3f55e10340";

/// Route parameter names and defaults for one resource family.
struct Family {
    endpoint: Endpoint,
    name_param: &'static str,
    version_param: &'static str,
    default_version: &'static str,
}

const SECRETS: Family = Family {
    endpoint: Endpoint::Secret,
    name_param: "secretName",
    version_param: "secretVersion",
    default_version: DEFAULT_SECRET_VERSION,
};

const KEYS: Family = Family {
    endpoint: Endpoint::Key,
    name_param: "keyName",
    version_param: "keyVersion",
    default_version: DEFAULT_KEY_VERSION,
};

const CERTIFICATES: Family = Family {
    endpoint: Endpoint::Certificate,
    name_param: "certificateName",
    version_param: "certificateVersion",
    default_version: DEFAULT_KEY_VERSION,
};

impl Family {
    fn payload(&self, resource: &ResourceRef, base_url: &str) -> Response {
        match self.endpoint {
            Endpoint::Secret => Json(SecretBundle::canned(resource, base_url)).into_response(),
            Endpoint::Key => Json(KeyBundle::canned(resource, base_url)).into_response(),
            _ => Json(CertificateBundle::canned(resource, base_url)).into_response(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────

/// GET /keyvault/{vaultName}/secrets/{secretName}
pub async fn get_secret_default(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &SECRETS, &path, &query, &headers, false)
}

/// GET /keyvault/{vaultName}/secrets/{secretName}/{secretVersion}
pub async fn get_secret_version(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &SECRETS, &path, &query, &headers, true)
}

/// GET /keyvault/{vaultName}/keys/{keyName}
pub async fn get_key_default(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &KEYS, &path, &query, &headers, false)
}

/// GET /keyvault/{vaultName}/keys/{keyName}/{keyVersion}
pub async fn get_key_version(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &KEYS, &path, &query, &headers, true)
}

/// GET /keyvault/{vaultName}/certificates/{certificateName}
pub async fn get_certificate_default(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &CERTIFICATES, &path, &query, &headers, false)
}

/// GET /keyvault/{vaultName}/certificates/{certificateName}/{certificateVersion}
pub async fn get_certificate_version(
    State(state): State<Arc<AppState>>,
    Path(path): Path<PathParams>,
    Query(query): Query<QueryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_resource(&state, &CERTIFICATES, &path, &query, &headers, true)
}

/// Shared flow: path checks, simulated codes, then the bearer check.
fn get_resource(
    state: &AppState,
    family: &Family,
    path: &PathParams,
    query: &QueryParams,
    headers: &HeaderMap,
    versioned: bool,
) -> Result<Response, AppError> {
    let name = params::required(path, family.name_param)?;
    let vault = params::required(path, "vaultName")?;
    let version = if versioned {
        params::required(path, family.version_param)?
    } else {
        family.default_version.to_string()
    };
    let resource = ResourceRef {
        vault,
        name,
        version,
    };

    let code = params::optional_int(query, "withcode", family.endpoint, "withcode")?
        .unwrap_or(0);
    if let Some(canned) = simulate::simulate(family.endpoint, code, Some(&resource)) {
        return Ok(canned.into_response());
    }

    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    match state.tokens.verify(presented, now_unix()) {
        TokenStatus::Missing => Err(AppError::TokenMissing),
        TokenStatus::Expired => {
            tracing::debug!(endpoint = ?family.endpoint, "rejecting expired token");
            Err(AppError::TokenExpired {
                endpoint: family.endpoint,
            })
        }
        TokenStatus::Valid => Ok(family.payload(&resource, &state.config.base_url)),
    }
}
