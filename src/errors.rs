use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::simulate::Endpoint;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("path parameter '{0}' is missing")]
    MissingPathParam(&'static str),

    #[error("could not parse '{param}' as an integer")]
    InvalidInteger {
        endpoint: Endpoint,
        param: &'static str,
    },

    #[error("bearer token missing or unknown")]
    TokenMissing,

    #[error("bearer token expired")]
    TokenExpired { endpoint: Endpoint },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingPathParam(name) => {
                tracing::warn!("{} not specified", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "generic error": "error" }),
                )
            }
            AppError::InvalidInteger { endpoint, param } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                endpoint.parse_error_body(param),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                unauthorized("[BearerReadAccessTokenFailed] Error validating token: 'S2S12005'."),
            ),
            AppError::TokenExpired { endpoint } => (
                StatusCode::UNAUTHORIZED,
                unauthorized(endpoint.expired_message()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Provider-style 401 envelope. The capitalised `Message` key is what the
/// real service sends.
fn unauthorized(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": "Unauthorized",
            "Message": message,
        }
    })
}
