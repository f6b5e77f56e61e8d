use std::collections::HashMap;

use crate::errors::AppError;
use crate::simulate::Endpoint;

/// Path parameters as extracted by `Path<HashMap<..>>`.
pub type PathParams = HashMap<String, String>;
pub type QueryParams = HashMap<String, String>;

/// Fetch a non-empty path segment.
pub fn required(params: &PathParams, name: &'static str) -> Result<String, AppError> {
    match params.get(name) {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(AppError::MissingPathParam(name)),
    }
}

/// Parse an optional integer query parameter. Absent and empty values are
/// both `None`. `label` is the name reported in the parse error body.
pub fn optional_int(
    query: &QueryParams,
    key: &str,
    endpoint: Endpoint,
    label: &'static str,
) -> Result<Option<i64>, AppError> {
    match query.get(key).map(String::as_str) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            tracing::debug!(key, raw, "rejecting non-integer query parameter");
            AppError::InvalidInteger {
                endpoint,
                param: label,
            }
        }),
    }
}
