//! Simulated failure responses.
//!
//! Clients select a response with `?withcode=N` (or
//! `?withcodemanagedidentity=N` on the metadata endpoint). Codes listed in
//! [`TABLE`] produce a fixed body for that endpoint; `0` and `200` fall
//! through to the real handler; any other integer that is a final HTTP
//! status (200–999) is echoed back with a generic body, and everything else
//! is answered with 500.
//!
//! Bodies are matched on by downstream test suites, so the text here must
//! not change.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::models::keyvault::ResourceRef;

const HTML_ERROR: &str = "<html><body>This is some HTML error that can happen</body></html>";
const FAULT_MSG: &str = "good json syntax but badly formatted error message";

/// Every route family that understands simulated codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TenantToken,
    ManagedIdentityToken,
    Secret,
    Key,
    Certificate,
}

impl Endpoint {
    /// Query parameter that selects the simulated code.
    pub fn code_param(self) -> &'static str {
        match self {
            Endpoint::ManagedIdentityToken => "withcodemanagedidentity",
            _ => "withcode",
        }
    }

    fn is_oauth(self) -> bool {
        matches!(self, Endpoint::TenantToken | Endpoint::ManagedIdentityToken)
    }

    /// Noun used in key vault messages. Certificates historically report
    /// themselves as secrets in most messages.
    fn retrieving(self) -> &'static str {
        match self {
            Endpoint::Key => "key",
            _ => "secret",
        }
    }

    /// Body for a query parameter that is not an integer.
    pub fn parse_error_body(self, param: &str) -> Value {
        if self.is_oauth() {
            json!({
                "internal server error": format!("could not parse '{}' as an integer", param),
            })
        } else {
            envelope(
                "internal server error",
                &format!(
                    "could not parse '{}' as an integer when retrieving {}",
                    param,
                    self.retrieving()
                ),
            )
        }
    }

    /// `Message` text of the 401 returned for an expired token.
    pub fn expired_message(self) -> &'static str {
        match self {
            Endpoint::Secret => "[BearerReadAccessTokenFailed] Token expired: 'S2S120010'.",
            _ => "[TokenExpired] Error validating token: 'S2S12086'.",
        }
    }

    fn nonspecific_body(self) -> Value {
        match self {
            Endpoint::TenantToken => json!({ "nonspecific error": "error" }),
            Endpoint::ManagedIdentityToken => {
                json!({ "nonspecific error on managed identiy endpoint": "error" })
            }
            _ => json!({ "nonspecific error": "error retrieving secret" }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Body {
    /// `{"<key>": "<value>"}`
    Pair(&'static str, &'static str),
    /// `{"error": {"code": .., "message": ..}}`; `{name}` and `{version}`
    /// are replaced with the requested resource.
    Envelope(&'static str, &'static str),
    Html,
    /// Well-formed JSON in an unexpected shape, served as HTML.
    Fault,
}

struct Entry {
    endpoint: Endpoint,
    code: i64,
    status: StatusCode,
    body: Body,
}

const fn entry(endpoint: Endpoint, code: i64, status: StatusCode, body: Body) -> Entry {
    Entry {
        endpoint,
        code,
        status,
        body,
    }
}

use Body::{Envelope, Fault, Html, Pair};
use Endpoint::{Certificate, Key, ManagedIdentityToken, Secret, TenantToken};

const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
const UNAUTHORIZED: StatusCode = StatusCode::UNAUTHORIZED;
const FORBIDDEN: StatusCode = StatusCode::FORBIDDEN;
const NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;

static TABLE: &[Entry] = &[
    // ── OAuth: tenant token endpoint ──
    entry(TenantToken, 500, ISE, Pair("internal server error", "error")),
    entry(TenantToken, 401, UNAUTHORIZED, Pair("unauthorized", "wrong client id or something")),
    entry(TenantToken, 403, FORBIDDEN, Pair("forbidden", "not allowed on this specific tenant perhaps")),
    // ── OAuth: managed identity endpoint ──
    entry(
        ManagedIdentityToken,
        500,
        ISE,
        Pair("internal server error on managed identiy endpoint", "error"),
    ),
    entry(
        ManagedIdentityToken,
        401,
        UNAUTHORIZED,
        Pair("unauthorized", "wrong client id or something on managed identiy endpoint"),
    ),
    entry(
        ManagedIdentityToken,
        403,
        FORBIDDEN,
        Pair("forbidden", "not allowed on this specific tenant perhaps on managed identiy endpoint"),
    ),
    // ── Secrets ──
    entry(Secret, 500, ISE, Envelope("internal server error", "error retrieving secret")),
    entry(Secret, 501, ISE, Html),
    entry(Secret, 502, ISE, Fault),
    entry(
        Secret,
        401,
        UNAUTHORIZED,
        Envelope("unauthorized", "invalid authentication credentials when retrieving secret"),
    ),
    entry(
        Secret,
        403,
        FORBIDDEN,
        Envelope("forbidden", "not allowed on this specific tenant perhaps when retrieving secret"),
    ),
    entry(
        Secret,
        404,
        NOT_FOUND,
        Envelope("not_found", "secret {name} version {version} not found in this keyvault"),
    ),
    // ── Keys ──
    entry(Key, 500, ISE, Envelope("internal server error", "error retrieving key")),
    entry(Key, 501, ISE, Html),
    entry(Key, 502, ISE, Fault),
    entry(
        Key,
        401,
        UNAUTHORIZED,
        Envelope("unauthorized", "invalid authentication credentials when retrieving key"),
    ),
    entry(
        Key,
        403,
        FORBIDDEN,
        Envelope("forbidden", "not allowed on this specific tenant perhaps when retrieving key"),
    ),
    entry(
        Key,
        404,
        NOT_FOUND,
        Envelope(
            "KeyNotFound",
            "A key with (name/id) {name} was not found in this key vault. If you recently deleted \
             this key you may be able to recover it using the correct recovery command. For help \
             resolving this issue, please see redacted",
        ),
    ),
    // ── Certificates ──
    entry(Certificate, 500, ISE, Envelope("internal server error", "error retrieving secret")),
    entry(Certificate, 501, ISE, Html),
    entry(Certificate, 502, ISE, Fault),
    entry(
        Certificate,
        401,
        UNAUTHORIZED,
        Envelope("unauthorized", "invalid authentication credentials when retrieving certificate"),
    ),
    entry(
        Certificate,
        403,
        FORBIDDEN,
        Envelope("forbidden", "not allowed on this specific tenant perhaps when retrieving secret"),
    ),
    entry(
        Certificate,
        404,
        NOT_FOUND,
        Envelope("not_found", "certificate {name} not found in this keyvault"),
    ),
];

/// A fully rendered simulated response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// `true` for the codes that mean "no simulation, behave normally".
pub fn is_passthrough(code: i64) -> bool {
    code == 0 || code == 200
}

/// Resolve `code` for `endpoint`. `None` means the handler should carry on
/// with its normal behaviour.
pub fn simulate(endpoint: Endpoint, code: i64, resource: Option<&ResourceRef>) -> Option<Canned> {
    if is_passthrough(code) {
        return None;
    }

    let found = TABLE
        .iter()
        .find(|e| e.endpoint == endpoint && e.code == code);

    Some(match found {
        Some(e) => render(e.status, e.body, resource),
        None => nonspecific(endpoint, code),
    })
}

fn render(status: StatusCode, body: Body, resource: Option<&ResourceRef>) -> Canned {
    match body {
        Pair(key, value) => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), Value::from(value));
            json_canned(status, Value::Object(map))
        }
        Envelope(code, message) => {
            json_canned(status, envelope(code, &interpolate(message, resource)))
        }
        Html => Canned {
            status,
            content_type: "text/html",
            body: HTML_ERROR.to_string(),
        },
        Fault => Canned {
            status,
            content_type: "text/html",
            body: json!({ "fault": { "msg": FAULT_MSG } }).to_string(),
        },
    }
}

/// Echo an arbitrary caller-chosen status. Values that cannot be sent as a
/// final response (including 1xx, which hyper rewrites) are answered with 500.
fn nonspecific(endpoint: Endpoint, code: i64) -> Canned {
    let status = u16::try_from(code)
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .filter(|s| !s.is_informational())
        .unwrap_or_else(|| {
            tracing::warn!(
                code,
                endpoint = ?endpoint,
                "simulated status is not a valid HTTP status, answering 500"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        });

    json_canned(status, endpoint.nonspecific_body())
}

fn json_canned(status: StatusCode, body: Value) -> Canned {
    Canned {
        status,
        content_type: "application/json",
        body: body.to_string(),
    }
}

fn envelope(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message } })
}

/// Substitute `{name}` and `{version}` in a single left-to-right pass, so
/// placeholder text inside the substituted values is emitted literally.
fn interpolate(template: &str, resource: Option<&ResourceRef>) -> String {
    let Some(r) = resource else {
        return template.to_string();
    };

    let mut out = String::with_capacity(template.len() + r.name.len() + r.version.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{name}") {
            out.push_str(&r.name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{version}") {
            out.push_str(&r.version);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
