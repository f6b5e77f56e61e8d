//! In-memory bearer token store.
//!
//! Tokens are keyed by the exact `Authorization` header value a client will
//! present (`"Bearer <token>"`) and map to an expiry in unix seconds.
//! Entries are never evicted: an expired token stays queryable so callers
//! can tell "expired" apart from "never issued".

use std::sync::Arc;

use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated access tokens.
pub const TOKEN_LENGTH: usize = 50;

/// Outcome of checking a presented `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Header absent, or no token was ever issued under that value.
    Missing,
    /// Token was issued but `now` is past its expiry.
    Expired,
    Valid,
}

/// Shared, cheaply-cloneable token store. One instance per server.
#[derive(Clone, Default)]
pub struct TokenStore {
    tokens: Arc<DashMap<String, i64>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key` with `expires_at = now + ttl_secs`. Returns the expiry.
    pub fn issue(&self, key: impl Into<String>, ttl_secs: i64) -> i64 {
        self.issue_at(key, ttl_secs, now_unix())
    }

    pub fn issue_at(&self, key: impl Into<String>, ttl_secs: i64, now: i64) -> i64 {
        let expires_at = now.saturating_add(ttl_secs);
        self.tokens.insert(key.into(), expires_at);
        expires_at
    }

    /// Look up the expiry of `key`. No eviction happens here.
    pub fn check(&self, key: &str) -> Option<i64> {
        self.tokens.get(key).map(|entry| *entry.value())
    }

    /// Classify a presented header value against the store at time `now`.
    pub fn verify(&self, header: Option<&str>, now: i64) -> TokenStatus {
        match header.and_then(|h| self.check(h)) {
            None => TokenStatus::Missing,
            Some(expires_at) if now > expires_at => TokenStatus::Expired,
            Some(_) => TokenStatus::Valid,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Generate a random alphanumeric access token of [`TOKEN_LENGTH`] chars.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Header value a client presents for `token`.
pub fn bearer_key(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
