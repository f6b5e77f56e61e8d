//! fakeazure — mock OAuth and key vault endpoints for client test suites.
//!
//! Re-exports modules needed by the binary and by integration tests in `tests/`.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod simulate;
pub mod store;

use store::TokenStore;

/// Shared application state passed to handlers.
pub struct AppState {
    pub tokens: TokenStore,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            tokens: TokenStore::new(),
            config,
        }
    }
}
