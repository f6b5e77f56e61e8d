pub mod tokens;

pub use tokens::{TokenStatus, TokenStore};
