use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Prefix for identifier URLs embedded in key vault payloads.
    /// Set via FAKEAZURE_BASE_URL. Default: `http://fakeazure:8081`.
    pub base_url: String,
    /// Token lifetime in seconds when `withexpiry` is not given.
    /// Set via FAKEAZURE_DEFAULT_EXPIRY. Default: 30.
    pub default_expiry_secs: i64,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8081,
            base_url: "http://fakeazure:8081".into(),
            default_expiry_secs: 30,
            log_json: false,
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from an arbitrary variable source.
pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let host = match lookup("FAKEAZURE_HOST") {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid FAKEAZURE_HOST: {}", raw))?,
        None => defaults.host,
    };

    Ok(Config {
        host,
        port: lookup("FAKEAZURE_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port),
        base_url: lookup("FAKEAZURE_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url),
        default_expiry_secs: lookup("FAKEAZURE_DEFAULT_EXPIRY")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.default_expiry_secs),
        log_json: lookup("FAKEAZURE_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(defaults.log_json),
    })
}
