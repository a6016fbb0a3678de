//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use catalog::CatalogConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
/// Upper bound for SESSION_TTL_SECS (one year)
const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Without it the server runs on the in-memory store
    pub database_url: Option<String>,
    pub frontend_origins: Vec<HeaderValue>,
    /// In-memory mode only: password for the seeded `user` and `admin`
    pub dev_seed_password: Option<String>,
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: non_empty_var("DATABASE_URL"),
            frontend_origins,
            dev_seed_password: non_empty_var("DEV_SEED_PASSWORD"),
            catalog: catalog_config_from_env()?,
        })
    }
}

fn catalog_config_from_env() -> anyhow::Result<CatalogConfig> {
    let mut config = if cfg!(debug_assertions) {
        CatalogConfig::development()
    } else {
        CatalogConfig::default()
    };

    match non_empty_var("SESSION_SECRET") {
        Some(secret_b64) => config.session_secret = decode_secret(&secret_b64)?,
        None if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
        }
        None => bail!("SESSION_SECRET must be set in production"),
    }

    if let Some(secure) = non_empty_var("COOKIE_SECURE") {
        config.cookie_secure = secure
            .parse()
            .context("COOKIE_SECURE must be true or false")?;
    }

    if let Some(ttl) = non_empty_var("SESSION_TTL_SECS") {
        config.session_ttl = parse_session_ttl(&ttl)?;
    }

    config.password_pepper = non_empty_var("PASSWORD_PEPPER").map(String::into_bytes);

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("SESSION_SECRET must be base64")?;

    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must be 32 bytes, got {}", b.len()))
}

fn parse_session_ttl(value: &str) -> anyhow::Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .context("SESSION_TTL_SECS must be an integer")?;

    if secs == 0 || secs > MAX_SESSION_TTL_SECS {
        bail!("SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}, got {secs}");
    }

    Ok(Duration::from_secs(secs))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_requires_32_bytes() {
        let ok = general_purpose::STANDARD.encode([9u8; 32]);
        assert_eq!(decode_secret(&ok).unwrap(), [9u8; 32]);

        let short = general_purpose::STANDARD.encode([9u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_session_ttl_bounds() {
        assert_eq!(parse_session_ttl("1800").unwrap(), Duration::from_secs(1800));
        assert_eq!(
            parse_session_ttl(&MAX_SESSION_TTL_SECS.to_string()).unwrap(),
            Duration::from_secs(MAX_SESSION_TTL_SECS)
        );

        assert!(parse_session_ttl("0").is_err());
        assert!(parse_session_ttl(&(MAX_SESSION_TTL_SECS + 1).to_string()).is_err());
        assert!(parse_session_ttl("10000000000000").is_err());
        assert!(parse_session_ttl("-5").is_err());
        assert!(parse_session_ttl("soon").is_err());
    }
}
