//! Process Configuration
//!
//! Everything is read from the environment (`.env` is loaded first).

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use platform::rate_limit::RateLimitConfig;
use platform::token::TokenSecret;
use shop::ShopConfig;

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RATE_LIMIT_RPS: u32 = 1000;
const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 3000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";

/// API server configuration
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub db_max_connections: u32,
    pub rate_limit: RateLimitConfig,
    pub frontend_origins: Vec<HeaderValue>,
    pub shop: ShopConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(encoded) => TokenSecret::from_base64(&encoded).context("TOKEN_SECRET")?,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret");
                TokenSecret::random()
            }
            Err(_) => bail!("TOKEN_SECRET must be set in production"),
        };

        let operation_timeout_ms: u64 =
            parse_env("OPERATION_TIMEOUT_MS", DEFAULT_OPERATION_TIMEOUT_MS)?;

        let shop = ShopConfig {
            cookie_secure: parse_env("COOKIE_SECURE", !cfg!(debug_assertions))?,
            operation_timeout: Duration::from_millis(operation_timeout_ms),
            ..ShopConfig::new(token_secret)
        };

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        Ok(Self {
            database_url,
            server_addr: parse_env("SERVER_ADDR", DEFAULT_SERVER_ADDR.parse()?)?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            rate_limit: RateLimitConfig::per_second(parse_env(
                "RATE_LIMIT_RPS",
                DEFAULT_RATE_LIMIT_RPS,
            )?),
            frontend_origins,
            shop,
        })
    }
}

/// Parse `key` if present, otherwise fall back to `default`
fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key}: invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default() {
        let value: u32 = parse_env("API_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
