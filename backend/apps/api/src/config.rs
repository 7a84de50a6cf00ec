//! Server Configuration
//!
//! Everything is read from the environment (after `.env` is loaded).
//!
//! | Env Var            | Default                                          |
//! |--------------------|--------------------------------------------------|
//! | `HOST`             | `0.0.0.0`                                        |
//! | `PORT`             | `8000`                                           |
//! | `DATABASE_URL`     | unset: no store unless `ACADEMY_STORE=memory`    |
//! | `ACADEMY_STORE`    | `postgres` when `DATABASE_URL` is set            |
//! | `JWT_SECRET`       | required in release builds, random in debug      |
//! |                    | (`base64:<key>` is decoded, anything else is raw) |
//! | `JWT_TTL_DAYS`     | `7`                                              |
//! | `FRONTEND_ORIGINS` | `http://localhost:3000,http://127.0.0.1:3000`    |

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MAX_TOKEN_TTL_DAYS;
use auth::application::config::SigningSecret;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Prefix marking a base64-encoded `JWT_SECRET`
const BASE64_SECRET_PREFIX: &str = "base64:";

/// Which store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Postgres { url: String },
    Memory,
    /// Reads fall back to defaults, writes answer 503
    None,
}

impl StoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::Postgres { .. } => "postgres",
            StoreKind::Memory => "memory",
            StoreKind::None => "none",
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(&std::env::vars().collect(), cfg!(debug_assertions))
    }

    /// Build from an explicit variable map. `debug` allows a missing
    /// `JWT_SECRET` (a random one is generated).
    pub fn from_vars(vars: &HashMap<String, String>, debug: bool) -> anyhow::Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or("0.0.0.0").to_string();

        let port = match get("PORT") {
            Some(p) => p.parse().context("PORT must be a valid u16")?,
            None => DEFAULT_PORT,
        };

        let store = match (get("ACADEMY_STORE"), get("DATABASE_URL")) {
            (Some("memory"), _) => StoreKind::Memory,
            (Some("none"), _) => StoreKind::None,
            (Some("postgres") | None, Some(url)) => StoreKind::Postgres {
                url: url.to_string(),
            },
            (Some("postgres"), None) => bail!("ACADEMY_STORE=postgres requires DATABASE_URL"),
            (None, None) => StoreKind::None,
            (Some(other), _) => bail!("Unknown ACADEMY_STORE: {other}"),
        };

        let cors_origins = get("FRONTEND_ORIGINS")
            .unwrap_or(DEFAULT_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let secret = match get("JWT_SECRET") {
            Some(value) => parse_secret(value).context("JWT_SECRET is invalid")?,
            None if debug => {
                tracing::warn!("JWT_SECRET not set; tokens will not survive a restart");
                SigningSecret::random()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        let mut auth = AuthConfig::new(secret);
        if let Some(days) = get("JWT_TTL_DAYS") {
            let days: u64 = days.parse().context("JWT_TTL_DAYS must be a whole number")?;
            if days == 0 {
                bail!("JWT_TTL_DAYS must be at least 1");
            }
            if days > MAX_TOKEN_TTL_DAYS {
                bail!("JWT_TTL_DAYS must be at most {MAX_TOKEN_TTL_DAYS}");
            }
            auth = auth.with_token_ttl(Duration::from_secs(days * 24 * 3600));
        }

        Ok(Self {
            host,
            port,
            store,
            cors_origins,
            auth,
        })
    }
}

fn parse_secret(value: &str) -> Result<SigningSecret, platform::crypto::SecretError> {
    match value.strip_prefix(BASE64_SECRET_PREFIX) {
        Some(encoded) => SigningSecret::from_base64(encoded),
        None => SigningSecret::from_text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_in_debug() {
        let config = ServerConfig::from_vars(&vars(&[]), true).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.store, StoreKind::None);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.auth.token_ttl_secs(), 7 * 24 * 3600);
    }

    #[test]
    fn test_release_requires_secret() {
        assert!(ServerConfig::from_vars(&vars(&[]), false).is_err());
        assert!(ServerConfig::from_vars(&vars(&[("JWT_SECRET", "s3cret")]), false).is_ok());
    }

    #[test]
    fn test_store_selection() {
        let config =
            ServerConfig::from_vars(&vars(&[("DATABASE_URL", "postgres://db/academy")]), true)
                .unwrap();
        assert_eq!(
            config.store,
            StoreKind::Postgres {
                url: "postgres://db/academy".to_string()
            }
        );

        let config = ServerConfig::from_vars(
            &vars(&[
                ("DATABASE_URL", "postgres://db/academy"),
                ("ACADEMY_STORE", "memory"),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(config.store, StoreKind::Memory);

        assert!(ServerConfig::from_vars(&vars(&[("ACADEMY_STORE", "postgres")]), true).is_err());
        assert!(ServerConfig::from_vars(&vars(&[("ACADEMY_STORE", "mongo")]), true).is_err());
    }

    #[test]
    fn test_secret_and_ttl_parsing() {
        let config = ServerConfig::from_vars(
            &vars(&[("JWT_SECRET", "base64:c2VjcmV0"), ("JWT_TTL_DAYS", "1")]),
            false,
        )
        .unwrap();
        assert_eq!(config.auth.jwt_secret.as_bytes(), b"secret");
        assert_eq!(config.auth.token_ttl_secs(), 86_400);

        assert!(ServerConfig::from_vars(&vars(&[("JWT_TTL_DAYS", "0")]), true).is_err());
        assert!(ServerConfig::from_vars(&vars(&[("JWT_TTL_DAYS", "-3")]), true).is_err());
        assert!(ServerConfig::from_vars(&vars(&[("PORT", "eighty")]), true).is_err());
    }

    #[test]
    fn test_oversized_ttl_is_a_config_error() {
        let err = ServerConfig::from_vars(&vars(&[("JWT_TTL_DAYS", "200000000000")]), true)
            .unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_DAYS"));

        let config = ServerConfig::from_vars(&vars(&[("JWT_TTL_DAYS", "3650")]), true).unwrap();
        let tokens = auth::TokenService::new(&config.auth);
        let issued = tokens.issue(&"max@example.com".parse().unwrap()).unwrap();
        assert!(tokens.validate(&issued.token).is_ok());
    }
}
