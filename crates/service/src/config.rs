//! Process configuration.

use chrono::Duration;

const DEFAULT_TTL_MINUTES: i64 = 30;

/// Environment-derived service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Process-wide token signing key.
    pub token_secret: String,

    /// Lifetime of issued bearer tokens.
    pub token_ttl: Duration,
}

impl ServiceConfig {
    /// Read configuration from the environment.
    ///
    /// `CAREBASE_TOKEN_SECRET` is the signing key; falls back to an insecure
    /// dev default with a warning. `CAREBASE_TOKEN_TTL_MINUTES` is the token
    /// lifetime, default 30.
    pub fn from_env() -> Self {
        let token_secret = std::env::var("CAREBASE_TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("CAREBASE_TOKEN_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let ttl_minutes = std::env::var("CAREBASE_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_TTL_MINUTES);

        Self {
            token_secret,
            token_ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Fixed configuration for tests.
    pub fn for_tests(token_secret: &str) -> Self {
        Self {
            token_secret: token_secret.to_string(),
            token_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }
}
