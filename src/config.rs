use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// The service's configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Secret used to sign and verify session tokens.
    pub session_secret: Vec<u8>,
    /// Lifetime of newly issued session tokens.
    pub session_ttl_hours: i64,
    /// Whether the service runs in production (enables `Secure` cookies).
    pub is_production: bool,
    /// Upper bound on a single audit write before it is abandoned.
    pub audit_write_timeout: Duration,
    /// PostgreSQL connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("session_secret", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("is_production", &self.is_production)
            .field("audit_write_timeout", &self.audit_write_timeout)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = lookup("SESSION_SECRET")
            .context("SESSION_SECRET must be set (generate with: openssl rand -hex 32)")?
            .into_bytes();

        if session_secret.len() < MIN_SECRET_LEN {
            bail!("SESSION_SECRET must be at least {} bytes", MIN_SECRET_LEN);
        }

        let session_ttl_hours: i64 = lookup("SESSION_TTL_HOURS")
            .unwrap_or_else(|| "8".to_string())
            .parse()
            .context("Invalid SESSION_TTL_HOURS")?;

        if session_ttl_hours <= 0 {
            bail!("SESSION_TTL_HOURS must be positive");
        }

        let is_production = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let audit_write_timeout_ms: u64 = lookup("AUDIT_WRITE_TIMEOUT_MS")
            .unwrap_or_else(|| "2000".to_string())
            .parse()
            .context("Invalid AUDIT_WRITE_TIMEOUT_MS")?;

        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        Ok(Self {
            session_secret,
            session_ttl_hours,
            is_production,
            audit_write_timeout: Duration::from_millis(audit_write_timeout_ms),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            bind_addr,
        })
    }
}
