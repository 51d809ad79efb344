use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Where the persisted session (`authToken` / `user`) lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory only; lost on restart.
    Memory,
    /// A Redis server.
    Redis(String),
    /// A JSON key-value file on disk.
    File(String),
}

impl StorageBackend {
    /// Parses a `SESSION_STORAGE` value.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("memory") {
            StorageBackend::Memory
        } else if value.starts_with("redis://") || value.starts_with("rediss://") {
            StorageBackend::Redis(value.to_string())
        } else {
            StorageBackend::File(value.to_string())
        }
    }
}

/// How `login` decides whether a credential pair is accepted.
#[derive(Clone)]
pub enum LoginPolicy {
    /// Accept any password for an email present in the credential table.
    Demo,
    /// Accept exactly the configured email/password pair.
    Static {
        email: String,
        password: Zeroizing<String>,
    },
}

impl std::fmt::Debug for LoginPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginPolicy::Demo => f.write_str("Demo"),
            LoginPolicy::Static { email, .. } => f
                .debug_struct("Static")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The session storage backend.
    pub storage: StorageBackend,
    /// The credential check used by `login`.
    pub login_policy: LoginPolicy,
    /// Artificial delay applied to login to simulate network latency.
    pub simulated_latency: Duration,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageBackend::File(".beautybook/session.json".to_string()),
            login_policy: LoginPolicy::Demo,
            simulated_latency: Duration::from_millis(500),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) => addr.parse().context("Invalid BIND_ADDR")?,
            Err(_) => defaults.bind_addr,
        };

        let storage = env::var("SESSION_STORAGE")
            .map(|value| StorageBackend::parse(&value))
            .unwrap_or(defaults.storage);

        let login_policy = match env::var("AUTH_MODE")
            .unwrap_or_else(|_| "demo".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "demo" => LoginPolicy::Demo,
            "static" => LoginPolicy::Static {
                email: env::var("ADMIN_EMAIL")
                    .context("ADMIN_EMAIL must be set when AUTH_MODE=static")?,
                password: Zeroizing::new(
                    env::var("ADMIN_PASSWORD")
                        .context("ADMIN_PASSWORD must be set when AUTH_MODE=static")?,
                ),
            },
            other => anyhow::bail!("AUTH_MODE must be 'demo' or 'static', got '{}'", other),
        };

        let simulated_latency = Duration::from_millis(
            env::var("MOCK_LATENCY_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("Invalid MOCK_LATENCY_MS")?,
        );

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Ok(Self {
            bind_addr,
            storage,
            login_policy,
            simulated_latency,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parsing() {
        assert_eq!(StorageBackend::parse("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::parse(" MEMORY "), StorageBackend::Memory);
        assert_eq!(
            StorageBackend::parse("redis://127.0.0.1:6379"),
            StorageBackend::Redis("redis://127.0.0.1:6379".to_string())
        );
        assert_eq!(
            StorageBackend::parse("/tmp/session.json"),
            StorageBackend::File("/tmp/session.json".to_string())
        );
    }

    #[test]
    fn static_policy_debug_hides_password() {
        let policy = LoginPolicy::Static {
            email: "owner@example.com".to_string(),
            password: Zeroizing::new("hunter22".to_string()),
        };
        let printed = format!("{:?}", policy);
        assert!(printed.contains("owner@example.com"));
        assert!(!printed.contains("hunter22"));
    }
}
