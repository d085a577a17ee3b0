//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and passed down
//! explicitly; nothing reads the environment after that.
//!
//! ```bash
//! export HTTP_SERVER_USER="admin"
//! export HTTP_SERVER_PASSWORD="secret"
//! export STORAGE_PATH="./storage/storage.db"
//! ```
//!
//! ## Required Variables
//!
//! - `HTTP_SERVER_USER` / `HTTP_SERVER_PASSWORD` - Basic auth for URL management
//!
//! ## Optional Variables
//!
//! - `ENV` - `local`, `dev` or `prod` (default: `local`)
//! - `ADDRESS` - Bind address (default: `localhost:8082`)
//! - `HTTP_SERVER_TIMEOUT` - Request timeout in seconds (default: 4)
//! - `ALIAS_LENGTH` - Generated alias length, 1-32 (default: 6)
//! - `ALIAS_MAX_ATTEMPTS` - Generated candidates per save (default: 10)
//! - `RUST_LOG` - Log filter override (default depends on `ENV`)
//! - Storage settings, see [`StorageConfig`]

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::AllocationPolicy;
use crate::application::services::url_service::DEFAULT_MAX_ATTEMPTS;
use crate::infrastructure::persistence::StorageConfig;
use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, MAX_ALIAS_LENGTH};

/// Deployment environment, selecting the log format and default level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Human-readable logs at `debug`.
    Local,
    /// JSON logs at `debug`.
    Dev,
    /// JSON logs at `info`.
    Prod,
}

impl Environment {
    pub fn default_log_level(self) -> &'static str {
        match self {
            Environment::Local | Environment::Dev => "debug",
            Environment::Prod => "info",
        }
    }

    pub fn json_logs(self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => anyhow::bail!("ENV must be 'local', 'dev' or 'prod', got '{other}'"),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        f.write_str(name)
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub listen_addr: String,
    /// Per-request timeout in seconds (`HTTP_SERVER_TIMEOUT`).
    pub request_timeout_secs: u64,
    pub auth_user: String,
    pub auth_password: String,
    pub alias_length: usize,
    pub alias_max_attempts: usize,
    pub log_level: Option<String>,
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or `ENV` is unknown.
    pub fn from_env() -> Result<Self> {
        let env = env::var("ENV")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<Environment>()?;

        let listen_addr = env::var("ADDRESS").unwrap_or_else(|_| "localhost:8082".to_string());

        let request_timeout_secs = env::var("HTTP_SERVER_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let auth_user = env::var("HTTP_SERVER_USER").context("HTTP_SERVER_USER must be set")?;
        let auth_password =
            env::var("HTTP_SERVER_PASSWORD").context("HTTP_SERVER_PASSWORD must be set")?;

        let AllocationPolicy {
            alias_length,
            max_attempts: alias_max_attempts,
        } = read_allocation_policy();

        let log_level = env::var("RUST_LOG").ok().filter(|v| !v.is_empty());

        Ok(Self {
            env,
            listen_addr,
            request_timeout_secs,
            auth_user,
            auth_password,
            alias_length,
            alias_max_attempts,
            log_level,
            storage: StorageConfig::from_env(),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - credentials are empty
    /// - `alias_length` is outside 1-32 or `alias_max_attempts` is zero
    /// - the request timeout is zero
    /// - storage settings are invalid
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "ADDRESS must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.auth_user.is_empty() || self.auth_password.is_empty() {
            anyhow::bail!("HTTP_SERVER_USER and HTTP_SERVER_PASSWORD must not be empty");
        }

        validate_allocation_policy(&self.allocation_policy())?;

        if self.request_timeout_secs == 0 {
            anyhow::bail!("HTTP_SERVER_TIMEOUT must be greater than 0");
        }

        self.storage.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn allocation_policy(&self) -> AllocationPolicy {
        AllocationPolicy {
            alias_length: self.alias_length,
            max_attempts: self.alias_max_attempts,
        }
    }

    /// Returns the tracing filter: `RUST_LOG` if set, otherwise the
    /// environment's default level for this crate and `tower_http`.
    pub fn log_filter(&self) -> String {
        self.log_level.clone().unwrap_or_else(|| {
            let level = self.env.default_log_level();
            format!("url_shortener={level},tower_http={level}")
        })
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage: {}", self.storage.path);
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!(
            "  Alias length: {} (max {} attempts)",
            self.alias_length,
            self.alias_max_attempts
        );
        tracing::info!("  Auth user: {}", self.auth_user);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates only the alias allocation settings
/// (`ALIAS_LENGTH`, `ALIAS_MAX_ATTEMPTS`).
///
/// Used by tools that allocate aliases without running the HTTP server.
///
/// # Errors
///
/// Returns an error if the length is outside 1-32 or attempts is zero.
pub fn allocation_policy_from_env() -> Result<AllocationPolicy> {
    let policy = read_allocation_policy();
    validate_allocation_policy(&policy)?;
    Ok(policy)
}

fn read_allocation_policy() -> AllocationPolicy {
    AllocationPolicy {
        alias_length: env::var("ALIAS_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ALIAS_LENGTH),
        max_attempts: env::var("ALIAS_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS),
    }
}

fn validate_allocation_policy(policy: &AllocationPolicy) -> Result<()> {
    if policy.alias_length == 0 || policy.alias_length > MAX_ALIAS_LENGTH {
        anyhow::bail!(
            "ALIAS_LENGTH must be between 1 and {MAX_ALIAS_LENGTH}, got {}",
            policy.alias_length
        );
    }

    if policy.max_attempts == 0 {
        anyhow::bail!("ALIAS_MAX_ATTEMPTS must be at least 1");
    }

    Ok(())
}
