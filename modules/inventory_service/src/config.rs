//! Configuration for inventory service module

use serde::{Deserialize, Serialize};

/// Signing key used when none is configured; only fit for local development
pub const DEVELOPMENT_SECRET_KEY: &str = "inventory-development-secret-change-me";

const REDACTED: &str = "<redacted>";

/// Inventory service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Number of entries returned by the activity log listing
    #[serde(default = "default_activity_log_limit")]
    pub activity_log_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            activity_log_limit: default_activity_log_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (`sqlite://...` or `postgres://...`)
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// PBKDF2-SHA256 iterations for new password hashes
    #[serde(default = "default_password_rounds")]
    pub password_rounds: u32,

    /// Password given to the superadmin account created on first start
    #[serde(default = "default_superadmin_password")]
    pub superadmin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            token_ttl_minutes: default_token_ttl_minutes(),
            password_rounds: default_password_rounds(),
            superadmin_password: default_superadmin_password(),
        }
    }
}

impl AuthConfig {
    pub fn uses_development_secret(&self) -> bool {
        self.secret_key == DEVELOPMENT_SECRET_KEY
    }
}

impl Config {
    /// Copy safe to print: secrets and database credentials masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth.secret_key = REDACTED.to_string();
        copy.auth.superadmin_password = REDACTED.to_string();
        copy.database.url = redact_url_password(&self.database.url);
        copy
    }
}

/// `postgres://user:pw@host/db` becomes `postgres://user:<redacted>@host/db`
fn redact_url_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:{}@{}", scheme, user, REDACTED, host),
        None => url.to_string(),
    }
}

fn default_database_url() -> String {
    "sqlite://inventory.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_secret_key() -> String {
    DEVELOPMENT_SECRET_KEY.to_string()
}

fn default_token_ttl_minutes() -> i64 {
    480 // 8 hours
}

fn default_password_rounds() -> u32 {
    600_000
}

fn default_superadmin_password() -> String {
    "admin123".to_string()
}

fn default_activity_log_limit() -> u64 {
    100
}
