//! Layered server configuration
//!
//! Defaults, then an optional YAML file, then `INVENTORY_` prefixed
//! environment variables (`__` separates nested keys), then the bare
//! `PORT`, `DATABASE_URL` and `SECRET_KEY` variables set by hosting platforms.

use crate::logging::LoggingConfig;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "INVENTORY_";

/// Bare variable name and the config key it overrides
const PLATFORM_ENV: [(&str, &str); 3] = [
    ("PORT", "server.port"),
    ("DATABASE_URL", "inventory.database.url"),
    ("SECRET_KEY", "inventory.auth.secret_key"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub inventory: inventory_service::Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins; an entry may contain one `*` wildcard
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
        "http://localhost:3002".to_string(),
        "https://ds-inventory-client.vercel.app".to_string(),
        "https://ds-inventory-frontend.onrender.com".to_string(),
        "https://*.onrender.com".to_string(),
    ]
}

impl AppConfig {
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        for (var, key) in PLATFORM_ENV {
            figment = figment.merge(Env::raw().only(&[var]).map(move |_| key.into()));
        }

        figment
    }

    /// Load configuration; an explicitly named file must exist
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(figment::Error::from(format!(
                    "configuration file {} does not exist",
                    path.display()
                )));
            }
        }
        Self::figment(path).extract()
    }

    /// Copy safe to print
    pub fn redacted(&self) -> Self {
        Self {
            inventory: self.inventory.redacted(),
            ..self.clone()
        }
    }
}
