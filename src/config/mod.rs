//! Configuration loading and management

use crate::core::auth::UserAccount;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Environment variable naming the YAML config file
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.yaml";

/// Minimum length of a usable session secret (cookie signing + encryption key)
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Mark session and flash cookies `Secure`; enable behind HTTPS
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            secure_cookies: false,
        }
    }
}

/// Which storage backend to run against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Connection URL, required for postgres
    pub url: Option<String>,

    pub max_connections: u32,

    /// Fill an empty store with demo customers and invoices
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            url: None,
            max_connections: 5,
            seed: true,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accounts accepted by the credentials provider
    pub users: Vec<UserAccount>,

    /// Secret used to derive the session cookie key
    pub session_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: vec![UserAccount {
                email: "user@nextmail.com".to_string(),
                password: "123456".to_string(),
                name: "User".to_string(),
            }],
            session_secret: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("users", &self.users)
            .field("session_secret", &self.session_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub items_per_page: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { items_per_page: 6 }
    }
}

/// Complete configuration for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::ParseError {
                message: format!("{}: {}", path, e),
            },
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Load the file named by `DASHBOARD_CONFIG` (default `dashboard.yaml`)
    ///
    /// Falls back to the defaults when the file does not exist. The result is
    /// validated either way.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = match Self::from_yaml_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path, "loaded configuration");
                config
            }
            Err(ConfigError::FileNotFound { .. }) => {
                tracing::info!(path = %path, "no configuration file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field rules serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.users.is_empty() {
            return Err(ConfigError::Invalid {
                message: "auth.users must contain at least one account".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Postgres
            && self.storage.url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::Invalid {
                message: "storage.url is required for the postgres backend".to_string(),
            });
        }

        if self.storage.max_connections == 0 {
            return Err(ConfigError::Invalid {
                message: "storage.max_connections must be greater than 0".to_string(),
            });
        }

        if self.listing.items_per_page == 0 {
            return Err(ConfigError::Invalid {
                message: "listing.items_per_page must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// The configured session secret, if it is long enough to derive a key from
    pub fn session_secret(&self) -> Option<&[u8]> {
        self.auth
            .session_secret
            .as_deref()
            .map(str::as_bytes)
            .filter(|bytes| bytes.len() >= MIN_SESSION_SECRET_LEN)
    }
}
