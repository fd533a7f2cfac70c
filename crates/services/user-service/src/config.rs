//! User service configuration.

use std::env;

use clap::ValueEnum;

use common::DatabaseConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Which set of endpoints the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ApiVariant {
    /// count, list, get one, add, delete all
    Base,
    /// Base plus update and delete by login
    #[default]
    Extended,
}

impl ApiVariant {
    pub fn is_extended(self) -> bool {
        matches!(self, ApiVariant::Extended)
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Exposed endpoint set
    pub variant: ApiVariant,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database = DatabaseConfig {
            url: var("USER_SERVICE_DATABASE_URL")
                .or_else(|| var("DATABASE_URL"))
                .unwrap_or(defaults.database.url),
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database.max_connections),
            min_connections: var("DATABASE_MIN_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database.min_connections),
        };

        let variant = match var("API_VARIANT") {
            Some(value) => ApiVariant::from_str(&value, true).unwrap_or_else(|_| {
                tracing::warn!("Unknown API_VARIANT '{}', using {:?}", value, defaults.variant);
                defaults.variant
            }),
            None => defaults.variant,
        };

        Self {
            database,
            host: var("USER_SERVICE_HOST").unwrap_or(defaults.host),
            port: var("USER_SERVICE_PORT")
                .or_else(|| var("SERVER_PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            variant,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            variant: ApiVariant::default(),
        }
    }
}
