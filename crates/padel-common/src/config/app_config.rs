//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    /// Present when `storage` is [`StorageBackend::Postgres`]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub links: LinkConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where matches are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Create missing tables on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

/// Identity token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Shared secret the identity provider signs tokens with (HS256)
    pub secret: String,
    /// Allowed clock skew when checking `exp`, in seconds
    #[serde(default = "default_jwt_leeway")]
    pub leeway_seconds: u64,
}

/// Join link configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// Public base URL links are resolved against
    #[serde(default)]
    pub base_url: Option<String>,
    /// Lifetime of email invitations
    #[serde(default = "default_invitation_ttl_hours")]
    pub invitation_ttl_hours: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "padel-matches".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_jwt_leeway() -> u64 {
    30
}

fn default_invitation_ttl_hours() -> i64 {
    168 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, map, ...)
    ///
    /// # Errors
    /// Returns an error if required variables are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|s| {
                    s.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, s.clone()))
                })
                .transpose()
        };
        let number = |key: &'static str, default: u32| -> Result<u32, ConfigError> {
            parsed(key)?
                .map_or(Ok(default), |v| {
                    u32::try_from(v).map_err(|_| ConfigError::InvalidValue(key, v.to_string()))
                })
        };

        let storage = match lookup("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(s) => match s.trim().to_lowercase().as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let database = match (storage, lookup("DATABASE_URL")) {
            (StorageBackend::Postgres, None) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (_, None) => None,
            (_, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: number("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: number("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
                auto_migrate: lookup("DATABASE_AUTO_MIGRATE")
                    .is_some_and(|s| matches!(s.trim(), "1" | "true" | "yes")),
            }),
        };

        let port = parsed("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: u16::try_from(port)
                    .map_err(|_| ConfigError::InvalidValue("API_PORT", port.to_string()))?,
            },
            storage,
            database,
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                leeway_seconds: parsed("JWT_LEEWAY_SECONDS")?.unwrap_or_else(default_jwt_leeway),
            },
            links: LinkConfig {
                base_url: lookup("APP_BASE_URL").filter(|s| !s.trim().is_empty()),
                invitation_ttl_hours: parsed("INVITATION_TTL_HOURS")?
                    .map_or(Ok(default_invitation_ttl_hours()), |v| {
                        i64::try_from(v)
                            .map_err(|_| ConfigError::InvalidValue("INVITATION_TTL_HOURS", v.to_string()))
                    })?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: number("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second())?,
                burst: number("RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
