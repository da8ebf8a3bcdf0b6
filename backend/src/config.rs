//! Server settings read from the process environment.

use std::time::Duration;

pub const DEFAULT_SECRET: &str = "monty-dev-secret-change-in-production";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:5174"];
/// Ten years.
pub const MAX_TOKEN_TTL_MINUTES: u64 = 10 * 365 * 24 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
}

// The secret stays out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("cors_origins", &self.cors_origins)
            .field("seed_demo_data", &self.seed_demo_data)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            jwt_secret: DEFAULT_SECRET.to_string(),
            token_ttl: crate::auth::token::DEFAULT_TTL,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            seed_demo_data: true,
        }
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

fn flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. Unset variables keep
    /// their defaults; set but unparsable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = parsed(&lookup, "PORT")? {
            config.port = port;
        }

        match lookup("JWT_SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(secret) => config.jwt_secret = secret,
            None => log::warn!("JWT_SECRET_KEY not set; using the development secret"),
        }

        if let Some(minutes) = parsed::<u64>(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES")? {
            config.token_ttl = (1..=MAX_TOKEN_TTL_MINUTES)
                .contains(&minutes)
                .then(|| minutes.checked_mul(60))
                .flatten()
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "ACCESS_TOKEN_EXPIRE_MINUTES",
                    value: minutes.to_string(),
                })?;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if !origins.is_empty() {
                config.cors_origins = origins;
            }
        }

        if let Some(value) = lookup("SEED_DEMO_DATA") {
            config.seed_demo_data = flag(&value).ok_or(ConfigError::InvalidValue {
                name: "SEED_DEMO_DATA",
                value,
            })?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
