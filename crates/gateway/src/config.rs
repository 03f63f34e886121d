//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PETAL_API_BASE_URL` - Base URL of the backend API
//!
//! ## Optional
//! - `PETAL_API_TOKEN` - Bearer token for authenticated endpoints
//! - `PETAL_API_TIMEOUT_SECS` - Request timeout in seconds (default: 15)

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Backend API client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend API.
    pub base_url: Url,
    /// Bearer token for authenticated endpoints (admin operations).
    pub api_token: Option<SecretString>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("PETAL_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PETAL_API_BASE_URL".to_string(), e.to_string())
            })?;

        let api_token = match get_optional_env("PETAL_API_TOKEN") {
            Some(value) => {
                validate_secret_strength(&value, "PETAL_API_TOKEN")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        let timeout_secs = match get_optional_env("PETAL_API_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("PETAL_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_token,
            timeout_secs,
        })
    }

    /// Build a config directly, for tests and embedding hosts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn new(base_url: &str, api_token: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: base_url.parse::<Url>().map_err(|e| {
                ConfigError::InvalidEnvVar("base_url".to_string(), e.to_string())
            })?,
            api_token: api_token.map(SecretString::from),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Expose the bearer token value, if configured.
    #[must_use]
    pub fn token_value(&self) -> Option<&str> {
        self.api_token.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
