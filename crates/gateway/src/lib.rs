//! Petal Gateway - typed client for the backend HTTP API.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - The client owns no state; every call returns a typed projection
//! - Not-found is a semantic result, distinct from transport failure:
//!   missing orders map to [`GatewayError::NotFound`], a missing employee
//!   record maps to `Ok(None)`
//! - After any mutation the caller refetches the affected entity; mutation
//!   responses are never patched into local state as the final word
//!
//! # Example
//!
//! ```rust,ignore
//! use petal_gateway::{GatewayClient, GatewayConfig};
//!
//! let client = GatewayClient::new(&GatewayConfig::from_env()?)?;
//!
//! // Load the catalog
//! let products = client.fetch_catalog().await?;
//!
//! // Move an order along its lifecycle, then refetch
//! client.update_order_status(&order_id, OrderStatus::Processing).await?;
//! let order = client.fetch_order(&order_id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod config;
pub mod resolver;

pub use client::{EmployeeDirectory, GatewayClient, OrderDirectory};
pub use config::{ConfigError, GatewayConfig};
pub use resolver::{
    IdentitySource, PlatformContext, ResolverHandle, SessionIdentity, resolve_identity,
};

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path did not join into a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend returned a non-success status.
    #[error("API error: HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Body excerpt for diagnostics.
        message: String,
    },
}

impl GatewayError {
    /// Whether this error is the not-found semantic result.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::NotFound("order ord-1".to_string());
        assert_eq!(err.to_string(), "Not found: order ord-1");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_api_error_display() {
        let err = GatewayError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: HTTP 500: boom");
        assert!(!err.is_not_found());
    }
}
