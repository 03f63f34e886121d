//! Backend API client implementation.
//!
//! Plain JSON over HTTP with `reqwest`. The client is cheap to clone
//! (shared `Arc` inner) and holds no domain state.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use petal_core::{EmployeeIdentity, Order, OrderId, OrderStatus, Product, TelegramUser, TelegramUserId};

use crate::GatewayError;
use crate::config::GatewayConfig;

/// How much of an error body to keep for diagnostics.
const BODY_EXCERPT_LEN: usize = 500;

// =============================================================================
// Directory traits
// =============================================================================

// Consumers run a single UI session; futures never cross threads, so the
// auto-captured Send bound is not needed.
#[allow(async_fn_in_trait)]
/// Order lookup and mutation surface consumed by the admin controller.
pub trait OrderDirectory {
    /// Fetch one order by ID.
    async fn fetch_order(&self, id: &OrderId) -> Result<Order, GatewayError>;

    /// List orders, optionally filtered by status.
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, GatewayError>;

    /// Request a status transition. The returned order is informational;
    /// callers refetch before trusting it as the displayed state.
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, GatewayError>;
}

#[allow(async_fn_in_trait)]
/// Employee registry surface consumed by the identity resolver.
pub trait EmployeeDirectory {
    /// Look up the employee record for a Telegram identity.
    ///
    /// `Ok(None)` means the identity is an ordinary customer - an expected
    /// outcome, not an error.
    async fn check_employee_access(
        &self,
        telegram_id: TelegramUserId,
        username: Option<&str>,
    ) -> Result<Option<EmployeeIdentity>, GatewayError>;

    /// Register/refresh a platform identity with the backend.
    ///
    /// Fire-and-forget: failures are logged, never surfaced.
    async fn register_identity(&self, user: &TelegramUser);
}

// =============================================================================
// GatewayClient
// =============================================================================

/// Client for the backend HTTP API.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl GatewayClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built,
    /// since a fallback client would not carry the configured timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(GatewayClientInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config.token_value().map(str::to_string),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the JSON response.
    ///
    /// 404 maps to [`GatewayError::NotFound`]; other non-success statuses
    /// map to [`GatewayError::Api`] with the body excerpt logged.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, GatewayError> {
        let response = self.apply_auth(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            warn!(status = %status, body = %excerpt, "backend returned non-success status");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: excerpt,
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    error = %e,
                    body = %body.chars().take(BODY_EXCERPT_LEN).collect::<String>(),
                    "failed to decode backend response"
                );
                Err(GatewayError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product catalog.
    ///
    /// Filtering (bouquet vs. ingredient, stock) is the storefront's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, GatewayError> {
        let url = self.endpoint("products")?;
        let products: Vec<Product> = self
            .execute(self.inner.client.get(url), "catalog")
            .await?;
        debug!(count = products.len(), "fetched catalog");
        Ok(products)
    }
}

impl OrderDirectory for GatewayClient {
    /// Fetch one order by ID. 404 maps to [`GatewayError::NotFound`].
    #[instrument(skip(self), fields(order_id = %id))]
    async fn fetch_order(&self, id: &OrderId) -> Result<Order, GatewayError> {
        let url = self.endpoint(&format!("orders/{id}"))?;
        self.execute(self.inner.client.get(url), &format!("order {id}"))
            .await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, GatewayError> {
        let mut url = self.endpoint("orders")?;
        if let Some(status) = status
            && let Ok(value) = serde_json::to_value(status)
            && let Some(bare) = value.as_str()
        {
            url.query_pairs_mut().append_pair("status", bare);
        }
        self.execute(self.inner.client.get(url), "orders").await
    }

    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, GatewayError> {
        #[derive(Serialize)]
        struct StatusUpdate {
            status: OrderStatus,
        }

        let url = self.endpoint(&format!("orders/{id}/status"))?;
        self.execute(
            self.inner.client.patch(url).json(&StatusUpdate { status }),
            &format!("order {id}"),
        )
        .await
    }
}

impl EmployeeDirectory for GatewayClient {
    /// Look up the employee record for a Telegram identity.
    ///
    /// A 404 from the registry is the normal customer outcome and becomes
    /// `Ok(None)`.
    #[instrument(skip(self), fields(telegram_id = %telegram_id))]
    async fn check_employee_access(
        &self,
        telegram_id: TelegramUserId,
        username: Option<&str>,
    ) -> Result<Option<EmployeeIdentity>, GatewayError> {
        let mut url = self.endpoint("employees/access")?;
        url.query_pairs_mut()
            .append_pair("telegram_id", &telegram_id.to_string());
        if let Some(username) = username {
            url.query_pairs_mut().append_pair("username", username);
        }

        match self
            .execute::<EmployeeIdentity>(self.inner.client.get(url), "employee record")
            .await
        {
            Ok(identity) => Ok(Some(identity)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, user), fields(telegram_id = %user.id))]
    async fn register_identity(&self, user: &TelegramUser) {
        let url = match self.endpoint("auth/telegram") {
            Ok(url) => url,
            Err(err) => {
                warn!(error = %err, "skipping identity registration");
                return;
            }
        };

        // Ack-only endpoint: the response body may be empty, so only the
        // status matters.
        let request = self.apply_auth(self.inner.client.post(url).json(user));
        match request.send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(status = %response.status(), "identity registration failed");
            }
            Err(err) => {
                warn!(error = %err, "identity registration failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_client_construction() {
        let config = GatewayConfig::new("https://api.petal.example", Some("t0k3n-a8f2")).unwrap();
        let client = GatewayClient::new(&config).unwrap();
        assert_eq!(client.inner.base_url.as_str(), "https://api.petal.example/");
        assert!(client.inner.api_token.is_some());
    }

    /// Serve one canned HTTP response on a loopback socket.
    async fn serve_once(response: &'static str) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_register_identity_accepts_empty_ack() {
        let addr = serve_once("HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n").await;
        let config = GatewayConfig::new(&format!("http://{addr}"), None).unwrap();
        let client = GatewayClient::new(&config).unwrap();

        // An ack with no body is a success, not a decode failure.
        client.register_identity(&TelegramUser::guest()).await;
    }
}
