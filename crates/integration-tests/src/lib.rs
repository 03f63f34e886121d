//! Integration tests for Petal.
//!
//! # Test Categories
//!
//! - `storefront_state` - Cart/favorites persistence across sessions
//! - `admin_lifecycle` - Order lifecycle driven end to end over a fake
//!   order directory
//! - `session_bootstrap` - Identity resolution gating the two surfaces
//!
//! The crate root holds the shared fixtures: product/order builders and
//! in-memory fakes for the gateway traits.

use std::cell::{Cell, RefCell};
use std::sync::Once;

use rust_decimal::Decimal;

use petal_core::{
    Category, ContactInfo, EmployeeIdentity, Order, OrderId, OrderStatus, Price, Product,
    ProductId, TelegramUser, TelegramUserId,
};
use petal_gateway::{EmployeeDirectory, GatewayError, OrderDirectory, PlatformContext};

/// Install the tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a bouquet product with a raw price.
#[must_use]
pub fn bouquet(id: &str, raw_price: i64, in_stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Bouquet {id}"),
        price: Price::from_raw(Decimal::from(raw_price)),
        image: None,
        category: Category::Bouquet,
        is_hit: false,
        is_new: false,
        in_stock,
    }
}

/// Build an order in the given status.
#[must_use]
pub fn order(id: &str, status: OrderStatus, total: i64) -> Order {
    Order {
        id: OrderId::new(id),
        items: vec![],
        total: Decimal::from(total),
        contact: ContactInfo {
            name: "Anna".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            address: Some("Nevsky 1".to_string()),
            comment: None,
        },
        user_id: None,
        status,
        history: vec![],
    }
}

/// Fake backend holding one order, with scriptable update failure.
#[derive(Debug)]
pub struct FakeBackend {
    /// Server-side order state.
    pub state: RefCell<Order>,
    /// Whether status updates fail with an API error.
    pub fail_updates: Cell<bool>,
    /// Number of update requests received.
    pub update_calls: Cell<u32>,
    /// Employee record served by the registry, if any.
    pub employee: Option<EmployeeIdentity>,
}

impl FakeBackend {
    /// Backend with an order in `status` and no employee registry entry.
    #[must_use]
    pub fn with_order(status: OrderStatus) -> Self {
        Self {
            state: RefCell::new(order("ord-1", status, 5_000)),
            fail_updates: Cell::new(false),
            update_calls: Cell::new(0),
            employee: None,
        }
    }
}

impl OrderDirectory for &FakeBackend {
    async fn fetch_order(&self, id: &OrderId) -> Result<Order, GatewayError> {
        let state = self.state.borrow();
        if &state.id == id {
            Ok(state.clone())
        } else {
            Err(GatewayError::NotFound(format!("order {id}")))
        }
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, GatewayError> {
        let state = self.state.borrow();
        match status {
            Some(wanted) if state.status != wanted => Ok(vec![]),
            _ => Ok(vec![state.clone()]),
        }
    }

    async fn update_order_status(
        &self,
        _id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, GatewayError> {
        self.update_calls.set(self.update_calls.get() + 1);
        if self.fail_updates.get() {
            return Err(GatewayError::Api {
                status: 500,
                message: "update rejected".to_string(),
            });
        }
        let mut state = self.state.borrow_mut();
        state.status = status;
        state.history.push(petal_core::StatusChange {
            status,
            changed_at: chrono::Utc::now(),
        });
        Ok(state.clone())
    }
}

impl EmployeeDirectory for &FakeBackend {
    async fn check_employee_access(
        &self,
        _telegram_id: TelegramUserId,
        _username: Option<&str>,
    ) -> Result<Option<EmployeeIdentity>, GatewayError> {
        Ok(self.employee.clone())
    }

    async fn register_identity(&self, _user: &TelegramUser) {}
}

/// Fake host environment.
#[derive(Debug)]
pub struct FakeHost {
    /// Whether Telegram init data is present.
    pub init_data: bool,
    /// The injected user object, if any.
    pub user: Option<TelegramUser>,
}

impl PlatformContext for FakeHost {
    fn init_data_present(&self) -> bool {
        self.init_data
    }

    fn current_user(&self) -> Option<TelegramUser> {
        self.user.clone()
    }
}
