//! Order projection and the order status state machine.
//!
//! Orders are server-owned: the client holds a read-only projection and
//! refreshes it by full reload after any mutation. The status graph is a
//! single-direction chain with cancellation reachable from every
//! non-terminal state:
//!
//! ```text
//! new        -> processing | cancelled
//! processing -> shipping   | cancelled
//! shipping   -> done       | cancelled
//! done       -> (terminal)
//! cancelled  -> (terminal)
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, TelegramUserId};
use super::price::Price;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just placed, not yet picked up by staff.
    #[default]
    New,
    /// Being assembled.
    Processing,
    /// Handed to the courier.
    Shipping,
    /// Delivered. Terminal.
    Done,
    /// Cancelled by staff or customer. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Whether a transition from `self` to `target` is legal.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match self {
            Self::New => matches!(target, Self::Processing | Self::Cancelled),
            Self::Processing => matches!(target, Self::Shipping | Self::Cancelled),
            Self::Shipping => matches!(target, Self::Done | Self::Cancelled),
            Self::Done | Self::Cancelled => false,
        }
    }

    /// The statuses reachable from `self` in one transition.
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Shipping, Self::Cancelled],
            Self::Shipping => &[Self::Done, Self::Cancelled],
            Self::Done | Self::Cancelled => &[],
        }
    }

    /// All status values, in lifecycle order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::New,
            Self::Processing,
            Self::Shipping,
            Self::Done,
            Self::Cancelled,
        ]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipping => write!(f, "Shipping"),
            Self::Done => write!(f, "Done"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "processing" => Ok(Self::Processing),
            "shipping" => Ok(Self::Shipping),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name as captured at order time.
    pub name: String,
    /// Unit price as captured at order time.
    pub price: Price,
    /// Units ordered.
    pub quantity: u32,
    /// Product image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Customer contact details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Customer name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery address, if delivery was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One entry in an order's status history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Status the order moved to.
    pub status: OrderStatus,
    /// When the transition was recorded server-side.
    pub changed_at: DateTime<Utc>,
}

/// An order as served by the backend.
///
/// `total` is computed server-side from the lines; the client never
/// mutates it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned identifier.
    pub id: OrderId,
    /// Ordered line items.
    pub items: Vec<OrderLine>,
    /// Server-computed total (sum of `price * quantity` over all lines).
    pub total: Decimal,
    /// Customer contact details.
    pub contact: ContactInfo,
    /// Telegram user who placed the order, if it was placed in-app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<TelegramUserId>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Status transition log, oldest first.
    #[serde(default)]
    pub history: Vec<StatusChange>,
}
