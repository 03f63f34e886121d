//! Order lifecycle controller.
//!
//! Drives one order through the status graph defined on
//! [`OrderStatus`]. The server-computed status and history are
//! authoritative: a successful transition is followed by a full refetch
//! of the order, and a failed one leaves the displayed order exactly as
//! it was before the request. One status update may be in flight per
//! order at a time; the busy flag gates re-entrancy while the triggering
//! controls are disabled. Destructive transitions (to `Cancelled`) must
//! be armed by an explicit confirmation step before the request is sent.

use thiserror::Error;
use tracing::{info, warn};

use petal_core::{Order, OrderId, OrderStatus};
use petal_gateway::{GatewayError, OrderDirectory};

/// Dismissable notice raised when a transition does not go through.
///
/// The first four variants are rejections - the request was never sent.
/// `UpdateFailed` means the request was sent and failed; the displayed
/// order is unchanged and the attempt is not retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionNotice {
    /// The order is in a terminal status.
    #[error("order is already {status}; no further transitions")]
    TerminalStatus {
        /// The terminal status.
        status: OrderStatus,
    },

    /// The target status is not reachable from the current one.
    #[error("cannot move order from {from} to {to}")]
    IllegalTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Another status update is in flight for this order.
    #[error("a status update is already in flight")]
    UpdateInFlight,

    /// Cancellation was requested without the confirmation step.
    #[error("cancelling an order requires confirmation")]
    ConfirmationRequired,

    /// The backend rejected or failed the update.
    #[error("status update failed: {message}")]
    UpdateFailed {
        /// Failure description for display.
        message: String,
    },
}

impl TransitionNotice {
    /// Whether a request actually reached the backend.
    #[must_use]
    pub const fn request_sent(&self) -> bool {
        matches!(self, Self::UpdateFailed { .. })
    }
}

/// Controller for a single order's lifecycle.
#[derive(Debug)]
pub struct OrderController<D: OrderDirectory> {
    directory: D,
    order: Order,
    busy: bool,
    cancellation_armed: bool,
}

impl<D: OrderDirectory> OrderController<D> {
    /// Wrap an already-fetched order.
    #[must_use]
    pub const fn new(directory: D, order: Order) -> Self {
        Self {
            directory,
            order,
            busy: false,
            cancellation_armed: false,
        }
    }

    /// Fetch the order and build a controller for it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error as-is; a 404 surfaces as the "order not
    /// found" UI state, not an exception.
    pub async fn load(directory: D, id: &OrderId) -> Result<Self, GatewayError> {
        let order = directory.fetch_order(id).await?;
        Ok(Self::new(directory, order))
    }

    /// The displayed order.
    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    /// Whether a status update is in flight (triggering controls are
    /// disabled for the duration).
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Statuses reachable from the current one. Empty for terminal
    /// orders, which expose only a dismiss action.
    #[must_use]
    pub const fn available_actions(&self) -> &'static [OrderStatus] {
        self.order.status.successors()
    }

    /// Arm the confirmation step for a cancellation.
    pub fn begin_cancellation(&mut self) {
        self.cancellation_armed = true;
    }

    /// Disarm a pending cancellation confirmation.
    pub fn abort_cancellation(&mut self) {
        self.cancellation_armed = false;
    }

    /// Request a transition to `to`.
    ///
    /// On success the order is replaced by a full refetch. On any failure
    /// the displayed order is unchanged and a dismissable notice is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionNotice`] describing the rejection or failure.
    pub async fn request_transition(&mut self, to: OrderStatus) -> Result<(), TransitionNotice> {
        let from = self.order.status;

        if from.is_terminal() {
            return Err(TransitionNotice::TerminalStatus { status: from });
        }
        if !from.can_transition_to(to) {
            return Err(TransitionNotice::IllegalTransition { from, to });
        }
        if self.busy {
            return Err(TransitionNotice::UpdateInFlight);
        }
        if to == OrderStatus::Cancelled && !self.cancellation_armed {
            return Err(TransitionNotice::ConfirmationRequired);
        }

        self.busy = true;
        let result = self.directory.update_order_status(&self.order.id, to).await;
        self.busy = false;
        self.cancellation_armed = false;

        let updated = match result {
            Ok(order) => order,
            Err(err) => {
                warn!(order_id = %self.order.id, %from, %to, error = %err, "status update failed");
                return Err(TransitionNotice::UpdateFailed {
                    message: err.to_string(),
                });
            }
        };

        info!(order_id = %self.order.id, %from, %to, "order status updated");

        // The mutation succeeded; the refetched order (status, history,
        // total) is the source of truth. If the refetch itself fails,
        // fall back to the mutation response rather than staying stale.
        match self.directory.fetch_order(&self.order.id).await {
            Ok(order) => self.order = order,
            Err(err) => {
                warn!(order_id = %self.order.id, error = %err, "refetch after update failed");
                self.order = updated;
            }
        }

        Ok(())
    }

    /// Refetch the order from the backend.
    ///
    /// # Errors
    ///
    /// Returns the gateway error as-is; the displayed order is unchanged
    /// on failure.
    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        self.order = self.directory.fetch_order(&self.order.id).await?;
        Ok(())
    }
}
