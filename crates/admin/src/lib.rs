//! Petal Admin - order lifecycle and dashboard state for the warehouse
//! mini-app.
//!
//! The admin surface is server-authoritative: every mutation goes through
//! the gateway and the displayed order is replaced only by a full refetch,
//! never by an optimistic local patch.
//!
//! # Modules
//!
//! - [`orders`] - The order lifecycle controller
//! - [`dashboard`] - Aggregation over order lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod orders;

pub use dashboard::DashboardSummary;
pub use orders::{OrderController, TransitionNotice};
