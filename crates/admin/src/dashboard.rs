//! Dashboard aggregation over order lists.
//!
//! Pure functions of a fetched order list; the list itself comes from
//! `list_orders` on the gateway and is refreshed by full reload.

use rust_decimal::Decimal;

use petal_core::{Order, OrderStatus};

/// Aggregate view of the order book for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Total number of orders in the list.
    pub total_orders: usize,
    /// Order counts per status, in lifecycle order.
    pub by_status: Vec<(OrderStatus, usize)>,
    /// Orders still moving through the lifecycle (non-terminal).
    pub open_orders: usize,
    /// Revenue: sum of server-computed totals over non-cancelled orders.
    pub revenue: Decimal,
}

impl DashboardSummary {
    /// Aggregate a fetched order list.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let by_status = OrderStatus::all()
            .into_iter()
            .map(|status| {
                let count = orders.iter().filter(|o| o.status == status).count();
                (status, count)
            })
            .collect();

        let open_orders = orders.iter().filter(|o| !o.status.is_terminal()).count();

        let revenue = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total)
            .sum();

        Self {
            total_orders: orders.len(),
            by_status,
            open_orders,
            revenue,
        }
    }

    /// Count for one status.
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use petal_core::{ContactInfo, OrderId};

    fn order(id: &str, status: OrderStatus, total: i64) -> Order {
        Order {
            id: OrderId::new(id),
            items: vec![],
            total: Decimal::from(total),
            contact: ContactInfo {
                name: "Anna".to_string(),
                phone: "+7 900 000-00-00".to_string(),
                address: None,
                comment: None,
            },
            user_id: None,
            status,
            history: vec![],
        }
    }

    #[test]
    fn test_empty_list() {
        let summary = DashboardSummary::from_orders(&[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.open_orders, 0);
        assert_eq!(summary.revenue, Decimal::ZERO);
    }

    #[test]
    fn test_counts_per_status() {
        let orders = vec![
            order("o-1", OrderStatus::New, 1_000),
            order("o-2", OrderStatus::New, 2_000),
            order("o-3", OrderStatus::Shipping, 3_000),
            order("o-4", OrderStatus::Done, 4_000),
            order("o-5", OrderStatus::Cancelled, 5_000),
        ];
        let summary = DashboardSummary::from_orders(&orders);

        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.count(OrderStatus::New), 2);
        assert_eq!(summary.count(OrderStatus::Processing), 0);
        assert_eq!(summary.count(OrderStatus::Shipping), 1);
        assert_eq!(summary.open_orders, 3);
    }

    #[test]
    fn test_revenue_excludes_cancelled() {
        let orders = vec![
            order("o-1", OrderStatus::Done, 4_000),
            order("o-2", OrderStatus::Processing, 1_500),
            order("o-3", OrderStatus::Cancelled, 9_999),
        ];
        let summary = DashboardSummary::from_orders(&orders);
        assert_eq!(summary.revenue, Decimal::from(5_500));
    }
}
