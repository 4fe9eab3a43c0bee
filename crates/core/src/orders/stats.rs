use serde::Serialize;

use super::{OrderStatus, PizzaOrder};

/// Number of orders per status, always over the full list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub preparing: usize,
    pub out_for_delivery: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn from_orders(orders: &[PizzaOrder]) -> Self {
        orders.iter().fold(Self::default(), |mut counts, order| {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Preparing => counts.preparing += 1,
                OrderStatus::OutForDelivery => counts.out_for_delivery += 1,
                OrderStatus::Delivered => counts.delivered += 1,
                OrderStatus::Cancelled => counts.cancelled += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::OutForDelivery => self.out_for_delivery,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    pub fn in_progress(&self) -> usize {
        self.pending + self.preparing
    }
}

/// Summary cards shown on the dashboard home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    pub in_progress: usize,
    pub counts: StatusCounts,
    /// Estimated revenue at a flat price per pizza.
    pub revenue_usd: u64,
}

impl DashboardStats {
    pub fn from_orders(orders: &[PizzaOrder]) -> Self {
        let counts = StatusCounts::from_orders(orders);
        Self {
            total_orders: orders.len(),
            in_progress: counts.in_progress(),
            counts,
            revenue_usd: orders.iter().map(|o| u64::from(o.revenue_usd())).sum(),
        }
    }
}
