use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// Price per pizza used for the revenue estimate, in whole dollars.
pub const UNIT_PRICE_USD: u32 = 15;

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Label as shown in the orders table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Pending or preparing: the kitchen still has work to do.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Pending | Self::Preparing)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    /// Accepts the label in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "outfordelivery" | "delivering" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(OrderError::UnknownStatus(s.to_string())),
        }
    }
}

/// A single pizza order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaOrder {
    pub order_id: String,
    pub customer_name: String,
    pub pizza_type: String,
    pub quantity: u32,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

impl PizzaOrder {
    /// Estimated revenue for this order.
    pub fn revenue_usd(&self) -> u32 {
        self.quantity * UNIT_PRICE_USD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str_variants() {
        assert_eq!("Out for Delivery".parse::<OrderStatus>().unwrap(), OrderStatus::OutForDelivery);
        assert_eq!("out-for-delivery".parse::<OrderStatus>().unwrap(), OrderStatus::OutForDelivery);
        assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("baking".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_serializes_camel_case_with_labels() {
        let order = PizzaOrder {
            order_id: "ORD-001".into(),
            customer_name: "Ada".into(),
            pizza_type: "Margherita".into(),
            quantity: 2,
            order_date: NaiveDateTime::parse_from_str("2024-06-01T18:30:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            status: OrderStatus::OutForDelivery,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "ORD-001");
        assert_eq!(json["status"], "Out for Delivery");
        assert_eq!(json["orderDate"], "2024-06-01T18:30:00");
        assert_eq!(order.revenue_usd(), 30);
    }
}
