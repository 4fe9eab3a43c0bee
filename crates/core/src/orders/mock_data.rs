//! The fixed order list shown on the dashboard.
//!
//! These are literals, not a data source: nothing creates, updates or
//! deletes orders.

use chrono::{NaiveDate, NaiveDateTime};

use super::{OrderStatus, PizzaOrder};

const ORDERS: &[(&str, &str, &str, u32, (i32, u32, u32, u32, u32), OrderStatus)] = &[
    ("ORD-001", "John Smith", "Margherita", 2, (2024, 5, 15, 18, 30), OrderStatus::Delivered),
    ("ORD-002", "Emma Johnson", "Pepperoni", 1, (2024, 5, 15, 19, 15), OrderStatus::Delivered),
    ("ORD-003", "Michael Brown", "Hawaiian", 3, (2024, 5, 16, 12, 45), OrderStatus::Cancelled),
    ("ORD-004", "Sophia Davis", "Veggie Supreme", 1, (2024, 5, 16, 20, 0), OrderStatus::Delivered),
    ("ORD-005", "William Wilson", "BBQ Chicken", 2, (2024, 5, 17, 13, 20), OrderStatus::OutForDelivery),
    ("ORD-006", "Olivia Martinez", "Meat Lovers", 4, (2024, 5, 17, 18, 5), OrderStatus::Preparing),
    ("ORD-007", "James Taylor", "Four Cheese", 1, (2024, 5, 17, 18, 40), OrderStatus::Pending),
    ("ORD-008", "Ava Anderson", "Margherita", 2, (2024, 5, 18, 11, 55), OrderStatus::Pending),
    ("ORD-009", "Benjamin Thomas", "Buffalo Chicken", 1, (2024, 5, 18, 12, 30), OrderStatus::Preparing),
    ("ORD-010", "Isabella Jackson", "Pepperoni", 3, (2024, 5, 18, 17, 10), OrderStatus::OutForDelivery),
    ("ORD-011", "Lucas White", "Mushroom Truffle", 1, (2024, 5, 18, 19, 25), OrderStatus::Delivered),
    ("ORD-012", "Mia Harris", "Hawaiian", 2, (2024, 5, 19, 13, 0), OrderStatus::Cancelled),
    ("ORD-013", "Henry Martin", "Diavola", 2, (2024, 5, 19, 18, 45), OrderStatus::Pending),
    ("ORD-014", "Charlotte Thompson", "Veggie Supreme", 1, (2024, 5, 19, 20, 15), OrderStatus::Preparing),
    ("ORD-015", "Alexander Garcia", "Meat Lovers", 5, (2024, 5, 20, 12, 10), OrderStatus::Delivered),
];

fn timestamp((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// The orders shown on the dashboard.
///
/// # Example
///
/// ```
/// use pizzadash_core::orders::sample_orders;
///
/// let orders = sample_orders();
/// assert_eq!(orders.len(), 15);
/// assert_eq!(orders[0].order_id, "ORD-001");
/// ```
pub fn sample_orders() -> Vec<PizzaOrder> {
    ORDERS
        .iter()
        .map(|&(id, customer, pizza, quantity, date, status)| PizzaOrder {
            order_id: id.to_string(),
            customer_name: customer.to_string(),
            pizza_type: pizza.to_string(),
            quantity,
            order_date: timestamp(date),
            status,
        })
        .collect()
}
