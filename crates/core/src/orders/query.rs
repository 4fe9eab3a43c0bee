use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{OrderError, OrderStatus, PizzaOrder};

/// Tabs on the orders page. Every tab except `All` pins one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderTab {
    #[default]
    All,
    Pending,
    Preparing,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderTab {
    pub fn status(self) -> Option<OrderStatus> {
        match self {
            Self::All => None,
            Self::Pending => Some(OrderStatus::Pending),
            Self::Preparing => Some(OrderStatus::Preparing),
            Self::Delivering => Some(OrderStatus::OutForDelivery),
            Self::Completed => Some(OrderStatus::Delivered),
            Self::Cancelled => Some(OrderStatus::Cancelled),
        }
    }
}

impl std::str::FromStr for OrderTab {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "delivering" => Ok(Self::Delivering),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(OrderError::UnknownTab(s.to_string())),
        }
    }
}

/// Columns the orders table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    OrderId,
    CustomerName,
    OrderDate,
}

impl std::str::FromStr for SortKey {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "orderid" | "id" => Ok(Self::OrderId),
            "customername" | "customer" => Ok(Self::CustomerName),
            "orderdate" | "date" => Ok(Self::OrderDate),
            _ => Err(OrderError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Filter, search and sort settings of the orders page.
///
/// The default matches the page's initial state: all tabs, all statuses,
/// sorted by order id ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    pub tab: OrderTab,
    pub search: String,
    /// `None` means "All Statuses".
    pub status: Option<OrderStatus>,
    /// `None` keeps the source order.
    pub sort_by: Option<SortKey>,
    pub direction: SortDirection,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            tab: OrderTab::All,
            search: String::new(),
            status: None,
            sort_by: Some(SortKey::OrderId),
            direction: SortDirection::Asc,
        }
    }
}

/// Case-insensitive substring match on id, customer or pizza type.
pub fn matches_search(order: &PizzaOrder, search: &str) -> bool {
    let needle = search.to_lowercase();
    order.order_id.to_lowercase().contains(&needle)
        || order.customer_name.to_lowercase().contains(&needle)
        || order.pizza_type.to_lowercase().contains(&needle)
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Compare two orders on a single column, ascending.
pub fn compare_orders(a: &PizzaOrder, b: &PizzaOrder, key: SortKey) -> Ordering {
    match key {
        SortKey::OrderId => compare_text(&a.order_id, &b.order_id),
        SortKey::CustomerName => compare_text(&a.customer_name, &b.customer_name),
        SortKey::OrderDate => a.order_date.cmp(&b.order_date),
    }
}

/// Apply tab, status filter, search and sort. The input is left untouched.
pub fn apply_query<'a>(orders: &'a [PizzaOrder], query: &OrderQuery) -> Vec<&'a PizzaOrder> {
    let tab_status = query.tab.status();

    let mut result: Vec<&PizzaOrder> = orders
        .iter()
        .filter(|o| tab_status.is_none_or(|s| o.status == s))
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .filter(|o| matches_search(o, &query.search))
        .collect();

    if let Some(key) = query.sort_by {
        result.sort_by(|a, b| {
            let ordering = compare_orders(a, b, key);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    result
}
