//! Static order list with the orders page's filter, search and sort.

mod error;
mod mock_data;
mod query;
mod stats;
mod types;

pub use error::OrderError;
pub use mock_data::sample_orders;
pub use query::{
    apply_query, compare_orders, matches_search, OrderQuery, OrderTab, SortDirection, SortKey,
};
pub use stats::{DashboardStats, StatusCounts};
pub use types::{OrderStatus, PizzaOrder, UNIT_PRICE_USD};
