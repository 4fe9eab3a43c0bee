//! Orders CLI commands.

use clap::{Parser, Subcommand};
use pizzadash_core::orders::{OrderQuery, OrderStatus, OrderTab, SortDirection, SortKey};

/// Order commands.
#[derive(Debug, Parser)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub action: OrdersAction,
}

/// Available order actions.
#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List orders with tab, search, status filter and sort.
    List(ListArgs),
    /// Per-status counts over all orders.
    Counts,
}

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
    /// Tab: all, pending, preparing, delivering, completed, cancelled.
    #[arg(long, default_value = "all")]
    pub tab: OrderTab,

    /// Match order id, customer or pizza type.
    #[arg(long, short, default_value = "")]
    pub search: String,

    /// Only this status (e.g. "Out for Delivery").
    #[arg(long)]
    pub status: Option<OrderStatus>,

    /// Sort column: orderId, customerName or orderDate.
    #[arg(long, default_value = "orderId")]
    pub sort: SortKey,

    /// Keep the source order instead of sorting.
    #[arg(long, conflicts_with_all = ["sort", "desc"])]
    pub unsorted: bool,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

impl ListArgs {
    pub fn to_query(&self) -> OrderQuery {
        OrderQuery {
            tab: self.tab,
            search: self.search.clone(),
            status: self.status,
            sort_by: (!self.unsorted).then_some(self.sort),
            direction: if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        }
    }
}
