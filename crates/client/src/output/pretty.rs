//! Pretty output formatting.

use pizzadash_core::auth::UserRecord;
use pizzadash_core::orders::{DashboardStats, OrderStatus, PizzaOrder, StatusCounts};

/// Format a user for display.
pub fn format_user(user: &UserRecord) -> String {
    let mut output = format!("{}\n  ID: {}", user.display_name(), user.id);
    if let Some(email) = &user.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    if let Some(image) = &user.image {
        output.push_str(&format!("\n  Avatar: {}", image));
    }
    output
}

/// Format the dashboard home for display.
pub fn format_dashboard(user: &UserRecord, stats: &DashboardStats) -> String {
    let mut output = format!("Welcome back, {}!\n", user.display_name());
    output.push_str(&"-".repeat(40));
    output.push_str(&format!("\n  Total Orders:    {}", stats.total_orders));
    output.push_str(&format!("\n  In Progress:     {}", stats.in_progress));
    output.push_str(&format!(
        "\n  Delivered:       {}",
        stats.counts.get(OrderStatus::Delivered)
    ));
    output.push_str(&format!("\n  Revenue (est.):  ${}.00", stats.revenue_usd));
    output
}

/// Format per-status counts, in status order.
pub fn format_counts(counts: &StatusCounts) -> String {
    let mut output = String::from("ORDERS BY STATUS\n");
    output.push_str(&"-".repeat(40));
    for status in OrderStatus::ALL {
        output.push_str(&format!("\n  {:<18}{}", status.label(), counts.get(status)));
    }
    output
}

/// Format orders as a table.
pub fn format_orders(orders: &[&PizzaOrder]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }
    let mut output = format!("ORDERS ({})\n", orders.len());
    output.push_str(&format!(
        "{:<9} {:<20} {:<14} {:>3}  {:<16}  {}\n",
        "ID", "Customer", "Pizza", "Qty", "Date", "Status"
    ));
    output.push_str(&"-".repeat(80));
    for order in orders {
        output.push_str(&format!(
            "\n{:<9} {:<20} {:<14} {:>3}  {:<16}  {}",
            order.order_id,
            order.customer_name,
            order.pizza_type,
            order.quantity,
            order.order_date.format("%Y-%m-%d %H:%M"),
            order.status.label()
        ));
    }
    output
}

/// Format configuration entries as aligned `key: value` lines.
pub fn format_config(entries: &[(&str, String)]) -> String {
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the authentication error page.
pub fn format_auth_error(message: &str) -> String {
    format!("Authentication Error\n  {}\nRun `pizzadash login` to try again.", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzadash_core::orders::sample_orders;

    fn user() -> UserRecord {
        UserRecord {
            id: "sub-1".to_string(),
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_format_user_skips_missing_fields() {
        assert_eq!(format_user(&user()), "Ana\n  ID: sub-1\n  Email: ana@example.com");
    }

    #[test]
    fn test_format_orders_empty() {
        assert_eq!(format_orders(&[]), "No orders found.");
    }

    #[test]
    fn test_format_orders_lists_each_order() {
        let orders = sample_orders();
        let refs: Vec<&PizzaOrder> = orders.iter().take(2).collect();
        let output = format_orders(&refs);

        assert!(output.starts_with("ORDERS (2)"));
        assert!(output.contains(&orders[0].order_id));
        assert!(output.contains(&orders[1].customer_name));
    }

    #[test]
    fn test_format_dashboard_shows_revenue() {
        let orders = sample_orders();
        let stats = DashboardStats::from_orders(&orders);
        let output = format_dashboard(&user(), &stats);

        assert!(output.starts_with("Welcome back, Ana!"));
        assert!(output.contains(&format!("${}.00", stats.revenue_usd)));
    }

    #[test]
    fn test_format_auth_error() {
        let output = format_auth_error("You do not have permission to sign in.");
        assert!(output.starts_with("Authentication Error\n"));
        assert!(output.contains("You do not have permission to sign in."));
    }

    #[test]
    fn test_format_dashboard_revenue_has_cents() {
        let stats = DashboardStats::from_orders(&[]);
        let output = format_dashboard(&user(), &stats);

        assert!(output.ends_with("Revenue (est.):  $0.00"));
    }

    #[test]
    fn test_format_counts_lists_every_status() {
        let output = format_counts(&StatusCounts::from_orders(&sample_orders()));
        for status in OrderStatus::ALL {
            assert!(output.contains(status.label()));
        }
    }

    #[test]
    fn test_format_config_aligns_keys() {
        let entries = vec![("A", "1".to_string()), ("LONGER", "2".to_string())];
        assert_eq!(format_config(&entries), "A       1\nLONGER  2");
    }
}
