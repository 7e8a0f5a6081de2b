use std::cmp::Ordering;
use std::collections::HashMap;

use contracts::domain::client::Client;
use contracts::domain::order::Order;
use contracts::domain::product::{Product, ProductId};
use contracts::reports::{ClientRanking, ProductRanking, SalesSummary, TimeSeriesPoint};

/// Ranking depth used by the sales summary
pub const DEFAULT_TOP_N: usize = 5;

/// Rank clients by how many orders they placed, descending. The sort is
/// stable, so clients tied on order count keep their input order. Returns
/// at most `top_n` entries.
pub fn top_clients_by_order_count(clients: &[Client], top_n: usize) -> Vec<ClientRanking> {
    let mut rankings: Vec<ClientRanking> = clients
        .iter()
        .map(|client| ClientRanking {
            client: client.clone(),
            order_count: client.order_count(),
            total_spent: client.total_spent(),
        })
        .collect();

    rankings.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    rankings.truncate(top_n);
    rankings
}

/// Rank products by revenue across all order lines, descending. Per
/// product the units sold and revenue are accumulated; ties keep the
/// order of first encounter in the order scan.
pub fn top_products_by_revenue(orders: &[Order], top_n: usize) -> Vec<ProductRanking> {
    let mut slot_by_product: HashMap<ProductId, usize> = HashMap::new();
    let mut rankings: Vec<ProductRanking> = Vec::new();

    for order in orders {
        for item in order.items() {
            let product: &Product = item.product();
            let slot = *slot_by_product.entry(product.id).or_insert_with(|| {
                rankings.push(ProductRanking {
                    product: product.clone(),
                    quantity_sold: 0,
                    revenue: 0.0,
                });
                rankings.len() - 1
            });
            rankings[slot].quantity_sold += u64::from(item.quantity());
            rankings[slot].revenue += item.total_price();
        }
    }

    rankings.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rankings.truncate(top_n);
    rankings
}

/// Group orders into calendar-date buckets (date portion of the stored
/// timestamp) and return them ascending by date.
pub fn orders_time_series(orders: &[Order]) -> Vec<TimeSeriesPoint> {
    let mut buckets: HashMap<String, (usize, f64)> = HashMap::new();
    for order in orders {
        let date = order.order_date.format("%Y-%m-%d").to_string();
        let bucket = buckets.entry(date).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += order.total_amount();
    }

    let dates = sort_dates(buckets.keys().cloned().collect());
    dates
        .into_iter()
        .map(|date| {
            let (order_count, revenue) = buckets[&date];
            TimeSeriesPoint {
                date,
                order_count,
                revenue,
            }
        })
        .collect()
}

/// Recursive three-way partition sort around the middle element.
/// Lexicographic order on "YYYY-MM-DD" strings is chronological order.
fn sort_dates(dates: Vec<String>) -> Vec<String> {
    if dates.len() <= 1 {
        return dates;
    }

    let pivot = dates[dates.len() / 2].clone();
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for date in dates {
        match date.cmp(&pivot) {
            Ordering::Less => less.push(date),
            Ordering::Equal => equal.push(date),
            Ordering::Greater => greater.push(date),
        }
    }

    let mut sorted = sort_dates(less);
    sorted.extend(equal);
    sorted.extend(sort_dates(greater));
    sorted
}

/// Full sales report: headline figures plus the top-5 rankings. Averages
/// are guarded against empty denominators and come back as 0.
pub fn sales_summary(clients: &[Client], products: &[Product], orders: &[Order]) -> SalesSummary {
    let total_orders = orders.len();
    let total_revenue: f64 = orders.iter().map(|o| o.total_amount()).sum();
    let total_clients = clients.len();
    let total_products = products.len();

    let avg_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };
    let avg_orders_per_client = if total_clients > 0 {
        total_orders as f64 / total_clients as f64
    } else {
        0.0
    };

    SalesSummary {
        total_orders,
        total_revenue,
        total_clients,
        total_products,
        avg_order_value,
        avg_orders_per_client,
        top_clients: top_clients_by_order_count(clients, DEFAULT_TOP_N),
        top_products: top_products_by_revenue(orders, DEFAULT_TOP_N),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::client::ClientId;

    fn client(name: &str) -> Client {
        Client::new_for_insert(
            name.into(),
            format!("{}@example.com", name.to_lowercase()),
            "+7-912-345-67-89".into(),
            String::new(),
        )
        .unwrap()
    }

    fn product(name: &str, price: f64) -> Product {
        Product::new_for_insert(name.into(), price, String::new(), String::new()).unwrap()
    }

    fn order_on(client_id: ClientId, date: &str, lines: &[(&Product, u32)]) -> Order {
        let ts = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        let mut order = Order::new_for_insert(client_id, Some(ts));
        for (p, qty) in lines {
            order.add_item((*p).clone(), *qty).unwrap();
        }
        order
    }

    fn attach(client: &mut Client, order: &Order) {
        client.attach_order(order.clone());
    }

    #[test]
    fn top_clients_ranks_by_order_count_not_spend() {
        let lamp = product("Lamp", 100.0);
        let desk = product("Desk", 250.0);
        let tv = product("TV", 2500.0);

        // A: 2 orders totaling 650, B: 1 order totaling 2500, C: none
        let mut a = client("A");
        let mut b = client("B");
        let c = client("C");

        let a1 = order_on(a.id, "2023-01-01", &[(&lamp, 4)]);
        let a2 = order_on(a.id, "2023-01-02", &[(&desk, 1)]);
        let b1 = order_on(b.id, "2023-01-03", &[(&tv, 1)]);
        attach(&mut a, &a1);
        attach(&mut a, &a2);
        attach(&mut b, &b1);

        let clients = vec![a, b, c];
        let top = top_clients_by_order_count(&clients, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].client.name(), "A");
        assert_eq!(top[0].order_count, 2);
        assert_eq!(top[0].total_spent, 650.0);
        assert_eq!(top[1].client.name(), "B");
        assert_eq!(top[1].order_count, 1);
        assert_eq!(top[1].total_spent, 2500.0);
    }

    #[test]
    fn top_clients_is_sorted_and_truncated() {
        let lamp = product("Lamp", 10.0);
        let mut clients = Vec::new();
        for (name, n_orders) in [("A", 1), ("B", 3), ("C", 2), ("D", 3)] {
            let mut c = client(name);
            for day in 1..=n_orders {
                let o = order_on(c.id, &format!("2023-02-0{}", day), &[(&lamp, 1)]);
                attach(&mut c, &o);
            }
            clients.push(c);
        }

        let top = top_clients_by_order_count(&clients, 10);
        assert_eq!(top.len(), 4);
        for pair in top.windows(2) {
            assert!(pair[0].order_count >= pair[1].order_count);
        }
        // Stable sort: B before D on the tie at 3 orders
        assert_eq!(top[0].client.name(), "B");
        assert_eq!(top[1].client.name(), "D");

        assert_eq!(top_clients_by_order_count(&clients, 2).len(), 2);
    }

    #[test]
    fn top_products_accumulates_quantity_and_revenue() {
        let lamp = product("Lamp", 100.0);
        let client_id = ClientId::new_v4();

        // P sold in quantities 1 and 2 across two orders at unit price 100
        let orders = vec![
            order_on(client_id, "2023-01-01", &[(&lamp, 1)]),
            order_on(client_id, "2023-01-02", &[(&lamp, 2)]),
        ];

        let top = top_products_by_revenue(&orders, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].quantity_sold, 3);
        assert_eq!(top[0].revenue, 300.0);
    }

    #[test]
    fn top_products_sorts_by_revenue_descending() {
        let cheap = product("Cheap", 1.0);
        let costly = product("Costly", 500.0);
        let client_id = ClientId::new_v4();

        let orders = vec![order_on(
            client_id,
            "2023-01-01",
            &[(&cheap, 10), (&costly, 1)],
        )];

        let top = top_products_by_revenue(&orders, 5);
        assert_eq!(top[0].product.name(), "Costly");
        assert_eq!(top[1].product.name(), "Cheap");

        let only_one = top_products_by_revenue(&orders, 1);
        assert_eq!(only_one.len(), 1);
    }

    #[test]
    fn time_series_is_sorted_with_one_bucket_per_date() {
        let lamp = product("Lamp", 100.0);
        let client_id = ClientId::new_v4();

        let orders = vec![
            order_on(client_id, "2023-01-03", &[(&lamp, 1)]),
            order_on(client_id, "2023-01-01", &[(&lamp, 1)]),
            order_on(client_id, "2023-01-02", &[(&lamp, 1)]),
        ];

        let series = orders_time_series(&orders);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2023-01-01", "2023-01-02", "2023-01-03"]);
        assert!(series.iter().all(|p| p.order_count == 1));

        let total: usize = series.iter().map(|p| p.order_count).sum();
        assert_eq!(total, orders.len());
    }

    #[test]
    fn time_series_merges_same_day_orders() {
        let lamp = product("Lamp", 100.0);
        let client_id = ClientId::new_v4();

        let orders = vec![
            order_on(client_id, "2023-01-01", &[(&lamp, 1)]),
            order_on(client_id, "2023-01-01", &[(&lamp, 2)]),
        ];

        let series = orders_time_series(&orders);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].order_count, 2);
        assert_eq!(series[0].revenue, 300.0);
    }

    #[test]
    fn sort_dates_handles_shuffled_input() {
        let dates: Vec<String> = [
            "2023-06-15",
            "2021-01-01",
            "2023-06-14",
            "2022-12-31",
            "2023-06-15",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let sorted = sort_dates(dates);
        assert_eq!(
            sorted,
            [
                "2021-01-01",
                "2022-12-31",
                "2023-06-14",
                "2023-06-15",
                "2023-06-15"
            ]
        );
        assert!(sort_dates(Vec::new()).is_empty());
    }

    #[test]
    fn summary_totals_match_order_sums() {
        let lamp = product("Lamp", 100.0);
        let desk = product("Desk", 250.0);

        let mut a = client("A");
        let mut b = client("B");
        let o1 = order_on(a.id, "2023-01-01", &[(&lamp, 2)]);
        let o2 = order_on(b.id, "2023-01-02", &[(&desk, 1), (&lamp, 1)]);
        attach(&mut a, &o1);
        attach(&mut b, &o2);

        let clients = vec![a, b];
        let products = vec![lamp, desk];
        let orders = vec![o1, o2];

        let summary = sales_summary(&clients, &products, &orders);
        let expected_revenue: f64 = orders.iter().map(|o| o.total_amount()).sum();

        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue, expected_revenue);
        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.avg_order_value, expected_revenue / 2.0);
        assert_eq!(summary.avg_orders_per_client, 1.0);
        assert_eq!(summary.top_clients.len(), 2);
        assert_eq!(summary.top_products.len(), 2);
    }

    #[test]
    fn summary_degrades_to_zeroes_on_empty_input() {
        let summary = sales_summary(&[], &[], &[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.avg_order_value, 0.0);
        assert_eq!(summary.avg_orders_per_client, 0.0);
        assert!(summary.top_clients.is_empty());
        assert!(summary.top_products.is_empty());
    }

    #[test]
    fn aggregations_are_idempotent() {
        let lamp = product("Lamp", 100.0);
        let mut a = client("A");
        let o = order_on(a.id, "2023-01-01", &[(&lamp, 2)]);
        attach(&mut a, &o);

        let clients = vec![a];
        let products = vec![lamp];
        let orders = vec![o];

        let first = sales_summary(&clients, &products, &orders);
        let second = sales_summary(&clients, &products, &orders);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );

        let s1 = orders_time_series(&orders);
        let s2 = orders_time_series(&orders);
        assert_eq!(s1, s2);
    }
}
