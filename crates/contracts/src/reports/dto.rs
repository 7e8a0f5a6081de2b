use crate::domain::client::{Client, ClientId};
use crate::domain::product::Product;
use serde::{Deserialize, Serialize};

/// One entry of the top-clients ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRanking {
    pub client: Client,
    /// Number of orders on the client's order list
    pub order_count: usize,
    /// Sum of the totals of those orders
    pub total_spent: f64,
}

/// One entry of the top-products ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRanking {
    pub product: Product,
    /// Units sold across all orders
    pub quantity_sold: u64,
    /// Revenue across all orders
    pub revenue: f64,
}

/// One calendar-date bucket of the order dynamics series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Bucket date, "YYYY-MM-DD"
    pub date: String,
    pub order_count: usize,
    pub revenue: f64,
}

/// Full sales report: headline figures plus the top-5 rankings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub total_clients: usize,
    pub total_products: usize,
    /// total_revenue / total_orders, 0 when there are no orders
    pub avg_order_value: f64,
    /// total_orders / total_clients, 0 when there are no clients
    pub avg_orders_per_client: f64,
    pub top_clients: Vec<ClientRanking>,
    pub top_products: Vec<ProductRanking>,
}

/// Node of the shared-purchases client graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub client_id: ClientId,
    pub label: String,
    /// Size hint for rendering
    pub order_count: usize,
}

/// Undirected edge between two clients that bought common products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: ClientId,
    pub target: ClientId,
    /// Count of distinct shared products
    pub weight: usize,
}

/// Derived visualization view; not used by any other computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}
