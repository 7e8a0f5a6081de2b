//! CSV/JSON import-export of the entity collections.
//!
//! Exports serialize flat field mappings of each entity; imports route
//! every accepted row back through the persistence services, so imported
//! data passes the same validation as data entered by hand. Failures are
//! recoverable results, never panics.

pub mod export;
pub mod import;

use contracts::domain::client::Client;
use contracts::domain::order::Order;
use contracts::domain::product::Product;
use serde::{Deserialize, Serialize};

/// Flat client record: identity, contact fields and the derived order
/// statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRow {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total_orders: usize,
    pub total_spent: f64,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.id.value().to_string(),
            name: client.name().to_string(),
            email: client.email().to_string(),
            phone: client.phone().to_string(),
            address: client.address.clone(),
            total_orders: client.order_count(),
            total_spent: client.total_spent(),
        }
    }
}

/// Flat product record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRow {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.value().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            category: product.category.clone(),
            description: product.description.clone(),
        }
    }
}

/// Flat order record for CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    pub order_id: String,
    pub client_id: String,
    /// ISO-8601 timestamp
    pub order_date: String,
    pub status: String,
    pub total_amount: f64,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.value().to_string(),
            client_id: order.client_id().value().to_string(),
            order_date: order.order_date.to_rfc3339(),
            status: order.status.clone(),
            total_amount: order.total_amount(),
        }
    }
}

/// One order line inside the nested JSON order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub product: ProductRow,
    pub quantity: u32,
    pub total_price: f64,
}

/// Nested order record for JSON export: the full client record plus the
/// line list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub client: ClientRow,
    /// ISO-8601 timestamp
    pub order_date: String,
    pub status: String,
    pub items: Vec<OrderLineRecord>,
    pub total_amount: f64,
}

impl OrderRecord {
    pub fn new(order: &Order, client: &Client) -> Self {
        Self {
            order_id: order.id.value().to_string(),
            client: ClientRow::from(client),
            order_date: order.order_date.to_rfc3339(),
            status: order.status.clone(),
            items: order
                .items()
                .iter()
                .map(|line| OrderLineRecord {
                    product: ProductRow::from(line.product()),
                    quantity: line.quantity(),
                    total_price: line.total_price(),
                })
                .collect(),
            total_amount: order.total_amount(),
        }
    }
}

/// Outcome of an import run: rows written vs rows rejected by validation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
