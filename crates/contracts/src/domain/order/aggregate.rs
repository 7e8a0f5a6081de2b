use crate::domain::client::ClientId;
use crate::domain::common::{AggregateId, EntityMetadata};
use crate::domain::product::{Product, ProductId};
use crate::domain::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status a freshly created order starts in. Free-form afterwards.
pub const DEFAULT_STATUS: &str = "New";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Order line
// ============================================================================

/// One line of an order: a product and a positive quantity.
///
/// The line holds the product value itself, so the line total always
/// reflects the product price it was loaded with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    product: Product,
    quantity: u32,
}

impl OrderItem {
    pub fn new(product: Product, quantity: u32) -> Result<Self, ValidationError> {
        validation::validate_quantity(quantity)?;
        Ok(Self { product, quantity })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, value: u32) -> Result<(), ValidationError> {
        validation::validate_quantity(value)?;
        self.quantity = value;
        Ok(())
    }

    /// Derived line total: quantity x current product price.
    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.product.price()
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A customer order. The owning client is set once at creation and is
/// immutable afterwards; linkage onto the client's order list is an
/// explicit separate step (`Client::attach_order`), never a constructor
/// side effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    client_id: ClientId,
    pub order_date: DateTime<Utc>,
    pub status: String,
    items: Vec<OrderItem>,
    pub metadata: EntityMetadata,
}

impl Order {
    /// Create a new order bound to a client. Defaults to "now" when no
    /// explicit order date is given.
    pub fn new_for_insert(client_id: ClientId, order_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: OrderId::new_v4(),
            client_id,
            order_date: order_date.unwrap_or_else(Utc::now),
            status: DEFAULT_STATUS.to_string(),
            items: Vec::new(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Rehydrate an order loaded from storage.
    pub fn new_with_id(
        id: OrderId,
        client_id: ClientId,
        order_date: DateTime<Utc>,
        status: String,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            client_id,
            order_date,
            status,
            items: Vec::new(),
            metadata,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Add a product to the order. At most one line exists per distinct
    /// product: adding a product that is already present increments the
    /// existing line's quantity instead of creating a duplicate.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), ValidationError> {
        validation::validate_quantity(quantity)?;
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let merged = item
                .quantity()
                .checked_add(quantity)
                .ok_or(ValidationError::InvalidQuantity(quantity))?;
            item.set_quantity(merged)?;
            return Ok(());
        }
        self.items.push(OrderItem::new(product, quantity)?);
        Ok(())
    }

    /// Remove the entire line for a product. No partial-quantity removal.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Derived order total: sum of line totals.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|i| i.total_price()).sum()
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderDto {
    pub id: Option<String>,
    pub client_id: String,
    pub order_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product::new_for_insert(name.into(), price, String::new(), String::new()).unwrap()
    }

    #[test]
    fn new_order_starts_empty_with_default_status() {
        let order = Order::new_for_insert(ClientId::new_v4(), None);
        assert_eq!(order.status, "New");
        assert!(order.items().is_empty());
        assert_eq!(order.total_amount(), 0.0);
    }

    #[test]
    fn item_quantity_zero_is_rejected() {
        let result = OrderItem::new(product("Lamp", 10.0), 0);
        assert!(matches!(result, Err(ValidationError::InvalidQuantity(0))));
        assert!(OrderItem::new(product("Lamp", 10.0), 1).is_ok());
    }

    #[test]
    fn add_item_merges_duplicate_product_into_one_line() {
        let mut order = Order::new_for_insert(ClientId::new_v4(), None);
        let lamp = product("Lamp", 100.0);

        order.add_item(lamp.clone(), 1).unwrap();
        order.add_item(lamp, 2).unwrap();

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity(), 3);
        assert_eq!(order.total_amount(), 300.0);
    }

    #[test]
    fn add_item_rejects_zero_quantity_even_on_merge() {
        let mut order = Order::new_for_insert(ClientId::new_v4(), None);
        let lamp = product("Lamp", 100.0);
        order.add_item(lamp.clone(), 1).unwrap();
        assert!(order.add_item(lamp, 0).is_err());
        assert_eq!(order.items()[0].quantity(), 1);
    }

    #[test]
    fn add_item_rejects_quantity_overflow_on_merge() {
        let mut order = Order::new_for_insert(ClientId::new_v4(), None);
        let lamp = product("Lamp", 1.0);
        order.add_item(lamp.clone(), u32::MAX).unwrap();
        assert!(order.add_item(lamp, 1).is_err());
        assert_eq!(order.items()[0].quantity(), u32::MAX);
    }

    #[test]
    fn remove_item_drops_the_whole_line() {
        let mut order = Order::new_for_insert(ClientId::new_v4(), None);
        let lamp = product("Lamp", 100.0);
        let desk = product("Desk", 250.0);
        order.add_item(lamp.clone(), 3).unwrap();
        order.add_item(desk, 1).unwrap();

        order.remove_item(lamp.id);

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total_amount(), 250.0);
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let mut order = Order::new_for_insert(ClientId::new_v4(), None);
        order.add_item(product("Lamp", 100.0), 2).unwrap();
        order.add_item(product("Desk", 250.5), 1).unwrap();
        assert_eq!(order.total_amount(), 450.5);
    }
}
