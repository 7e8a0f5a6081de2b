use crate::domain::common::{AggregateId, EntityMetadata};
use crate::domain::order::Order;
use crate::domain::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
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

impl AggregateId for ClientId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ClientId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A store client. Email and phone are format-validated on construction
/// and on every assignment; the order list is an append-only view with no
/// duplicate orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    name: String,
    email: String,
    phone: String,
    pub address: String,
    pub metadata: EntityMetadata,
    orders: Vec<Order>,
}

impl Client {
    /// Create a new client, validating name, email and phone.
    pub fn new_for_insert(
        name: String,
        email: String,
        phone: String,
        address: String,
    ) -> Result<Self, ValidationError> {
        validation::validate_name(&name)?;
        validation::validate_email(&email)?;
        validation::validate_phone(&phone)?;
        Ok(Self {
            id: ClientId::new_v4(),
            name,
            email,
            phone,
            address,
            metadata: EntityMetadata::new(),
            orders: Vec::new(),
        })
    }

    /// Rehydrate a client loaded from storage. The stored row was
    /// validated on the way in, so this path is infallible.
    pub fn new_with_id(
        id: ClientId,
        name: String,
        email: String,
        phone: String,
        address: String,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            address,
            metadata,
            orders: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, value: String) -> Result<(), ValidationError> {
        validation::validate_name(&value)?;
        self.name = value;
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, value: String) -> Result<(), ValidationError> {
        validation::validate_email(&value)?;
        self.email = value;
        Ok(())
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, value: String) -> Result<(), ValidationError> {
        validation::validate_phone(&value)?;
        self.phone = value;
        Ok(())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Register an order on this client's order list. Attaching the same
    /// order twice is a no-op, so the list never holds duplicates.
    pub fn attach_order(&mut self, order: Order) {
        if self.orders.iter().any(|o| o.id == order.id) {
            return;
        }
        self.orders.push(order);
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Total spent across all attached orders.
    pub fn total_spent(&self) -> f64 {
        self.orders.iter().map(|o| o.total_amount()).sum()
    }

    /// Apply an edit DTO through the validating setters.
    pub fn update(&mut self, dto: &ClientDto) -> Result<(), ValidationError> {
        self.set_name(dto.name.clone())?;
        self.set_email(dto.email.clone())?;
        self.set_phone(dto.phone.clone())?;
        self.address = dto.address.clone().unwrap_or_default();
        Ok(())
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
pub struct ClientDto {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}
