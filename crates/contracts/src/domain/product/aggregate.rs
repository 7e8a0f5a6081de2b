use crate::domain::common::{AggregateId, EntityMetadata};
use crate::domain::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A catalog product. Identity is immutable; price, category and
/// description stay mutable through validating setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    name: String,
    price: f64,
    pub category: String,
    pub description: String,
    pub metadata: EntityMetadata,
}

impl Product {
    /// Create a new product, validating name and price.
    pub fn new_for_insert(
        name: String,
        price: f64,
        category: String,
        description: String,
    ) -> Result<Self, ValidationError> {
        validation::validate_name(&name)?;
        validation::validate_price(price)?;
        Ok(Self {
            id: ProductId::new_v4(),
            name,
            price,
            category,
            description,
            metadata: EntityMetadata::new(),
        })
    }

    /// Rehydrate a product loaded from storage. The stored row was
    /// validated on the way in, so this path is infallible.
    pub fn new_with_id(
        id: ProductId,
        name: String,
        price: f64,
        category: String,
        description: String,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            name,
            price,
            category,
            description,
            metadata,
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

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_price(&mut self, value: f64) -> Result<(), ValidationError> {
        validation::validate_price(value)?;
        self.price = value;
        Ok(())
    }

    /// Apply an edit DTO through the validating setters.
    pub fn update(&mut self, dto: &ProductDto) -> Result<(), ValidationError> {
        self.set_name(dto.name.clone())?;
        self.set_price(dto.price)?;
        self.category = dto.category.clone().unwrap_or_default();
        self.description = dto.description.clone().unwrap_or_default();
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
pub struct ProductDto {
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_negative_price() {
        let result = Product::new_for_insert(
            "Keyboard".into(),
            -0.01,
            "Peripherals".into(),
            String::new(),
        );
        assert!(matches!(result, Err(ValidationError::NegativePrice(_))));
    }

    #[test]
    fn zero_price_is_allowed() {
        let product =
            Product::new_for_insert("Sticker".into(), 0.0, String::new(), String::new());
        assert!(product.is_ok());
    }

    #[test]
    fn set_price_validates_on_mutation() {
        let mut product =
            Product::new_for_insert("Mouse".into(), 25.0, "Peripherals".into(), String::new())
                .unwrap();
        assert!(product.set_price(-1.0).is_err());
        assert_eq!(product.price(), 25.0);
        assert!(product.set_price(30.0).is_ok());
        assert_eq!(product.price(), 30.0);
    }

    #[test]
    fn name_cannot_be_blanked() {
        let mut product =
            Product::new_for_insert("Mouse".into(), 25.0, String::new(), String::new()).unwrap();
        assert!(product.set_name("  ".into()).is_err());
        assert_eq!(product.name(), "Mouse");
    }
}
