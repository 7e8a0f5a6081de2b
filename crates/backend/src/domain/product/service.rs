use super::repository;
use contracts::domain::product::{Product, ProductDto};
use uuid::Uuid;

/// Создание нового товара
pub async fn create(dto: ProductDto) -> anyhow::Result<Uuid> {
    let aggregate = Product::new_for_insert(
        dto.name,
        dto.price,
        dto.category.unwrap_or_default(),
        dto.description.unwrap_or_default(),
    )
    .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    repository::insert(&aggregate).await
}

/// Обновление существующего товара
pub async fn update(dto: ProductDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate
        .update(&dto)
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление: строка товара остаётся в базе, чтобы строки заказов
/// не теряли связь.
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}
