use super::repository;
use contracts::domain::client::{Client, ClientDto};
use uuid::Uuid;

/// Создание нового клиента
pub async fn create(dto: ClientDto) -> anyhow::Result<Uuid> {
    let aggregate = Client::new_for_insert(
        dto.name,
        dto.email,
        dto.phone,
        dto.address.unwrap_or_default(),
    )
    .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    repository::insert(&aggregate).await
}

/// Обновление существующего клиента
pub async fn update(dto: ClientDto) -> anyhow::Result<()> {
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

/// Мягкое удаление: строка клиента остаётся в базе, чтобы существующие
/// заказы не теряли связь.
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    repository::list_all().await
}
