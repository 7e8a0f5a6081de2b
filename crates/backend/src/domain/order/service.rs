use super::repository;
use crate::domain::{client, product};
use contracts::domain::client::ClientId;
use contracts::domain::order::{Order, OrderDto};
use contracts::domain::product::ProductId;
use uuid::Uuid;

/// Создание заказа для существующего клиента. Запись заказа и привязка
/// к списку заказов клиента разделены: строка пишется здесь, а список
/// пересобирается при следующей загрузке снимка.
pub async fn create(dto: OrderDto) -> anyhow::Result<Uuid> {
    let client_id = Uuid::parse_str(&dto.client_id)
        .map_err(|_| anyhow::anyhow!("Invalid client ID: {}", dto.client_id))?;

    client::repository::get_by_id(client_id)
        .await?
        .filter(|c| !c.metadata.is_deleted)
        .ok_or_else(|| anyhow::anyhow!("Client not found"))?;

    let mut aggregate = Order::new_for_insert(ClientId::new(client_id), dto.order_date);
    if let Some(status) = dto.status {
        aggregate.status = status;
    }

    repository::insert(&aggregate).await
}

/// Добавление товара в заказ; если товар уже есть, количество
/// объединяется в существующую строку.
pub async fn add_item(order_id: Uuid, product_id: Uuid, quantity: u32) -> anyhow::Result<()> {
    let mut order = repository::get_by_id(order_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Order not found"))?;
    let product = product::repository::get_by_id(product_id)
        .await?
        .filter(|p| !p.metadata.is_deleted)
        .ok_or_else(|| anyhow::anyhow!("Product not found"))?;

    order
        .add_item(product, quantity)
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    order.before_write();

    repository::update(&order).await
}

/// Удаление всей строки товара из заказа
pub async fn remove_item(order_id: Uuid, product_id: Uuid) -> anyhow::Result<()> {
    let mut order = repository::get_by_id(order_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Order not found"))?;

    order.remove_item(ProductId::new(product_id));
    order.before_write();

    repository::update(&order).await
}

pub async fn set_status(order_id: Uuid, status: String) -> anyhow::Result<()> {
    let mut order = repository::get_by_id(order_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Order not found"))?;

    order.status = status;
    order.before_write();

    repository::update(&order).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Order>> {
    repository::list_all().await
}
