use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::client::{Client, ClientId};
use contracts::domain::common::EntityMetadata;
use contracts::domain::order::{Order, OrderId};
use contracts::domain::product::Product;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::domain::{client, product};
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_id: String,
    pub order_date: chrono::DateTime<chrono::Utc>,
    pub status: String,
    /// Denormalized at save time; live totals come from the aggregate
    pub total_amount: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Order lines live in their own table, one row per distinct product.
/// `price` is the unit price at save time, kept as a historical record.
pub mod item {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub order_id: String,
        pub product_id: String,
        pub quantity: i32,
        pub price: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn rehydrate(row: Model, products: &HashMap<String, Product>, item_rows: Vec<item::Model>) -> Order {
    let order_uuid = Uuid::parse_str(&row.id).unwrap_or_else(|_| Uuid::new_v4());
    let client_uuid = Uuid::parse_str(&row.client_id).unwrap_or_else(|_| Uuid::new_v4());
    let metadata = EntityMetadata {
        created_at: row.created_at.unwrap_or_else(Utc::now),
        updated_at: row.updated_at.unwrap_or_else(Utc::now),
        is_deleted: row.is_deleted,
        version: row.version,
    };

    let mut order = Order::new_with_id(
        OrderId::new(order_uuid),
        ClientId::new(client_uuid),
        row.order_date,
        row.status,
        metadata,
    );

    for item_row in item_rows {
        let Some(product) = products.get(&item_row.product_id) else {
            tracing::warn!(
                order_id = %row.id,
                product_id = %item_row.product_id,
                "Skipping order line for unknown product"
            );
            continue;
        };
        if item_row.quantity < 1 {
            tracing::warn!(
                order_id = %row.id,
                quantity = item_row.quantity,
                "Skipping order line with invalid quantity"
            );
            continue;
        }
        if let Err(e) = order.add_item(product.clone(), item_row.quantity as u32) {
            tracing::warn!(order_id = %row.id, "Skipping order line: {}", e);
        }
    }

    order
}

/// Load every active order with its lines linked to live product values.
/// Tombstoned clients/products still resolve so history stays intact;
/// orders whose client row is gone entirely are skipped.
pub async fn list_all() -> anyhow::Result<Vec<Order>> {
    let clients: HashMap<String, Client> = client::repository::list_with_deleted()
        .await?
        .into_iter()
        .map(|c| (c.id.value().to_string(), c))
        .collect();
    let products: HashMap<String, Product> = product::repository::list_with_deleted()
        .await?
        .into_iter()
        .map(|p| (p.id.value().to_string(), p))
        .collect();

    let rows = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;
    let mut items_by_order: HashMap<String, Vec<item::Model>> = HashMap::new();
    for item_row in item::Entity::find().all(conn()).await? {
        items_by_order
            .entry(item_row.order_id.clone())
            .or_default()
            .push(item_row);
    }

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        if !clients.contains_key(&row.client_id) {
            tracing::warn!(order_id = %row.id, client_id = %row.client_id, "Skipping order with missing client");
            continue;
        }
        let item_rows = items_by_order.remove(&row.id).unwrap_or_default();
        orders.push(rehydrate(row, &products, item_rows));
    }

    // Oldest first, matching the insertion order of the store
    orders.sort_by_key(|o| o.order_date);
    Ok(orders)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Order>> {
    let Some(row) = Entity::find_by_id(id.to_string()).one(conn()).await? else {
        return Ok(None);
    };
    let products: HashMap<String, Product> = product::repository::list_with_deleted()
        .await?
        .into_iter()
        .map(|p| (p.id.value().to_string(), p))
        .collect();
    let item_rows = item::Entity::find()
        .filter(item::Column::OrderId.eq(row.id.clone()))
        .all(conn())
        .await?;
    Ok(Some(rehydrate(row, &products, item_rows)))
}

fn to_active(order: &Order) -> ActiveModel {
    ActiveModel {
        id: Set(order.id.value().to_string()),
        client_id: Set(order.client_id().value().to_string()),
        order_date: Set(order.order_date),
        status: Set(order.status.clone()),
        total_amount: Set(order.total_amount()),
        is_deleted: Set(order.metadata.is_deleted),
        created_at: Set(Some(order.metadata.created_at)),
        updated_at: Set(Some(order.metadata.updated_at)),
        version: Set(order.metadata.version),
    }
}

async fn replace_items(order: &Order) -> anyhow::Result<()> {
    item::Entity::delete_many()
        .filter(item::Column::OrderId.eq(order.id.value().to_string()))
        .exec(conn())
        .await?;

    for line in order.items() {
        let active = item::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            order_id: Set(order.id.value().to_string()),
            product_id: Set(line.product().id.value().to_string()),
            quantity: Set(line.quantity() as i32),
            price: Set(line.product().price()),
        };
        active.insert(conn()).await?;
    }
    Ok(())
}

pub async fn insert(aggregate: &Order) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active(aggregate).insert(conn()).await?;
    replace_items(aggregate).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Order) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    replace_items(aggregate).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
