use std::collections::HashMap;

use contracts::domain::client::Client;
use contracts::domain::order::Order;
use contracts::domain::product::Product;

use crate::domain::{client, order, product};

/// Read-only in-memory snapshot of the store, loaded wholesale.
///
/// Clients come back with their orders attached, so the three collections
/// form a fully linked graph. All mutations go through the entity
/// services; callers drop the snapshot and load a fresh one after a
/// write.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

pub async fn load() -> anyhow::Result<Snapshot> {
    let products = product::repository::list_all().await?;
    let orders = order::repository::list_all().await?;
    let mut clients = client::repository::list_all().await?;

    let mut by_client: HashMap<String, Vec<Order>> = HashMap::new();
    for o in &orders {
        by_client
            .entry(o.client_id().value().to_string())
            .or_default()
            .push(o.clone());
    }
    for c in clients.iter_mut() {
        for o in by_client
            .remove(&c.id.value().to_string())
            .unwrap_or_default()
        {
            c.attach_order(o);
        }
    }

    Ok(Snapshot {
        clients,
        products,
        orders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange;
    use crate::shared::data::db;
    use contracts::domain::client::ClientDto;
    use contracts::domain::order::OrderDto;
    use contracts::domain::product::ProductDto;

    // Single test for the whole persistence path: the connection is a
    // process-wide singleton, so all DB assertions live here.
    #[tokio::test]
    async fn round_trip_through_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db_file = dir.path().join("store.db");
        db::initialize_database(db_file.to_str()).await.unwrap();

        let client_id = client::service::create(ClientDto {
            id: None,
            name: "Anna".into(),
            email: "anna@example.com".into(),
            phone: "+7-912-345-67-89".into(),
            address: Some("Kazan".into()),
        })
        .await
        .unwrap();

        let product_id = product::service::create(ProductDto {
            id: None,
            name: "Lamp".into(),
            price: 100.0,
            category: Some("Home".into()),
            description: None,
        })
        .await
        .unwrap();

        let order_id = order::service::create(OrderDto {
            id: None,
            client_id: client_id.to_string(),
            order_date: None,
            status: None,
        })
        .await
        .unwrap();

        order::service::add_item(order_id, product_id, 2).await.unwrap();
        // Same product again: merges into the existing line
        order::service::add_item(order_id, product_id, 1).await.unwrap();

        let snapshot = load().await.unwrap();
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.orders.len(), 1);

        let client = &snapshot.clients[0];
        assert_eq!(client.id.value(), client_id);
        assert_eq!(client.order_count(), 1);
        assert_eq!(client.total_spent(), 300.0);

        let order = &snapshot.orders[0];
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity(), 3);
        assert_eq!(order.status, "New");

        // Tombstoned product: lists shrink, existing lines stay linked
        product::service::delete(product_id).await.unwrap();
        let snapshot = load().await.unwrap();
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.orders[0].items().len(), 1);
        assert_eq!(snapshot.orders[0].total_amount(), 300.0);

        // Правка клиента через сервис
        client::service::update(ClientDto {
            id: Some(client_id.to_string()),
            name: "Anna".into(),
            email: "anna@newmail.com".into(),
            phone: "+7-912-345-67-89".into(),
            address: Some("Moscow".into()),
        })
        .await
        .unwrap();
        let updated = client::service::get_by_id(client_id).await.unwrap().unwrap();
        assert_eq!(updated.email(), "anna@newmail.com");
        assert_eq!(updated.address, "Moscow");

        order::service::set_status(order_id, "Shipped".into())
            .await
            .unwrap();
        let shipped = order::service::get_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(shipped.status, "Shipped");

        // Exports read back as well-formed files while the order is live
        let orders_csv = dir.path().join("orders.csv");
        interchange::export::orders_to_csv(&orders_csv, &snapshot.orders).unwrap();
        let contents = std::fs::read_to_string(&orders_csv).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(&order_id.to_string()));

        let clients_json = dir.path().join("clients.json");
        interchange::export::clients_to_json(&clients_json, &snapshot.clients).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&clients_json).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);

        let products_json = dir.path().join("products.json");
        interchange::export::products_to_json(&products_json, &snapshot.products).unwrap();
        assert_eq!(
            std::fs::read_to_string(&products_json).unwrap().trim(),
            "[]"
        );

        // Импорт CSV: одна корректная строка и одна с невалидным email
        let clients_in = dir.path().join("clients_in.csv");
        std::fs::write(
            &clients_in,
            "name,email,phone,address\n\
             Boris,boris@example.com,89123456789,Tver\n\
             Bad,not-an-email,89123456789,\n",
        )
        .unwrap();
        let summary = interchange::import::clients_from_csv(&clients_in).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);

        let clients_in = dir.path().join("clients_in.json");
        std::fs::write(
            &clients_in,
            r#"[{"name": "Vera", "email": "vera@example.com", "phone": "+7 (912) 345-67-89"}]"#,
        )
        .unwrap();
        let summary = interchange::import::clients_from_json(&clients_in).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 0);

        // Отрицательная цена отбрасывается при импорте
        let products_in = dir.path().join("products_in.csv");
        std::fs::write(
            &products_in,
            "name,price,category,description\nChair,50.0,Home,\nBroken,-5.0,,\n",
        )
        .unwrap();
        let summary = interchange::import::products_from_csv(&products_in).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);

        let products_in = dir.path().join("products_in.json");
        std::fs::write(
            &products_in,
            r#"[{"name": "Desk", "price": 250.0}, {"name": "", "price": 10.0}]"#,
        )
        .unwrap();
        let summary = interchange::import::products_from_json(&products_in).await.unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);

        // Обновление импортированного товара через сервис
        let desk = product::service::list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.name() == "Desk")
            .unwrap();
        product::service::update(ProductDto {
            id: Some(desk.id.value().to_string()),
            name: "Desk".into(),
            price: 300.0,
            category: Some("Office".into()),
            description: None,
        })
        .await
        .unwrap();
        let desk = product::service::get_by_id(desk.id.value()).await.unwrap().unwrap();
        assert_eq!(desk.price(), 300.0);

        // Снятие строки и удаление заказа
        order::service::remove_item(order_id, product_id).await.unwrap();
        let emptied = order::service::get_by_id(order_id).await.unwrap().unwrap();
        assert!(emptied.items().is_empty());
        assert!(order::service::delete(order_id).await.unwrap());

        let snapshot = load().await.unwrap();
        assert!(snapshot.orders.is_empty());
        assert_eq!(snapshot.clients.len(), 3);
        assert_eq!(snapshot.products.len(), 2);
        assert!(snapshot.clients.iter().all(|c| c.order_count() == 0));
    }
}
