use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use contracts::domain::client::Client;
use contracts::domain::order::Order;
use contracts::domain::product::Product;

use super::{ClientRow, OrderRecord, OrderRow, ProductRow};

pub fn clients_to_csv(path: &Path, clients: &[Client]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for client in clients {
        writer.serialize(ClientRow::from(client))?;
    }
    writer.flush()?;
    tracing::info!(count = clients.len(), "Exported clients to {}", path.display());
    Ok(())
}

pub fn products_to_csv(path: &Path, products: &[Product]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for product in products {
        writer.serialize(ProductRow::from(product))?;
    }
    writer.flush()?;
    tracing::info!(count = products.len(), "Exported products to {}", path.display());
    Ok(())
}

pub fn orders_to_csv(path: &Path, orders: &[Order]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for order in orders {
        writer.serialize(OrderRow::from(order))?;
    }
    writer.flush()?;
    tracing::info!(count = orders.len(), "Exported orders to {}", path.display());
    Ok(())
}

pub fn clients_to_json(path: &Path, clients: &[Client]) -> anyhow::Result<()> {
    let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(())
}

pub fn products_to_json(path: &Path, products: &[Product]) -> anyhow::Result<()> {
    let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(())
}

/// Orders export as nested records with the full client record inline.
/// Orders whose client is not in the given collection are skipped.
pub fn orders_to_json(path: &Path, orders: &[Order], clients: &[Client]) -> anyhow::Result<()> {
    let by_id: HashMap<_, _> = clients.iter().map(|c| (c.id, c)).collect();
    let mut records = Vec::with_capacity(orders.len());
    for order in orders {
        let Some(client) = by_id.get(&order.client_id()) else {
            tracing::warn!(order_id = %order.id.value(), "Skipping order export with unknown client");
            continue;
        };
        records.push(OrderRecord::new(order, client));
    }
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &records)?;
    Ok(())
}
