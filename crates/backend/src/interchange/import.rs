use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use contracts::domain::client::ClientDto;
use contracts::domain::product::ProductDto;
use serde::Deserialize;

use super::ImportSummary;
use crate::domain::{client, product};

/// Incoming client row. Only the contact fields are read; identifiers and
/// derived statistics in the source file are ignored and new ids are
/// assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientImportRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<ClientImportRow> for ClientDto {
    fn from(row: ClientImportRow) -> Self {
        Self {
            id: None,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
        }
    }
}

/// Incoming product row, same policy as [`ClientImportRow`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProductImportRow {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ProductImportRow> for ProductDto {
    fn from(row: ProductImportRow) -> Self {
        Self {
            id: None,
            name: row.name,
            price: row.price,
            category: row.category,
            description: row.description,
        }
    }
}

pub fn read_client_rows(path: &Path) -> anyhow::Result<Vec<ClientImportRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

pub fn read_product_rows(path: &Path) -> anyhow::Result<Vec<ProductImportRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

async fn insert_clients(rows: Vec<ClientImportRow>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for row in rows {
        match client::service::create(row.into()).await {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                tracing::warn!("Skipping client row: {}", e);
                summary.skipped += 1;
            }
        }
    }
    summary
}

async fn insert_products(rows: Vec<ProductImportRow>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for row in rows {
        match product::service::create(row.into()).await {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                tracing::warn!("Skipping product row: {}", e);
                summary.skipped += 1;
            }
        }
    }
    summary
}

pub async fn clients_from_csv(path: &Path) -> anyhow::Result<ImportSummary> {
    let rows = read_client_rows(path)?;
    let summary = insert_clients(rows).await;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Client CSV import finished"
    );
    Ok(summary)
}

pub async fn products_from_csv(path: &Path) -> anyhow::Result<ImportSummary> {
    let rows = read_product_rows(path)?;
    let summary = insert_products(rows).await;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Product CSV import finished"
    );
    Ok(summary)
}

pub async fn clients_from_json(path: &Path) -> anyhow::Result<ImportSummary> {
    let file = BufReader::new(File::open(path)?);
    let rows: Vec<ClientImportRow> = serde_json::from_reader(file)?;
    let summary = insert_clients(rows).await;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Client JSON import finished"
    );
    Ok(summary)
}

pub async fn products_from_json(path: &Path) -> anyhow::Result<ImportSummary> {
    let file = BufReader::new(File::open(path)?);
    let rows: Vec<ProductImportRow> = serde_json::from_reader(file)?;
    let summary = insert_products(rows).await;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Product JSON import finished"
    );
    Ok(summary)
}
