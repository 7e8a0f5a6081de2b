pub mod analytics;
pub mod domain;
pub mod interchange;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Отключаем логи SQL запросов, но оставляем логи приложения
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let snapshot = shared::data::snapshot::load().await?;
    let summary = analytics::service::sales_summary(
        &snapshot.clients,
        &snapshot.products,
        &snapshot.orders,
    );

    tracing::info!(
        clients = summary.total_clients,
        products = summary.total_products,
        orders = summary.total_orders,
        revenue = summary.total_revenue,
        "Store loaded"
    );
    for ranking in &summary.top_clients {
        tracing::info!(
            name = ranking.client.name(),
            orders = ranking.order_count,
            spent = ranking.total_spent,
            "Top client"
        );
    }
    for ranking in &summary.top_products {
        tracing::info!(
            name = ranking.product.name(),
            sold = ranking.quantity_sold,
            revenue = ranking.revenue,
            "Top product"
        );
    }
    for point in analytics::service::orders_time_series(&snapshot.orders) {
        tracing::info!(
            date = %point.date,
            orders = point.order_count,
            revenue = point.revenue,
            "Daily sales"
        );
    }

    let network = analytics::network::client_network(&snapshot.clients);
    tracing::info!(
        nodes = network.nodes.len(),
        edges = network.edges.len(),
        "Client network built"
    );

    Ok(())
}
