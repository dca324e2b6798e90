use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bricklink_store::config::Settings;
use bricklink_store::StoreClient;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let settings = Settings::new()?;
    let client = StoreClient::from_settings(&settings)?;

    info!(base_url = %settings.api.base_url, "Fetching store inventory");

    let inventories = client.get_inventories().await?;
    info!(count = inventories.len(), "Store inventory fetched");

    if let Some(id) = inventories.first().and_then(|inventory| inventory.inventory_id) {
        let inventory = client.get_inventory(id).await?;
        info!(
            inventory_id = id,
            item_no = ?inventory.item.no,
            quantity = ?inventory.quantity,
            unit_price = ?inventory.unit_price,
            "First lot"
        );
    }

    Ok(())
}
