use rquest_util::Emulation;
use tracing::{debug, error};

use crate::clients::{HttpClient, Transport};
use crate::config::Settings;
use crate::error::Result;
use crate::models::Inventory;
use crate::request::StoreRequest;

/// Sends [`StoreRequest`]s through a [`Transport`] and decodes the answers.
pub struct StoreClient<T = HttpClient> {
    transport: T,
}

impl StoreClient<HttpClient> {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(HttpClient::new(settings, Emulation::Chrome133)?))
    }
}

impl<T: Transport> StoreClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send<R>(&self, request: &StoreRequest<R>) -> Result<R> {
        debug!(
            method = %request.method(),
            uri = request.uri(),
            "Sending store request"
        );

        let payload = self.transport.execute(request.raw()).await?;

        request.decode(payload).map_err(|e| {
            error!(
                error = %e,
                uri = request.uri(),
                "Failed to decode store response"
            );
            e
        })
    }

    pub async fn get_inventories(&self) -> Result<Vec<Inventory>> {
        let inventories = self.send(&Inventory::all()).await?;
        debug!(count = inventories.len(), "Fetched store inventory");
        Ok(inventories)
    }

    pub async fn get_inventory(&self, inventory_id: i64) -> Result<Inventory> {
        self.send(&Inventory::get(inventory_id)).await
    }

    pub async fn update_inventory(&self, inventory: &Inventory) -> Result<Inventory> {
        self.send(&inventory.update()).await
    }

    /// Updates the lot and adds `quantity_change` units to its stock.
    pub async fn adjust_inventory(
        &self,
        inventory: &Inventory,
        quantity_change: i32,
    ) -> Result<Inventory> {
        self.send(&inventory.update_adjusting(quantity_change)).await
    }

    pub async fn create_inventory(&self, inventory: &Inventory) -> Result<Inventory> {
        self.send(&inventory.create()).await
    }

    pub async fn delete_inventory(&self, inventory_id: i64) -> Result<()> {
        self.send(&Inventory::delete(inventory_id)).await
    }
}
