mod inventory;
mod response;
pub mod truthy;

pub use inventory::{Inventory, InventoryFilter, InventoryItem};
pub use response::{ApiResponse, Meta};
