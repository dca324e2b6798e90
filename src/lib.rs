//! Typed bindings for a marketplace store REST API.
//!
//! Resources such as [`Inventory`](models::Inventory) build inert
//! [`StoreRequest`](request::StoreRequest) descriptors; a
//! [`StoreClient`](clients::StoreClient) runs them over any
//! [`Transport`](clients::Transport).
//!
//! ```no_run
//! use bricklink_store::{config::Settings, models::Inventory, StoreClient};
//!
//! # async fn run() -> bricklink_store::Result<()> {
//! let settings = Settings::new()?;
//! let client = StoreClient::from_settings(&settings)?;
//!
//! let mut inventory = client.send(&Inventory::get(50592684)).await?;
//! inventory.remarks = Some("shelf 4".to_string());
//! client.send(&inventory.update()).await?;
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod request;

pub use clients::{HttpClient, StoreClient, Transport};
pub use error::{Error, Result};
pub use request::{Method, RawRequest, RequestBody, RequestParams, Resource, StoreRequest};
