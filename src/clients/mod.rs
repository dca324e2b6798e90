pub mod http;
pub mod store;

pub use self::http::HttpClient;
pub use store::StoreClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::RawRequest;

/// Executes a request descriptor and yields the response's JSON payload.
///
/// Implementations own everything about the wire: connections, headers,
/// status handling and unwrapping of any response envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RawRequest<'_>) -> Result<serde_json::Value>;
}
