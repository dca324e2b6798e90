use serde::Deserialize;

use crate::error::{Error, Result};

/// Envelope every store API response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub meta: Meta,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: String,
}

impl ApiResponse {
    /// Yields `data` when `meta.code` is a 2xx, otherwise the API error.
    pub fn into_data(self) -> Result<serde_json::Value> {
        if (200..300).contains(&self.meta.code) {
            Ok(self.data)
        } else {
            Err(Error::Api {
                code: self.meta.code,
                message: self.meta.message,
                description: self.meta.description,
            })
        }
    }
}
