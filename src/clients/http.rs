use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use rquest::Client;
use rquest_util::Emulation;
use tracing::{debug, error};

use crate::clients::Transport;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::models::ApiResponse;
use crate::request::RawRequest;

pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(settings: &Settings, emulation: Emulation) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (key, value) in settings.api.headers.iter() {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::InvalidHeader(key.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeader(key.clone()))?;
            headers.insert(header_name, header_value);
            debug!(header_key = key, "Adding header");
        }

        debug!(
            emulation = ?emulation,
            base_url = %settings.api.base_url,
            "Creating client with emulation"
        );

        let client = Client::builder()
            .emulation(emulation)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: RawRequest<'_>) -> Result<serde_json::Value> {
        let url = self.url(request.uri);
        let mut builder = self.client.request(request.method.into(), url.as_str());

        for (key, value) in self.headers.iter() {
            builder = builder.header(key, value);
        }
        if let Some(params) = request.params {
            builder = builder.query(params);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body.as_map())?);
        }

        debug!(
            method = %request.method,
            url = %url,
            params = ?request.params,
            "Sending request"
        );

        let response = builder.send().await?;
        let status = response.status();

        debug!(
            status = status.as_u16(),
            url = %url,
            "Response received"
        );

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                debug!("Rate limit exceeded");
                return Err(Error::RateLimit);
            }
            StatusCode::FORBIDDEN => {
                debug!(url = %url, "Received 403 Forbidden");
                return Err(Error::Forbidden);
            }
            _ => {}
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&body).into_owned();
            error!(
                status = status.as_u16(),
                body = %body_str,
                "Request failed"
            );
            return Err(Error::Status {
                status: status.as_u16(),
                body: body_str,
            });
        }

        let envelope: ApiResponse = serde_json::from_slice(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            error!(
                error = %e,
                body = %body_str,
                "Invalid JSON response"
            );
            Error::from(e)
        })?;

        envelope.into_data()
    }
}
