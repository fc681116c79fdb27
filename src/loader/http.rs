//! HTTP user source: one `GET` against the configured collection endpoint.
//!
//! No retry, no timeout, no cancellation. A single attempt per call.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::user::RawUser;
use crate::loader::{LoadError, UserSource};

pub struct HttpUserSource {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpUserSource {
    /// `api_key`, when present, is sent as the `key` query parameter.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_users(&self) -> Result<Vec<RawUser>, LoadError> {
        info!("Fetching users from {}", self.endpoint);

        let mut request = self.client.get(&self.endpoint);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        debug!("User endpoint status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("User endpoint error: {} - {}", status, body);
            return Err(LoadError::Api { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        debug!("User endpoint body: {} bytes", body.len());

        serde_json::from_str::<Vec<RawUser>>(&body).map_err(|e| {
            warn!("Failed to decode user list: {}", e);
            LoadError::Decode(e.to_string())
        })
    }
}
