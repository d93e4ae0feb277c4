//! Qase metadata source
//!
//! HTTP implementation of [`MetadataSource`] against the system-field
//! catalog endpoint.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{FieldDefinition, MetadataSource};
use crate::config::QaseConfig;

/// Response envelope of the catalog endpoint
#[derive(Debug, Deserialize)]
struct SystemFieldListResponse {
    status: bool,
    #[serde(default)]
    result: Option<Vec<FieldDefinition>>,
    #[serde(default, rename = "errorMessage")]
    error_message: Option<String>,
}

/// Fetches the field catalog over HTTP
pub struct QaseMetadataSource {
    client: Client,
    base_url: String,
    api_token: String,
}

impl QaseMetadataSource {
    pub fn new(config: &QaseConfig) -> Self {
        Self {
            client: Client::builder().build().unwrap_or_default(),
            base_url: config.base_url(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&QaseConfig::from_env()?))
    }
}

#[async_trait]
impl MetadataSource for QaseMetadataSource {
    async fn fetch_field_catalog(&self) -> Result<Vec<FieldDefinition>> {
        let url = format!("{}/v1/system_field", self.base_url);
        debug!("Fetching field catalog from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Token", &self.api_token)
            .send()
            .await
            .context("Failed to send field catalog request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SystemFieldListResponse>(&body)
                .ok()
                .and_then(|envelope| envelope.error_message)
                .unwrap_or(body);
            bail!(
                "Field catalog request failed with {}: {}",
                status,
                message.trim()
            );
        }

        let envelope: SystemFieldListResponse = response
            .json()
            .await
            .context("Failed to decode field catalog response")?;

        if !envelope.status {
            bail!(
                "Field catalog request rejected: {}",
                envelope.error_message.as_deref().unwrap_or("unknown error")
            );
        }

        // A missing result set is a valid, empty catalog.
        let catalog = envelope.result.unwrap_or_default();
        debug!("Fetched {} field definitions", catalog.len());
        Ok(catalog)
    }
}
