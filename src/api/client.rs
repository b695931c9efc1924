//! Microsoft Graph client

use crate::auth::AzureAuthenticator;
use crate::models::ODataResponse;
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

const GRAPH_URL: &str = "https://graph.microsoft.com/v1.0";

/// HTTP client for the Microsoft Graph REST API
pub struct GraphClient {
    http_client: Client,
    authenticator: Arc<AzureAuthenticator>,
}

impl GraphClient {
    /// Create a new Graph client
    pub fn new(authenticator: Arc<AzureAuthenticator>) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("Licenso/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            authenticator,
        })
    }

    pub fn authenticator(&self) -> &AzureAuthenticator {
        &self.authenticator
    }

    /// Make an authenticated GET request
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let token = self.authenticator.get_token().await?;
        let url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}/{}", GRAPH_URL, endpoint.trim_start_matches('/'))
        };
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/json")
            .header("ConsistencyLevel", "eventual")
            .send()
            .await
            .context("Failed to send request to Microsoft Graph")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {}: {}", status, body);
        }

        Ok(response)
    }

    /// Make an authenticated GET request and deserialize JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.get(endpoint).await?;
        let data = response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")?;
        Ok(data)
    }

    /// Fetch every page of a collection by following `@odata.nextLink`
    pub async fn get_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(endpoint.to_string());

        while let Some(endpoint) = next {
            let page: ODataResponse<T> = self.get_json(&endpoint).await?;
            items.extend(page.value);
            next = page.next_link;
        }

        Ok(items)
    }
}
