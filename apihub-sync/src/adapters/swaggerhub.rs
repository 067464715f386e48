use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::config::SwaggerHubConfig;
use crate::domain::SourceRecord;
use crate::domain::source::null_as_default;
use crate::error::{Result, SyncError};
use crate::ports::CatalogSource;

/// SwaggerHub registry REST client.
pub struct SwaggerHubClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiListing {
    #[serde(default, deserialize_with = "null_as_default")]
    apis: Vec<SourceRecord>,
}

impl SwaggerHubClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("apihub-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            http,
        })
    }

    pub fn from_config(config: &SwaggerHubConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.api_key {
            Some(key) => request.header(AUTHORIZATION, key),
            None => request,
        }
    }
}

#[async_trait]
impl CatalogSource for SwaggerHubClient {
    async fn list_apis(&self, owner: &str) -> Result<Vec<SourceRecord>> {
        let url = format!("{}/apis/{}", self.base_url, owner);
        tracing::debug!("Listing APIs: {}", url);

        let response = self.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(SyncError::Catalog {
                status: response.status().as_u16(),
                url,
            });
        }

        let listing: ApiListing = response.json().await?;
        Ok(listing.apis)
    }

    async fn fetch_spec(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("Fetching spec: {}", url);

        let response = self.get(url).header(ACCEPT, "text/yaml").send().await?;
        if response.status() != StatusCode::OK {
            return Err(SyncError::Catalog {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
