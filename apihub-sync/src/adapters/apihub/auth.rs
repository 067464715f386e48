use serde::Deserialize;

use crate::error::{Result, SyncError};

pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Where API hub bearer tokens come from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(String),
    /// The compute metadata server of the instance we run on.
    MetadataServer { url: String },
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

impl TokenSource {
    pub fn from_config(access_token: Option<&str>) -> Self {
        match access_token.filter(|t| !t.is_empty()) {
            Some(token) => Self::Static(token.to_string()),
            None => Self::MetadataServer {
                url: METADATA_TOKEN_URL.to_string(),
            },
        }
    }

    pub async fn token(&self, http: &reqwest::Client) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::MetadataServer { url } => {
                let response = http
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| SyncError::Auth(format!("metadata server unreachable: {e}")))?;
                if !response.status().is_success() {
                    return Err(SyncError::Auth(format!(
                        "metadata server returned status {}",
                        response.status().as_u16()
                    )));
                }
                let token: MetadataToken = response.json().await?;
                Ok(token.access_token)
            }
        }
    }
}
