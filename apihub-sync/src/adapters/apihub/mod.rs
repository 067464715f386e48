mod auth;
pub mod wire;

use std::time::Duration;

use async_trait::async_trait;

pub use auth::{METADATA_TOKEN_URL, TokenSource};
use wire::{CollectApiDataRequest, Operation};

use crate::config::ApiHubConfig;
use crate::domain::UpsertBatch;
use crate::error::{Result, SyncError};
use crate::ports::{CollectOutcome, MetadataSink};

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_polls: 120,
        }
    }
}

/// API hub collect client. `collect` submits the batch and then waits on the
/// returned long-running operation.
pub struct ApiHubClient {
    base_url: String,
    tokens: TokenSource,
    poll: PollSettings,
    http: reqwest::Client,
}

impl ApiHubClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenSource, poll: PollSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("apihub-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            poll,
            http,
        })
    }

    pub fn from_config(config: &ApiHubConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            TokenSource::from_config(config.access_token.as_deref()),
            PollSettings {
                interval: Duration::from_millis(config.poll_interval_ms),
                max_polls: config.max_polls,
            },
        )
    }

    async fn submit(&self, batch: &UpsertBatch, token: &str) -> Result<Operation> {
        let url = format!("{}/v1/{}:collectApiData", self.base_url, batch.location);
        tracing::debug!(
            "Submitting {} APIs to {}",
            batch.api_metadata.len(),
            url
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&CollectApiDataRequest::from(batch))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_operation(&self, name: &str, token: &str) -> Result<Operation> {
        let url = format!("{}/v1/{}", self.base_url, name);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Operation> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Registry {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn wait(&self, mut operation: Operation, token: &str) -> Result<Operation> {
        let mut polls = 0;
        while !operation.done {
            if polls >= self.poll.max_polls {
                return Err(SyncError::OperationTimeout(operation.name));
            }
            tokio::time::sleep(self.poll.interval).await;
            operation = self.get_operation(&operation.name, token).await?;
            polls += 1;
        }
        Ok(operation)
    }
}

#[async_trait]
impl MetadataSink for ApiHubClient {
    async fn collect(&self, batch: &UpsertBatch) -> Result<CollectOutcome> {
        let token = self.tokens.token(&self.http).await?;
        let operation = self.submit(batch, &token).await?;
        tracing::info!("Collect operation started: {}", operation.name);

        let operation = self.wait(operation, &token).await?;
        if let Some(status) = operation.error {
            return Err(SyncError::OperationFailed {
                code: status.code,
                message: status.message,
            });
        }

        Ok(CollectOutcome {
            operation: Some(operation.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::{Location, PluginId, PluginInstanceName};

    const OP_NAME: &str = "projects/acme/locations/us-central1/operations/op-1";

    fn client(server: &MockServer, max_polls: u32) -> ApiHubClient {
        ApiHubClient::new(
            server.uri(),
            TokenSource::Static("tok".to_string()),
            PollSettings {
                interval: Duration::from_millis(1),
                max_polls,
            },
        )
        .unwrap()
    }

    fn empty_batch() -> UpsertBatch {
        let location = Location::new("acme", "us-central1").unwrap();
        let plugin = PluginId::parse("swaggerhub-plugin").unwrap();
        let instance = PluginInstanceName::new(location, plugin, "nightly").unwrap();
        UpsertBatch::new(instance, Vec::new())
    }

    async fn mount_submit(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(
                "/v1/projects/acme/locations/us-central1:collectApiData",
            ))
            .and(header("Authorization", "Bearer tok"))
            .and(body_partial_json(json!({
                "actionId": "sync-action",
                "collectionType": "COLLECTION_TYPE_UPSERT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_collect_completes_immediately() {
        let server = MockServer::start().await;
        mount_submit(&server, json!({"name": OP_NAME, "done": true})).await;

        let outcome = client(&server, 3).collect(&empty_batch()).await.unwrap();
        assert_eq!(outcome.operation.as_deref(), Some(OP_NAME));
    }

    #[tokio::test]
    async fn test_collect_polls_until_done() {
        let server = MockServer::start().await;
        mount_submit(&server, json!({"name": OP_NAME})).await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{OP_NAME}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OP_NAME})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{OP_NAME}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"name": OP_NAME, "done": true})),
            )
            .mount(&server)
            .await;

        let outcome = client(&server, 5).collect(&empty_batch()).await.unwrap();
        assert_eq!(outcome.operation.as_deref(), Some(OP_NAME));
    }

    #[tokio::test]
    async fn test_collect_operation_error() {
        let server = MockServer::start().await;
        mount_submit(
            &server,
            json!({"name": OP_NAME, "done": true, "error": {"code": 3, "message": "invalid spec"}}),
        )
        .await;

        let err = client(&server, 3).collect(&empty_batch()).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::OperationFailed { code: 3, ref message } if message == "invalid spec"
        ));
    }

    #[tokio::test]
    async fn test_collect_times_out() {
        let server = MockServer::start().await;
        mount_submit(&server, json!({"name": OP_NAME})).await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{OP_NAME}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OP_NAME})))
            .mount(&server)
            .await;

        let err = client(&server, 2).collect(&empty_batch()).await.unwrap_err();
        assert!(matches!(err, SyncError::OperationTimeout(name) if name == OP_NAME));
    }

    #[tokio::test]
    async fn test_collect_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let err = client(&server, 3).collect(&empty_batch()).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Registry { status: 403, ref message } if message == "permission denied"
        ));
    }
}
