use std::sync::Arc;
use std::time::Duration;

use apihub_sync::adapters::{ApiHubClient, PollSettings, SwaggerHubClient, TokenSource};
use apihub_sync::domain::{Location, PluginId, PluginInstanceName};
use apihub_sync::services::SyncService;
use apihub_sync::SyncError;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PETSTORE_YAML: &str = "\
openapi: 3.0.0
info:
  title: Petstore
  contact:
    name: Pet Team
    email: a@b.com
externalDocs:
  url: https://docs.example.com
";

fn plugin_instance() -> PluginInstanceName {
    let location = Location::new("acme", "us-central1").unwrap();
    let plugin = PluginId::parse("swaggerhub-plugin").unwrap();
    PluginInstanceName::new(location, plugin, "nightly").unwrap()
}

fn service(swaggerhub: &MockServer, apihub: &MockServer) -> SyncService<SwaggerHubClient, ApiHubClient> {
    let catalog = SwaggerHubClient::new(swaggerhub.uri(), Some("key".to_string())).unwrap();
    let sink = ApiHubClient::new(
        apihub.uri(),
        TokenSource::Static("tok".to_string()),
        PollSettings {
            interval: Duration::from_millis(1),
            max_polls: 3,
        },
    )
    .unwrap();
    SyncService::new(Arc::new(catalog), Arc::new(sink))
}

async fn mount_catalog(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/apis/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apis": [
                {
                    "name": "PetStore",
                    "description": "desc",
                    "properties": [
                        {"type": "Swagger", "url": format!("{base}/apis/acme/petstore/v1")},
                        {"type": "X-Version", "value": "v2"},
                        {"type": "X-Created", "value": "2020-01-01T00:00:00Z"},
                        {"type": "X-Modified", "value": "2020-06-01T00:00:00Z"}
                    ]
                },
                {
                    "name": "Broken",
                    "description": "",
                    "properties": [
                        {"type": "Swagger", "url": format!("{base}/apis/acme/broken/1.0")}
                    ]
                }
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apis/acme/petstore/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PETSTORE_YAML))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/apis/acme/broken/1.0"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_pass_submits_every_api() {
    let swaggerhub = MockServer::start().await;
    let apihub = MockServer::start().await;
    mount_catalog(&swaggerhub).await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/acme/locations/us-central1:collectApiData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/acme/locations/us-central1/operations/op-1",
            "done": true
        })))
        .expect(1)
        .mount(&apihub)
        .await;

    let report = service(&swaggerhub, &apihub)
        .sync("acme", plugin_instance())
        .await
        .unwrap();

    assert_eq!(report.apis_listed, 2);
    assert_eq!(report.apis_submitted, 2);
    assert_eq!(report.specs_fetched, 1);
    assert_eq!(report.fetch_failures.len(), 1);
    assert_eq!(report.fetch_failures[0].api, "Broken");

    let requests = apihub.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["actionId"], "sync-action");
    assert_eq!(body["collectionType"], "COLLECTION_TYPE_UPSERT");
    assert_eq!(
        body["pluginInstance"],
        "projects/acme/locations/us-central1/plugins/swaggerhub-plugin/instances/nightly"
    );

    let apis = body["apiData"]["apiMetadataList"]["apiMetadata"]
        .as_array()
        .unwrap();
    assert_eq!(apis.len(), 2);

    let petstore = &apis[0];
    assert_eq!(petstore["originalId"], "petstore");
    assert_eq!(petstore["originalCreateTime"], "2020-01-01T00:00:00Z");
    assert_eq!(petstore["originalUpdateTime"], "2020-06-01T00:00:00Z");
    assert_eq!(petstore["api"]["owner"]["email"], "a@b.com");
    assert_eq!(
        petstore["api"]["documentation"]["externalUri"],
        "https://docs.example.com"
    );
    assert_eq!(petstore["versions"][0]["originalId"], "v2");
    assert_eq!(
        petstore["versions"][0]["specs"][0]["spec"]["contents"]["mimeType"],
        "text/yaml"
    );

    let broken = &apis[1];
    assert_eq!(broken["originalId"], "broken");
    assert!(broken["api"].get("owner").is_none());
    assert_eq!(broken["versions"][0]["originalId"], "v1");
    assert_eq!(broken["versions"][0]["specs"], json!([]));
}

#[tokio::test]
async fn test_listing_failure_submits_nothing() {
    let swaggerhub = MockServer::start().await;
    let apihub = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apis/acme"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&swaggerhub)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&apihub)
        .await;

    let err = service(&swaggerhub, &apihub)
        .sync("acme", plugin_instance())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Catalog { status: 500, .. }));
}

#[tokio::test]
async fn test_failed_operation_fails_the_pass() {
    let swaggerhub = MockServer::start().await;
    let apihub = MockServer::start().await;
    mount_catalog(&swaggerhub).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/acme/locations/us-central1/operations/op-2",
            "done": true,
            "error": {"code": 9, "message": "plugin instance disabled"}
        })))
        .mount(&apihub)
        .await;

    let err = service(&swaggerhub, &apihub)
        .sync("acme", plugin_instance())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::OperationFailed { code: 9, .. }));
    assert_eq!(err.exit_code(), 5);
}
