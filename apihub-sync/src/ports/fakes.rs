//! In-memory ports for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CatalogSource, CollectOutcome, MetadataSink};
use crate::domain::{Location, PluginId, PluginInstanceName, SourceRecord, UpsertBatch};
use crate::error::{Result, SyncError};

#[derive(Default)]
pub struct FakeCatalog {
    pub records: Vec<SourceRecord>,
    pub specs: HashMap<String, Vec<u8>>,
    pub fail_listing: bool,
    pub fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn list_apis(&self, owner: &str) -> Result<Vec<SourceRecord>> {
        if self.fail_listing {
            return Err(SyncError::Catalog {
                status: 500,
                url: format!("https://api.swaggerhub.com/apis/{owner}"),
            });
        }
        Ok(self.records.clone())
    }

    async fn fetch_spec(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.specs.get(url).cloned().ok_or_else(|| SyncError::Catalog {
            status: 404,
            url: url.to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub fail: bool,
    pub batches: Mutex<Vec<UpsertBatch>>,
}

#[async_trait]
impl MetadataSink for RecordingSink {
    async fn collect(&self, batch: &UpsertBatch) -> Result<CollectOutcome> {
        if self.fail {
            return Err(SyncError::Registry {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        self.batches.lock().unwrap().push(batch.clone());
        Ok(CollectOutcome {
            operation: Some("operations/op-1".to_string()),
        })
    }
}

pub fn plugin_instance() -> PluginInstanceName {
    let location = Location::new("acme", "us-central1").unwrap();
    let plugin = PluginId::parse("swaggerhub-plugin").unwrap();
    PluginInstanceName::new(location, plugin, "nightly").unwrap()
}
