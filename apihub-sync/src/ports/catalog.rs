use async_trait::async_trait;

use crate::domain::SourceRecord;
use crate::error::Result;

/// Read side: the API catalog being synced from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_apis(&self, owner: &str) -> Result<Vec<SourceRecord>>;
    async fn fetch_spec(&self, url: &str) -> Result<Vec<u8>>;
}
