use async_trait::async_trait;

use crate::domain::UpsertBatch;
use crate::error::Result;

/// Write side: the registry that receives the upsert batch. Implementations
/// return once the registry has finished applying the batch.
#[async_trait]
pub trait MetadataSink: Send + Sync {
    async fn collect(&self, batch: &UpsertBatch) -> Result<CollectOutcome>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectOutcome {
    pub operation: Option<String>,
}
