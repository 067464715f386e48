use std::sync::Arc;

use serde::Serialize;

use super::translate::{SpecsByUrl, Translator};
use crate::domain::{PluginInstanceName, SourceRecord, TargetApiMetadata, UpsertBatch};
use crate::error::Result;
use crate::ports::{CatalogSource, MetadataSink};

pub struct SyncService<C, S>
where
    C: CatalogSource,
    S: MetadataSink,
{
    catalog: Arc<C>,
    sink: Arc<S>,
    translator: Translator,
}

impl<C, S> SyncService<C, S>
where
    C: CatalogSource,
    S: MetadataSink,
{
    pub fn new(catalog: Arc<C>, sink: Arc<S>) -> Self {
        Self {
            catalog,
            sink,
            translator: Translator::new(),
        }
    }

    #[must_use]
    pub const fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Runs one pass for `owner`: list, fetch specs one at a time, translate,
    /// and submit a single upsert. Listing and submission failures abort the
    /// pass; a failed spec fetch only drops that record's spec.
    pub async fn sync(&self, owner: &str, plugin_instance: PluginInstanceName) -> Result<SyncReport> {
        tracing::info!("Processing sync for owner {}", owner);

        let prepared = self.prepare(owner).await.inspect_err(|e| {
            tracing::error!("Failed to list APIs from SwaggerHub: {}", e);
        })?;

        let batch = UpsertBatch::new(plugin_instance, prepared.api_metadata);
        let outcome = self.sink.collect(&batch).await.inspect_err(|e| {
            tracing::error!("Failed to collect API data: {}", e);
        })?;

        let report = SyncReport {
            apis_listed: prepared.apis_listed,
            specs_fetched: prepared.specs_fetched,
            apis_submitted: batch.api_metadata.len(),
            fetch_failures: prepared.fetch_failures,
            operation: outcome.operation,
        };
        tracing::info!(
            "Sync completed: {} APIs submitted, {} specs fetched, {} fetch failures",
            report.apis_submitted,
            report.specs_fetched,
            report.fetch_failures.len()
        );
        Ok(report)
    }

    /// List, fetch and translate without submitting anything.
    pub async fn prepare(&self, owner: &str) -> Result<PreparedSync> {
        let records = self.catalog.list_apis(owner).await?;
        let (specs, fetch_failures) = self.fetch_specs(&records).await;
        let api_metadata = self.translator.translate(&records, &specs);

        Ok(PreparedSync {
            apis_listed: records.len(),
            specs_fetched: specs.len(),
            fetch_failures,
            api_metadata,
        })
    }

    async fn fetch_specs(&self, records: &[SourceRecord]) -> (SpecsByUrl, Vec<FetchFailure>) {
        let mut specs = SpecsByUrl::new();
        let mut failures = Vec::new();

        for record in records {
            let Some(url) = record.spec_url() else {
                continue;
            };
            if url.is_empty() {
                tracing::debug!("{} has a spec property without a URL", record.name);
                continue;
            }
            if specs.contains_key(url) {
                continue;
            }

            match self.catalog.fetch_spec(url).await {
                Ok(bytes) => {
                    specs.insert(url.to_string(), bytes);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch spec for {}: {}", record.name, e);
                    failures.push(FetchFailure {
                        api: record.name.clone(),
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (specs, failures)
    }
}

#[derive(Debug, Clone)]
pub struct PreparedSync {
    pub apis_listed: usize,
    pub specs_fetched: usize,
    pub fetch_failures: Vec<FetchFailure>,
    pub api_metadata: Vec<TargetApiMetadata>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub apis_listed: usize,
    pub specs_fetched: usize,
    pub apis_submitted: usize,
    pub fetch_failures: Vec<FetchFailure>,
    pub operation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub api: String,
    pub url: String,
    pub reason: String,
}
