use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::metadata::API_STYLE_REST;
use crate::domain::{
    Documentation, Owner, ParsedSpecDescriptor, SourceRecord, SpecMetadata, TargetApiMetadata,
    VersionMetadata, tags,
};

/// Raw specification documents keyed by the URL they were fetched from.
pub type SpecsByUrl = HashMap<String, Vec<u8>>;

pub type Clock = fn() -> DateTime<Utc>;

/// Maps catalog records onto registry metadata. Pure apart from the clock,
/// which supplies the fallback timestamps.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    clock: Clock,
}

impl Default for Translator {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// One output per record, in input order.
    pub fn translate(&self, records: &[SourceRecord], specs: &SpecsByUrl) -> Vec<TargetApiMetadata> {
        records
            .iter()
            .map(|record| self.translate_record(record, specs))
            .collect()
    }

    pub fn translate_record(&self, record: &SourceRecord, specs: &SpecsByUrl) -> TargetApiMetadata {
        tracing::info!("Translating API: {}", record.name);

        let now = (self.clock)();
        let created = record.timestamp_override(tags::CREATED).unwrap_or(now);
        let modified = record.timestamp_override(tags::MODIFIED).unwrap_or(now);
        let version_id = record.version_label();
        let spec_url = record.spec_url().unwrap_or_default();
        let api_id = derive_api_id(spec_url, &record.name);

        let mut owner = None;
        let mut documentation = None;
        let mut spec_entries = Vec::new();

        if let Some(raw) = specs.get(spec_url) {
            let parsed = ParsedSpecDescriptor::parse(raw);
            if let Some(email) = parsed.contact_email {
                owner = Some(Owner {
                    email,
                    display_name: parsed.contact_name.unwrap_or_default(),
                });
            }
            documentation = parsed
                .external_docs_url
                .map(|external_uri| Documentation { external_uri });
            spec_entries.push(SpecMetadata::openapi_yaml(raw.clone(), created, modified));
        }

        TargetApiMetadata {
            original_id: api_id.clone(),
            display_name: record.name.clone(),
            description: record.description.clone(),
            owner,
            documentation: documentation.clone(),
            fingerprint: api_id,
            api_style: API_STYLE_REST.to_string(),
            original_create_time: created,
            original_update_time: modified,
            version: VersionMetadata {
                original_id: version_id.clone(),
                display_name: version_id,
                documentation,
                original_create_time: created,
                original_update_time: modified,
                specs: spec_entries,
            },
        }
    }
}

/// Second-to-last `/` segment of the spec URL once trailing slashes are
/// trimmed, e.g. `.../owner/petstore/1.0` gives `petstore`. Falls back to
/// `fallback` for an empty URL or one with fewer than two segments.
pub fn derive_api_id(spec_url: &str, fallback: &str) -> String {
    if spec_url.is_empty() {
        return fallback.to_string();
    }
    let parts: Vec<&str> = spec_url.trim_end_matches('/').split('/').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2].to_string()
    } else {
        fallback.to_string()
    }
}
