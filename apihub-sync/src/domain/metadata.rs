use serde::Serialize;
use chrono::{DateTime, Utc};

pub const API_STYLE_REST: &str = "rest";
pub const SPEC_TYPE_OPENAPI: &str = "openapi";
pub const SPEC_FILE_NAME: &str = "openapi.yaml";
pub const SPEC_MIME_TYPE: &str = "text/yaml";

/// Root of one upserted API: the API itself plus its single current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetApiMetadata {
    pub original_id: String,
    pub display_name: String,
    pub description: String,
    pub owner: Option<Owner>,
    pub documentation: Option<Documentation>,
    pub fingerprint: String,
    pub api_style: String,
    pub original_create_time: DateTime<Utc>,
    pub original_update_time: DateTime<Utc>,
    pub version: VersionMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documentation {
    pub external_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMetadata {
    pub original_id: String,
    pub display_name: String,
    pub documentation: Option<Documentation>,
    pub original_create_time: DateTime<Utc>,
    pub original_update_time: DateTime<Utc>,
    pub specs: Vec<SpecMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecMetadata {
    pub original_id: String,
    pub display_name: String,
    pub contents: SpecContents,
    pub spec_type: String,
    pub original_create_time: DateTime<Utc>,
    pub original_update_time: DateTime<Utc>,
}

impl SpecMetadata {
    /// Wraps raw specification bytes as the `openapi.yaml` spec entry.
    pub fn openapi_yaml(
        contents: Vec<u8>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            original_id: SPEC_FILE_NAME.to_string(),
            display_name: SPEC_FILE_NAME.to_string(),
            contents: SpecContents {
                contents,
                mime_type: SPEC_MIME_TYPE.to_string(),
            },
            spec_type: SPEC_TYPE_OPENAPI.to_string(),
            original_create_time: created,
            original_update_time: modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecContents {
    pub contents: Vec<u8>,
    pub mime_type: String,
}
