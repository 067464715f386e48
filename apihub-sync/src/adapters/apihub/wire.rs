//! JSON shapes of the API hub `collectApiData` REST call, in protobuf JSON
//! form: camelCase keys, RFC 3339 timestamps, base64 bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CollectionType, Documentation, Owner, SpecMetadata, TargetApiMetadata, UpsertBatch,
    VersionMetadata,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectApiDataRequest {
    pub location: String,
    pub plugin_instance: String,
    pub action_id: String,
    pub collection_type: CollectionType,
    pub api_data: ApiData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    pub api_metadata_list: ApiMetadataList,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetadataList {
    pub api_metadata: Vec<ApiMetadata>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetadata {
    pub api: Api,
    pub versions: Vec<ApiVersionMetadata>,
    pub original_id: String,
    pub original_create_time: String,
    pub original_update_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub display_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ApiOwner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<ApiDocumentation>,
    pub fingerprint: String,
    pub api_style: AttributeValues,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOwner {
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    pub external_uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersionMetadata {
    pub version: ApiVersion,
    pub specs: Vec<ApiSpecMetadata>,
    pub original_id: String,
    pub original_create_time: String,
    pub original_update_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersion {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<ApiDocumentation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecMetadata {
    pub spec: ApiSpec,
    pub original_id: String,
    pub original_create_time: String,
    pub original_update_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    pub display_name: String,
    pub contents: ApiSpecContents,
    pub spec_type: AttributeValues,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecContents {
    pub contents: String,
    pub mime_type: String,
}

/// An enum attribute carrying a single allowed value id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValues {
    pub enum_values: EnumAttributeValues,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumAttributeValues {
    pub values: Vec<AllowedValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllowedValue {
    pub id: String,
}

impl AttributeValues {
    pub fn enum_value(id: &str) -> Self {
        Self {
            enum_values: EnumAttributeValues {
                values: vec![AllowedValue { id: id.to_string() }],
            },
        }
    }
}

/// `google.longrunning.Operation`, reduced to what the wait loop reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<OperationStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<&UpsertBatch> for CollectApiDataRequest {
    fn from(batch: &UpsertBatch) -> Self {
        Self {
            location: batch.location.to_string(),
            plugin_instance: batch.plugin_instance.to_string(),
            action_id: batch.action_id.clone(),
            collection_type: batch.collection_type,
            api_data: ApiData::from(batch.api_metadata.as_slice()),
        }
    }
}

impl From<&[TargetApiMetadata]> for ApiData {
    fn from(apis: &[TargetApiMetadata]) -> Self {
        Self {
            api_metadata_list: ApiMetadataList {
                api_metadata: apis.iter().map(ApiMetadata::from).collect(),
            },
        }
    }
}

impl From<&TargetApiMetadata> for ApiMetadata {
    fn from(m: &TargetApiMetadata) -> Self {
        Self {
            api: Api {
                display_name: m.display_name.clone(),
                description: m.description.clone(),
                owner: m.owner.as_ref().map(ApiOwner::from),
                documentation: m.documentation.as_ref().map(ApiDocumentation::from),
                fingerprint: m.fingerprint.clone(),
                api_style: AttributeValues::enum_value(&m.api_style),
            },
            versions: vec![ApiVersionMetadata::from(&m.version)],
            original_id: m.original_id.clone(),
            original_create_time: timestamp(m.original_create_time),
            original_update_time: timestamp(m.original_update_time),
        }
    }
}

impl From<&Owner> for ApiOwner {
    fn from(o: &Owner) -> Self {
        Self {
            display_name: o.display_name.clone(),
            email: o.email.clone(),
        }
    }
}

impl From<&Documentation> for ApiDocumentation {
    fn from(d: &Documentation) -> Self {
        Self {
            external_uri: d.external_uri.clone(),
        }
    }
}

impl From<&VersionMetadata> for ApiVersionMetadata {
    fn from(v: &VersionMetadata) -> Self {
        Self {
            version: ApiVersion {
                display_name: v.display_name.clone(),
                documentation: v.documentation.as_ref().map(ApiDocumentation::from),
            },
            specs: v.specs.iter().map(ApiSpecMetadata::from).collect(),
            original_id: v.original_id.clone(),
            original_create_time: timestamp(v.original_create_time),
            original_update_time: timestamp(v.original_update_time),
        }
    }
}

impl From<&SpecMetadata> for ApiSpecMetadata {
    fn from(s: &SpecMetadata) -> Self {
        Self {
            spec: ApiSpec {
                display_name: s.display_name.clone(),
                contents: ApiSpecContents {
                    contents: STANDARD.encode(&s.contents.contents),
                    mime_type: s.contents.mime_type.clone(),
                },
                spec_type: AttributeValues::enum_value(&s.spec_type),
            },
            original_id: s.original_id.clone(),
            original_create_time: timestamp(s.original_create_time),
            original_update_time: timestamp(s.original_update_time),
        }
    }
}
