use serde::Serialize;

use super::{Location, PluginInstanceName, TargetApiMetadata};

pub const SYNC_ACTION_ID: &str = "sync-action";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CollectionType {
    /// Insert, or replace the record with the same identity.
    #[default]
    #[serde(rename = "COLLECTION_TYPE_UPSERT")]
    Upsert,
}

/// Everything submitted to the registry for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertBatch {
    pub location: Location,
    pub plugin_instance: PluginInstanceName,
    pub action_id: String,
    pub collection_type: CollectionType,
    pub api_metadata: Vec<TargetApiMetadata>,
}

impl UpsertBatch {
    pub fn new(plugin_instance: PluginInstanceName, api_metadata: Vec<TargetApiMetadata>) -> Self {
        Self {
            location: plugin_instance.location.clone(),
            plugin_instance,
            action_id: SYNC_ACTION_ID.to_string(),
            collection_type: CollectionType::Upsert,
            api_metadata,
        }
    }
}
