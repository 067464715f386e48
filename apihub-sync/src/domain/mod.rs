pub mod batch;
pub mod id;
pub mod metadata;
pub mod source;
pub mod spec;

pub use batch::{CollectionType, SYNC_ACTION_ID, UpsertBatch};
pub use id::{InstanceId, Location, PluginId, PluginInstanceName, ProjectId, RegionId};
pub use metadata::{
    Documentation, Owner, SpecContents, SpecMetadata, TargetApiMetadata, VersionMetadata,
};
pub use source::{Property, PropertyPayload, SourceRecord, tags};
pub use spec::ParsedSpecDescriptor;
