use std::fmt;

use crate::error::{Result, SyncError};

macro_rules! define_segment {
    ($name:ident, $what:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Accepts a single non-empty resource-name segment.
            pub fn parse(s: impl Into<String>) -> Result<Self> {
                let s = s.into();
                if s.is_empty() || s.contains('/') {
                    return Err(SyncError::InvalidResourceName(format!(
                        "{} {:?}",
                        $what, s
                    )));
                }
                Ok(Self(s))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_segment!(ProjectId, "project");
define_segment!(RegionId, "region");
define_segment!(PluginId, "plugin");
define_segment!(InstanceId, "plugin instance");

/// `projects/{project}/locations/{region}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub project: ProjectId,
    pub region: RegionId,
}

impl Location {
    pub fn new(project: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        Ok(Self {
            project: ProjectId::parse(project)?,
            region: RegionId::parse(region)?,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/locations/{}", self.project, self.region)
    }
}

/// `projects/{project}/locations/{region}/plugins/{plugin}/instances/{instance}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginInstanceName {
    pub location: Location,
    pub plugin: PluginId,
    pub instance: InstanceId,
}

impl PluginInstanceName {
    pub fn new(location: Location, plugin: PluginId, instance: impl Into<String>) -> Result<Self> {
        Ok(Self {
            location,
            plugin,
            instance: InstanceId::parse(instance)?,
        })
    }
}

impl fmt::Display for PluginInstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/plugins/{}/instances/{}",
            self.location, self.plugin, self.instance
        )
    }
}
