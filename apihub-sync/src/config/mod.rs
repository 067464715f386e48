use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Location, PluginId, PluginInstanceName};
use crate::error::{Result, SyncError};

pub const DEFAULT_SWAGGERHUB_URL: &str = "https://api.swaggerhub.com";
pub const DEFAULT_APIHUB_URL: &str = "https://apihub.googleapis.com";
pub const DEFAULT_PLUGIN_ID: &str = "swaggerhub-plugin";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub swaggerhub: SwaggerHubConfig,
    pub apihub: ApiHubConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerHubConfig {
    pub base_url: String,
    pub owner: Option<String>,
    pub api_key: Option<String>,
}

impl Default for SwaggerHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SWAGGERHUB_URL.to_string(),
            owner: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiHubConfig {
    pub base_url: String,
    pub project: Option<String>,
    pub region: Option<String>,
    pub plugin_id: String,
    pub access_token: Option<String>,
    pub poll_interval_ms: u64,
    pub max_polls: u32,
}

impl Default for ApiHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_APIHUB_URL.to_string(),
            project: None,
            region: None,
            plugin_id: DEFAULT_PLUGIN_ID.to_string(),
            access_token: None,
            poll_interval_ms: 1000,
            max_polls: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let global = Self::load_file(&Self::global_path())?;
        let project = Self::load_file(Path::new(".apihub-sync.toml"))?;
        let merged = Self::merge(global, project);
        Ok(merged.with_env_overrides(|key: &str| std::env::var(key).ok()))
    }

    fn global_path() -> PathBuf {
        let config_dir = directories::ProjectDirs::from("", "", "apihub-sync").map_or_else(
            || PathBuf::from("~/.config/apihub-sync"),
            |d| d.config_dir().to_path_buf(),
        );
        config_dir.join("config.toml")
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map(Some)
                .map_err(|e| SyncError::Config(format!("{}: {e}", path.display())))
        } else {
            Ok(None)
        }
    }

    /// Project settings win over global ones field by field.
    fn merge(global: Option<Self>, project: Option<Self>) -> Self {
        let (global, project) = match (global, project) {
            (Some(g), Some(p)) => (g, p),
            (Some(only), None) | (None, Some(only)) => return only,
            (None, None) => return Self::default(),
        };

        let defaults = Self::default();
        let pick = |p: String, g: String, d: &str| if p == d { g } else { p };

        Self {
            swaggerhub: SwaggerHubConfig {
                base_url: pick(
                    project.swaggerhub.base_url,
                    global.swaggerhub.base_url,
                    &defaults.swaggerhub.base_url,
                ),
                owner: project.swaggerhub.owner.or(global.swaggerhub.owner),
                api_key: project.swaggerhub.api_key.or(global.swaggerhub.api_key),
            },
            apihub: ApiHubConfig {
                base_url: pick(
                    project.apihub.base_url,
                    global.apihub.base_url,
                    &defaults.apihub.base_url,
                ),
                project: project.apihub.project.or(global.apihub.project),
                region: project.apihub.region.or(global.apihub.region),
                plugin_id: pick(
                    project.apihub.plugin_id,
                    global.apihub.plugin_id,
                    &defaults.apihub.plugin_id,
                ),
                access_token: project.apihub.access_token.or(global.apihub.access_token),
                poll_interval_ms: if project.apihub.poll_interval_ms == defaults.apihub.poll_interval_ms {
                    global.apihub.poll_interval_ms
                } else {
                    project.apihub.poll_interval_ms
                },
                max_polls: if project.apihub.max_polls == defaults.apihub.max_polls {
                    global.apihub.max_polls
                } else {
                    project.apihub.max_polls
                },
            },
            server: if project.server.port == defaults.server.port {
                global.server
            } else {
                project.server
            },
        }
    }

    fn with_env_overrides(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

        if let Some(owner) = non_empty("SWAGGERHUB_OWNER") {
            self.swaggerhub.owner = Some(owner);
        }
        if let Some(key) = non_empty("SWAGGERHUB_API_KEY") {
            self.swaggerhub.api_key = Some(key);
        }
        if let Some(url) = non_empty("SWAGGERHUB_BASE_URL") {
            self.swaggerhub.base_url = url;
        }
        if let Some(project) = non_empty("GOOGLE_CLOUD_PROJECT") {
            self.apihub.project = Some(project);
        }
        if let Some(region) = non_empty("GOOGLE_CLOUD_REGION") {
            self.apihub.region = Some(region);
        }
        if let Some(token) = non_empty("APIHUB_ACCESS_TOKEN") {
            self.apihub.access_token = Some(token);
        }
        if let Some(port) = non_empty("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self
    }

    pub fn owner(&self) -> Result<&str> {
        self.swaggerhub
            .owner
            .as_deref()
            .filter(|o| !o.is_empty())
            .ok_or(SyncError::MissingOwner)
    }

    pub fn location(&self) -> Result<Location> {
        let project = self
            .apihub
            .project
            .clone()
            .ok_or_else(|| SyncError::Config("GOOGLE_CLOUD_PROJECT is not set".to_string()))?;
        let region = self
            .apihub
            .region
            .clone()
            .ok_or_else(|| SyncError::Config("GOOGLE_CLOUD_REGION is not set".to_string()))?;
        Location::new(project, region)
    }

    pub fn plugin_instance(&self, instance: &str) -> Result<PluginInstanceName> {
        let plugin = PluginId::parse(self.apihub.plugin_id.clone())?;
        PluginInstanceName::new(self.location()?, plugin, instance)
    }
}
