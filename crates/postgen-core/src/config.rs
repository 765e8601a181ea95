//! Configuration management for postgen
//!
//! Loads configuration with priority:
//! 1. postgen.toml (or the specified config file)
//! 2. Environment variables, including a `.env` file (fallback)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "postgen.toml";

pub const ENV_API_KEY: &str = "POSTMAN_KEY";
pub const ENV_WORKSPACE_ID: &str = "POSTMAN_WORKSPACE_ID";
pub const ENV_WORKSPACE_NAME: &str = "POSTMAN_WORKSPACE_NAME";
pub const ENV_API_BASE_URL: &str = "POSTMAN_API_URL";
pub const ENV_OPENAPI_URL: &str = "OPENAPI_URL";

/// postgen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostgenConfig {
    #[serde(default)]
    pub postman: PostmanSettings,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub collection: CollectionConfig,
}

/// Postman API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanSettings {
    /// API key (can reference env var with ${VAR_NAME})
    pub api_key: Option<String>,

    /// Target workspace id; takes priority over `workspace_name`
    pub workspace_id: Option<String>,

    /// Target workspace name, resolved to an id through the API
    pub workspace_name: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

/// Where the OpenAPI document comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL or local path of the OpenAPI document
    pub openapi_url: Option<String>,
}

/// Output collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name prefix; the document title is used when unset
    pub name: Option<String>,

    /// Variable used as the request host, rendered as `{{name}}`
    #[serde(default = "default_base_url_variable")]
    pub base_url_variable: String,
}

/// Workspace the collection is published into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceTarget {
    Id(String),
    Name(String),
}

impl Default for PostmanSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            workspace_id: None,
            workspace_name: None,
            api_base_url: default_api_base_url(),
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: None,
            base_url_variable: default_base_url_variable(),
        }
    }
}

impl PostmanSettings {
    /// Get the API key with a clear error message
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingValue {
            key: "postman.api_key",
            env: ENV_API_KEY,
        })
    }

    /// Pick the publishing target. An explicit id wins over a name.
    pub fn workspace_target(&self) -> Result<WorkspaceTarget> {
        if let Some(id) = &self.workspace_id {
            return Ok(WorkspaceTarget::Id(id.clone()));
        }
        self.workspace_name
            .clone()
            .map(WorkspaceTarget::Name)
            .ok_or(Error::MissingValue {
                key: "postman.workspace_id",
                env: ENV_WORKSPACE_ID,
            })
    }
}

impl PostgenConfig {
    /// Load configuration from postgen.toml (if any) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file, falling back to the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        if let Ok(dotenv) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {:?}", dotenv);
        }

        let mut config = match path {
            Some(p) => Self::read_file(p)?,
            None => match Self::find_config_file() {
                Some(p) => Self::read_file(&p)?,
                None => {
                    tracing::debug!("No {} found, using environment only", CONFIG_FILE_NAME);
                    Self::default()
                }
            },
        };

        config.apply_env(|name| env::var(name).ok());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from: {:?}", path);

        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| Error::ParseConfig {
            path: path.display().to_string(),
            source,
        })
    }

    /// Find postgen.toml by searching current directory and parents
    fn find_config_file() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve ${VAR_NAME} references and fill unset values from the environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let postman = &mut self.postman;
        resolve_field(&mut postman.api_key, ENV_API_KEY, &lookup);
        resolve_field(&mut postman.workspace_id, ENV_WORKSPACE_ID, &lookup);
        resolve_field(&mut postman.workspace_name, ENV_WORKSPACE_NAME, &lookup);
        resolve_field(&mut self.source.openapi_url, ENV_OPENAPI_URL, &lookup);

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            postman.api_base_url = url;
        }
    }

    /// Source document location with a clear error message
    pub fn openapi_source(&self) -> Result<&str> {
        self.source.openapi_url.as_deref().ok_or(Error::MissingValue {
            key: "source.openapi_url",
            env: ENV_OPENAPI_URL,
        })
    }
}

fn resolve_field(
    field: &mut Option<String>,
    env_name: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) {
    *field = match field.take() {
        Some(value) => resolve_env_var(&value, lookup),
        None => lookup(env_name),
    };
}

/// Resolve a single ${VAR_NAME} reference
fn resolve_env_var(value: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    match value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
        Some(var_name) => lookup(var_name),
        None if value.is_empty() => None,
        None => Some(value.to_string()),
    }
}

fn default_api_base_url() -> String {
    "https://api.getpostman.com".to_string()
}

fn default_base_url_variable() -> String {
    "baseUrl".to_string()
}
