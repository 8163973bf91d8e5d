//! Client configuration
//!
//! Two layers of configuration feed an [`Index`](crate::Index):
//!
//! - [`ClientConfig`] carries deployment-wide defaults (API key, environment,
//!   project). The composition root builds it explicitly, from a TOML file,
//!   from the process environment, or from a layering of all three.
//! - [`OpenApiConfig`] carries transport settings and per-instance overrides
//!   (`api_key` map, `server_variables` map, explicit host, server templates).
//!
//! [`OpenApiConfig::for_index`] merges the two into a fresh, owned snapshot.
//! Later changes to either source do not reach an index built from it.
//!
//! # Example
//!
//! ```rust
//! use pinecone_index::config::{ClientConfig, OpenApiConfig};
//!
//! let defaults = ClientConfig::builder()
//!     .api_key("secret")
//!     .environment("us-east1-gcp")
//!     .project_name("abc123")
//!     .build();
//!
//! let merged = OpenApiConfig::default().for_index("movies", Some(&defaults));
//! assert_eq!(
//!     merged.resolve_base_url(None).unwrap(),
//!     "https://movies-abc123.svc.us-east1-gcp.pinecone.io"
//! );
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{IndexError, Result};

/// Name of the API-key security scheme in [`OpenApiConfig::api_key`]
pub const API_KEY_AUTH: &str = "ApiKeyAuth";

/// Default environment when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "us-west1-gcp";

/// Default data-plane server template
pub const DEFAULT_SERVER_TEMPLATE: &str =
    "https://{index_name}-{project_name}.svc.{environment}.pinecone.io";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PINECONE_API_KEY";
/// Environment variable holding the environment identifier
pub const ENV_ENVIRONMENT: &str = "PINECONE_ENVIRONMENT";
/// Environment variable holding the project name
pub const ENV_PROJECT_NAME: &str = "PINECONE_PROJECT_NAME";

/// Deployment-wide defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API key used when the instance configuration carries none
    pub api_key: Option<String>,

    /// Environment identifier substituted into the server template
    pub environment: String,

    /// Project name substituted into the server template
    pub project_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            project_name: None,
        }
    }
}

/// On-disk shape of a config file; every key is optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    environment: Option<String>,
    project_name: Option<String>,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::default().overlay_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().overlay_file(path.as_ref())
    }

    /// Layer defaults, then an optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::default().overlay_file(path)?,
            None => Self::default(),
        };
        Ok(config.overlay_lookup(|name| std::env::var(name).ok()))
    }

    /// Overlay values found through `lookup`; absent or empty values are skipped
    pub fn overlay_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(env) = get(ENV_ENVIRONMENT) {
            self.environment = env;
        }
        if let Some(project) = get(ENV_PROJECT_NAME) {
            self.project_name = Some(project);
        }
        self
    }

    fn overlay_file(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IndexError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let file: FileConfig = toml::from_str(&content)?;

        if file.api_key.is_some() {
            self.api_key = file.api_key;
        }
        if let Some(env) = file.environment {
            self.environment = env;
        }
        if file.project_name.is_some() {
            self.project_name = file.project_name;
        }

        tracing::debug!(path = %path.display(), "Loaded client config file");
        Ok(self)
    }
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the environment identifier
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = environment.into();
        self
    }

    /// Set the project name
    pub fn project_name(mut self, project: impl Into<String>) -> Self {
        self.config.project_name = Some(project.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport configuration and per-instance overrides
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiConfig {
    /// Explicit base URL; bypasses template substitution unless a host index
    /// is requested per call
    pub host: Option<String>,

    /// Server URL templates, selected by host index
    pub servers: Vec<String>,

    /// Index into `servers` used when no per-call host index is given
    pub server_index: usize,

    /// Credentials keyed by security scheme name
    pub api_key: HashMap<String, String>,

    /// Values substituted into `{name}` placeholders of the server template
    pub server_variables: HashMap<String, String>,

    /// Default request timeout
    pub request_timeout: Option<Duration>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            host: None,
            servers: vec![DEFAULT_SERVER_TEMPLATE.to_string()],
            server_index: 0,
            api_key: HashMap::new(),
            server_variables: HashMap::new(),
            request_timeout: None,
        }
    }
}

impl OpenApiConfig {
    /// Set an explicit host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the API key for the default security scheme
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key.insert(API_KEY_AUTH.to_string(), key.into());
        self
    }

    /// Override one server variable
    pub fn with_server_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.server_variables.insert(name.into(), value.into());
        self
    }

    /// Set the default request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Produce an owned snapshot bound to `index_name`
    ///
    /// The instance API key wins over `defaults.api_key`. Server variables
    /// derived from `defaults` and `index_name` only fill keys the instance
    /// map leaves unset.
    pub fn for_index(&self, index_name: &str, defaults: Option<&ClientConfig>) -> OpenApiConfig {
        let mut merged = self.clone();

        if !merged.api_key.contains_key(API_KEY_AUTH) {
            if let Some(key) = defaults.and_then(|d| d.api_key.clone()) {
                merged.api_key.insert(API_KEY_AUTH.to_string(), key);
            }
        }

        let mut variables = HashMap::new();
        if let Some(defaults) = defaults {
            variables.insert("environment".to_string(), defaults.environment.clone());
            if let Some(project) = &defaults.project_name {
                variables.insert("project_name".to_string(), project.clone());
            }
        }
        variables.insert("index_name".to_string(), index_name.to_string());
        variables.extend(self.server_variables.clone());
        merged.server_variables = variables;

        merged
    }

    /// The API key for the default security scheme
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.get(API_KEY_AUTH).map(String::as_str)
    }

    /// Resolve the base URL for a call
    ///
    /// Without a host index an explicit `host` is used verbatim. Otherwise the
    /// selected server template has its placeholders substituted.
    pub fn resolve_base_url(&self, host_index: Option<usize>) -> Result<String> {
        if host_index.is_none() {
            if let Some(host) = &self.host {
                return Ok(host.trim_end_matches('/').to_string());
            }
        }

        let index = host_index.unwrap_or(self.server_index);
        let template = self.servers.get(index).ok_or_else(|| {
            IndexError::config(format!(
                "Invalid host index {}; {} server(s) configured",
                index,
                self.servers.len()
            ))
        })?;

        let url = substitute(template, &self.server_variables)?;
        Ok(url.trim_end_matches('/').to_string())
    }
}

/// Replace every `{name}` in `template` with its value from `variables`
fn substitute(template: &str, variables: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            IndexError::config(format!("Unterminated placeholder in {}", template))
        })?;
        let name = &after[..end];
        let value = variables.get(name).ok_or_else(|| {
            IndexError::config(format!("Server variable '{}' is not set", name))
        })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
