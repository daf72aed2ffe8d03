use serde::Deserialize;
use tracing::warn;

use crate::domain::llm::{DEFAULT_AZURE_DEPLOYMENT, DEFAULT_MODEL};
use crate::domain::{DomainError, ProviderConfig, ProviderKind};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Relay settings read once from the process environment.
///
/// Keys are the bare variable names (`OPENAI_API_MODEL`, `API_TYPE`, ...),
/// not the `APP__` namespace used for server settings.
#[derive(Clone)]
pub struct RelaySettings {
    pub provider: ProviderConfig,
    pub api_key: Option<String>,
    pub base_url: String,
    pub https_proxy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayEnv {
    #[serde(default = "default_model")]
    openai_api_model: String,
    #[serde(default = "default_api_type")]
    api_type: String,
    #[serde(default)]
    api_version: String,
    #[serde(default = "default_deployment")]
    azure_deployment: String,
    #[serde(default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    openai_api_base_url: Option<String>,
    #[serde(default)]
    https_proxy: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_type() -> String {
    ProviderKind::Standard.as_str().to_string()
}

fn default_deployment() -> String {
    DEFAULT_AZURE_DEPLOYMENT.to_string()
}

impl RelaySettings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_environment(config::Environment::default())
    }

    /// Build settings from an explicit variable map instead of the process environment
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, DomainError> {
        Self::from_environment(config::Environment::default().source(Some(vars)))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, DomainError> {
        let env: RelayEnv = config::Config::builder()
            .add_source(environment.try_parsing(false))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::configuration(format!("Invalid relay environment: {}", e)))?;

        let kind = ProviderKind::from_api_type(&env.api_type);
        if kind == ProviderKind::Standard && !env.api_type.trim().eq_ignore_ascii_case("open_ai") {
            warn!(api_type = %env.api_type, "Unknown API_TYPE, using the standard provider");
        }

        let provider = ProviderConfig::new(kind)
            .with_model(env.openai_api_model)
            .with_api_version(env.api_version)
            .with_deployment(env.azure_deployment);

        Ok(Self {
            provider,
            api_key: non_empty(env.openai_api_key),
            base_url: non_empty(env.openai_api_base_url)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            https_proxy: non_empty(env.https_proxy),
        })
    }

    pub fn require_api_key(&self) -> Result<&str, DomainError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration("OPENAI_API_KEY is not set"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl std::fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaySettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("https_proxy", &self.https_proxy)
            .finish()
    }
}
