use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "Gpt35";

/// Which request/URL shape the upstream expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI-style `/v1/chat/completions` with bearer auth
    #[default]
    #[serde(rename = "open_ai")]
    Standard,
    /// Azure OpenAI deployment routing with `api-key` auth
    Azure,
}

impl ProviderKind {
    /// Parse the `API_TYPE` value. Only `azure` selects the Azure shape.
    pub fn from_api_type(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("azure") {
            Self::Azure
        } else {
            Self::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "open_ai",
            Self::Azure => "azure",
        }
    }
}

/// Process-wide provider settings, built once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_version: String,
    pub deployment: String,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            model: DEFAULT_MODEL.to_string(),
            api_version: String::new(),
            deployment: DEFAULT_AZURE_DEPLOYMENT.to_string(),
        }
    }

    pub fn standard(model: impl Into<String>) -> Self {
        Self::new(ProviderKind::Standard).with_model(model)
    }

    pub fn azure(api_version: impl Into<String>) -> Self {
        Self::new(ProviderKind::Azure).with_api_version(api_version)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn is_azure(&self) -> bool {
        self.kind == ProviderKind::Azure
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_api_type() {
        assert_eq!(ProviderKind::from_api_type("azure"), ProviderKind::Azure);
        assert_eq!(ProviderKind::from_api_type(" Azure "), ProviderKind::Azure);
        assert_eq!(ProviderKind::from_api_type("open_ai"), ProviderKind::Standard);
        assert_eq!(ProviderKind::from_api_type(""), ProviderKind::Standard);
        assert_eq!(ProviderKind::from_api_type("anthropic"), ProviderKind::Standard);
    }

    #[test]
    fn test_provider_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::Standard).unwrap(),
            "\"open_ai\""
        );
        assert_eq!(serde_json::to_string(&ProviderKind::Azure).unwrap(), "\"azure\"");
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.kind, ProviderKind::Standard);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.api_version, "");
        assert_eq!(config.deployment, "Gpt35");
        assert!(!config.is_azure());
    }
}
