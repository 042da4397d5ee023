//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::core::errors::ConfigError;

/// Groq OpenAI-compatible chat completions endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used for conversions
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Upper bound on generated tokens per conversion
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Configuration for the converter and its completion client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Bearer token for the completion service
    pub api_key: String,
    /// Chat completions URL
    pub api_endpoint: String,
    /// Model identifier
    pub model: String,
    /// Cap on generated tokens
    pub max_tokens: u32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| ConfigError::MissingEnv {
            name: "GROQ_API_KEY".to_string(),
        })?;

        Self::from_env_with_key(api_key)
    }

    /// Load everything but the API key from environment variables
    pub fn from_env_with_key(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();

        let api_endpoint = std::env::var("GROQ_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

        let model = std::env::var("CONVERTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = match std::env::var("CONVERTER_MAX_TOKENS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "CONVERTER_MAX_TOKENS".to_string(),
                    message: e.to_string(),
                })?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };

        debug!("Loaded configuration for model {}", model);

        Ok(Self {
            api_key,
            api_endpoint,
            model,
            max_tokens,
        })
    }

    /// Load from a JSON or YAML file, picked by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(invalid("api_key", "API key is required"));
        }

        if self.api_endpoint.is_empty() {
            return Err(invalid("api_endpoint", "API endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(invalid("model", "model identifier is required"));
        }

        if self.max_tokens == 0 {
            return Err(invalid("max_tokens", "max_tokens must be greater than 0"));
        }

        if !self.api_endpoint.starts_with("https://") {
            warn!("API endpoint {} is not using https", self.api_endpoint);
        }

        Ok(())
    }
}

fn invalid(name: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "yaml" || ext == "yml"
        })
        .unwrap_or(false)
}
