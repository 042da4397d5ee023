//! Custom error types for conversion operations

use thiserror::Error;

use crate::core::models::Language;

/// Errors raised while talking to the completion service.
///
/// These carry upstream detail and are meant for logs only.
#[derive(Error, Debug)]
pub enum ClientError {
    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport error description
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the body
        message: String,
    },
}

/// The only error a conversion surfaces to its caller
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The completion service could not produce a result
    #[error("Failed to convert code")]
    Failed,
}

/// Input problems caught before a conversion is attempted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Source code is empty or whitespace
    #[error("Please provide source code and select both languages.")]
    MissingSourceCode,

    /// Source and target are the same language
    #[error("Source and target languages cannot be the same.")]
    SameLanguage {
        /// The repeated language
        language: Language,
    },

    /// Language name outside the supported set
    #[error("Unsupported language: {language} (expected one of c, java, python)")]
    UnsupportedLanguage {
        /// Name as given
        language: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable missing
    #[error("{name} environment variable is required")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// Value present but unusable
    #[error("Invalid value for {name}: {message}")]
    InvalidValue {
        /// Setting name
        name: String,
        /// Why it was rejected
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type for completion client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message_is_generic() {
        assert_eq!(ConversionError::Failed.to_string(), "Failed to convert code");
    }

    #[test]
    fn test_client_error_display() {
        let err = ClientError::ApiError {
            status: 401,
            message: "invalid api key".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - invalid api key");
    }

    #[test]
    fn test_same_language_message() {
        let err = RequestError::SameLanguage {
            language: Language::Java,
        };
        assert_eq!(
            err.to_string(),
            "Source and target languages cannot be the same."
        );
    }
}
