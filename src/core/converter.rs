//! End-to-end code conversion: prompt, completion, cleanup

use std::time::Instant;
use tracing::{debug, error, info};

use crate::core::client::{GroqClient, TextCompletion};
use crate::core::config::{ConverterConfig, DEFAULT_MAX_TOKENS};
use crate::core::errors::{ConfigError, ConversionError};
use crate::core::models::{ConversionRequest, Language};
use crate::core::prompt::build_prompt;
use crate::core::sanitizer::sanitize_output;

/// Stateless converter over a completion capability
#[derive(Debug, Clone)]
pub struct CodeConverter<C> {
    completion: C,
    max_tokens: u32,
}

impl<C: TextCompletion> CodeConverter<C> {
    /// Create a converter with the default output cap
    pub fn new(completion: C) -> Self {
        Self {
            completion,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the output token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Output token cap sent with every completion
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Convert `source_code` from one language to another.
    ///
    /// Any failure of the completion call is logged and reported as
    /// [`ConversionError::Failed`]; the cause never reaches the caller.
    pub async fn convert(
        &self,
        source_code: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, ConversionError> {
        let start_time = Instant::now();
        let prompt = build_prompt(source_code, source_language.value(), target_language.value());

        debug!(
            "Converting {} bytes of {} to {} ({} prompt bytes)",
            source_code.len(),
            source_language,
            target_language,
            prompt.len()
        );

        let completion = match self.completion.complete(&prompt, self.max_tokens).await {
            Ok(completion) => completion,
            Err(e) => {
                error!("Code conversion error: {}", e);
                return Err(ConversionError::Failed);
            }
        };

        let converted = sanitize_output(&completion.text);

        info!(
            "Converted {} -> {} with {} in {:?}",
            source_language,
            target_language,
            completion.model_used,
            start_time.elapsed()
        );

        Ok(converted)
    }

    /// Convert a prepared request
    pub async fn convert_request(&self, request: &ConversionRequest) -> Result<String, ConversionError> {
        self.convert(
            &request.source_code,
            request.source_language,
            request.target_language,
        )
        .await
    }
}

impl CodeConverter<GroqClient> {
    /// Build a converter backed by Groq from an explicit configuration
    pub fn from_config(config: &ConverterConfig) -> Result<Self, ConfigError> {
        let client = GroqClient::new(config)?;
        Ok(Self::new(client).with_max_tokens(config.max_tokens))
    }

    /// Build from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ConverterConfig::from_env()?;
        Self::from_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{ClientError, Result};
    use crate::core::models::Completion;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a canned answer and records what it was asked
    struct StubCompletion {
        answer: std::result::Result<String, String>,
        seen: Mutex<Vec<(String, u32)>>,
    }

    impl StubCompletion {
        fn replying(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                answer: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompletion for StubCompletion {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));

            match &self.answer {
                Ok(text) => Ok(Completion::new(text.clone(), "stub-model")),
                Err(message) => Err(ClientError::NetworkError {
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_python_to_c_end_to_end() {
        let stub = StubCompletion::replying(
            "```c\n#include <stdio.h>\nint main(){printf(\"hi\");}\n```",
        );
        let converter = CodeConverter::new(stub);

        let result = converter
            .convert("print('hi')", Language::Python, Language::C)
            .await
            .unwrap();

        assert_eq!(result, "#include <stdio.h>\nint main(){printf(\"hi\");}");

        let seen = converter.completion.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Convert this PYTHON code to C."));
        assert!(seen[0].0.contains("print('hi')"));
        assert_eq!(seen[0].1, 1000);
    }

    #[tokio::test]
    async fn test_failure_is_generic() {
        let converter = CodeConverter::new(StubCompletion::failing(
            "connection reset by peer: secret-token-123",
        ));

        let err = converter
            .convert("class A {}", Language::Java, Language::Python)
            .await
            .unwrap_err();

        assert_eq!(err, ConversionError::Failed);
        assert!(!err.to_string().contains("secret-token-123"));
        assert!(!format!("{err:?}").contains("connection reset"));
    }

    #[tokio::test]
    async fn test_max_tokens_override() {
        let converter = CodeConverter::new(StubCompletion::replying("x")).with_max_tokens(42);
        converter
            .convert("y", Language::C, Language::Java)
            .await
            .unwrap();

        assert_eq!(converter.completion.seen.lock().unwrap()[0].1, 42);
    }

    #[tokio::test]
    async fn test_convert_request_passes_through() {
        let converter = CodeConverter::new(StubCompletion::replying("  System.out.println(1);  "));
        let request = ConversionRequest::new("print(1)", Language::Python, Language::Java);

        let result = converter.convert_request(&request).await.unwrap();
        assert_eq!(result, "System.out.println(1);");
    }

    #[tokio::test]
    async fn test_empty_source_still_calls_model() {
        let converter = CodeConverter::new(StubCompletion::replying(""));
        let result = converter
            .convert("", Language::C, Language::Python)
            .await
            .unwrap();

        assert_eq!(result, "");
        assert_eq!(converter.completion.seen.lock().unwrap().len(), 1);
    }
}
