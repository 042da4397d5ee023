//! Core data models for code conversion

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::RequestError;

/// Programming languages supported by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C
    C,
    /// Java
    Java,
    /// Python
    Python,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Language; 3] = [Language::C, Language::Java, Language::Python];

    /// Lower-case identifier used on the wire and on the command line
    pub fn value(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Java => "Java",
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Language {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.value() == wanted)
            .ok_or_else(|| RequestError::UnsupportedLanguage {
                language: s.to_string(),
            })
    }
}

/// A single conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Code as pasted by the user
    pub source_code: String,
    /// Language of `source_code`
    pub source_language: Language,
    /// Language to convert into
    pub target_language: Language,
}

impl ConversionRequest {
    /// Create a new conversion request
    pub fn new(
        source_code: impl Into<String>,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            source_language,
            target_language,
        }
    }

    /// Check the request before handing it to the converter.
    ///
    /// The converter itself accepts anything; front-ends call this so
    /// users get a specific message instead of a wasted model call.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.source_code.trim().is_empty() {
            return Err(RequestError::MissingSourceCode);
        }

        if self.source_language == self.target_language {
            return Err(RequestError::SameLanguage {
                language: self.source_language,
            });
        }

        Ok(())
    }
}

/// Raw text returned by the completion service, before sanitizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Completion text exactly as returned
    pub text: String,
    /// Model that produced the text
    pub model_used: String,
    /// Total tokens billed, when reported
    pub tokens_used: Option<u64>,
}

impl Completion {
    /// Create a completion without usage information
    pub fn new(text: impl Into<String>, model_used: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_used: model_used.into(),
            tokens_used: None,
        }
    }

    /// Attach the reported token usage
    pub fn with_tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("c".parse::<Language>().unwrap(), Language::C);
        assert_eq!("Java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!(" PYTHON ".parse::<Language>().unwrap(), Language::Python);
        assert!("rust".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde_uses_lowercase() {
        let json = serde_json::to_string(&Language::Python).unwrap();
        assert_eq!(json, "\"python\"");

        let lang: Language = serde_json::from_str("\"java\"").unwrap();
        assert_eq!(lang, Language::Java);
    }

    #[test]
    fn test_language_labels() {
        let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
        assert_eq!(labels, vec!["C", "Java", "Python"]);
        assert_eq!(Language::C.to_string(), "c");
    }

    #[test]
    fn test_request_validation() {
        let ok = ConversionRequest::new("print(1)", Language::Python, Language::C);
        assert!(ok.validate().is_ok());

        let blank = ConversionRequest::new("  \n\t", Language::Python, Language::C);
        assert!(matches!(blank.validate(), Err(RequestError::MissingSourceCode)));

        let same = ConversionRequest::new("int x;", Language::C, Language::C);
        assert!(matches!(
            same.validate(),
            Err(RequestError::SameLanguage { language: Language::C })
        ));
    }
}
