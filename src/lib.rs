//! Code Converter - LLM-backed source code conversion library
//!
//! Converts source code between C, Java and Python by delegating the
//! translation to a text-completion service, then stripping any markdown
//! fence the model wraps around its answer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    client::{GroqClient, TextCompletion},
    config::ConverterConfig,
    converter::CodeConverter,
    errors::{ClientError, ConfigError, ConversionError, RequestError},
    models::{Completion, ConversionRequest, Language},
    prompt::build_prompt,
    sanitizer::sanitize_output,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
