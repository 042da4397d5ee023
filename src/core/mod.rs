//! Core conversion engine module

pub mod client;
pub mod config;
pub mod converter;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod sanitizer;
