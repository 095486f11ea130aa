//! Common types and utilities for rest-client-generator
//!
//! This crate contains the shared client model, error types, and utilities
//! used across the parser, generator, and CLI components.

use thiserror::Error;

pub mod model;

pub use model::{
    ClientModel, Diagnostic, EndpointModel, HttpMethod, PrimitiveType, ResponseField,
    TypeDescriptor, UnionType,
};

/// Errors that can occur during client generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Post-processing error: {0}")]
    PostProcess(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
