//! Document loading and model building for rest-client-generator
//!
//! Turns an OpenAPI-style API description into a [`ClientModel`]:
//! the document loader parses raw JSON into an in-memory tree, the type
//! resolver maps schema nodes onto the closed type-descriptor algebra, and
//! the endpoint model builder walks every (path, method) pair into an
//! ordered endpoint list plus a union-type registry.

pub mod builder;
pub mod document;
pub mod resolver;

pub use builder::build_client_model;
pub use document::{ApiDocument, DocumentParser, Operation, SchemaNode, TypeField};
pub use resolver::{resolve, UnionTypeRegistry, UnsupportedShape};
