//! In-memory representation of the consumed API document
//!
//! Mirrors only the subset of an OpenAPI-style description the builder
//! reads; everything else in the input is ignored by serde. Insertion order
//! of paths, methods, responses, and properties is preserved, since the
//! generated declarations must follow the document's own ordering.

use indexmap::IndexMap;
use rest_client_generator_common::{ClientModel, GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// API document root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Path template -> lowercase method name -> operation.
    #[serde(default)]
    pub paths: IndexMap<String, IndexMap<String, Operation>>,
}

/// One HTTP-method operation under a path.
///
/// `tags`, `summary`, and `description` are required: a document missing
/// them is structurally malformed and fails the run at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub tags: Vec<String>,

    pub summary: String,

    pub description: String,

    #[serde(rename = "externalDocs")]
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,

    /// Status-code string -> response.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// External documentation link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default)]
    pub url: Option<String>,
}

/// One declared response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Media type -> content, e.g. `application/json`.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Response content for one media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

/// A JSON-Schema-like fragment describing one value's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Absent, a single type name, or a set of names possibly including
    /// the literal `"null"` marker.
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<TypeField>,

    /// Element schema, present when `type == "array"`.
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,

    /// Alternative nullable encoding: ordered list of branch schemas.
    #[serde(rename = "anyOf")]
    #[serde(default)]
    pub any_of: Option<Vec<SchemaNode>>,

    /// Named properties, present on object response schemas.
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub example: Option<serde_json::Value>,
}

/// The `type` field of a schema node: one name or a set of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeField {
    Single(String),
    Many(Vec<String>),
}

/// API document parser.
///
/// Reads an OpenAPI-style JSON description and builds the client model.
pub struct DocumentParser {
    document: ApiDocument,
}

impl DocumentParser {
    /// Load a document from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read document {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ApiDocument = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse document JSON: {}", e)))?;

        Ok(Self { document })
    }

    /// Build the client model from the loaded document.
    pub fn build(&self) -> ClientModel {
        crate::builder::build_client_model(&self.document)
    }

    /// Get a reference to the underlying document.
    pub fn document(&self) -> &ApiDocument {
        &self.document
    }
}
