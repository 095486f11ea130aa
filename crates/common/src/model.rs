//! Client model — the intermediate representation between the parsed API
//! document and the code emitter.
//!
//! A generation run builds one [`ClientModel`] and the emitter consumes it
//! once; nothing here is persisted between runs.

use serde::{Deserialize, Serialize};

/// The target-language-neutral primitive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveType {
    Integer,
    Float,
    Text,
    Boolean,
    DynamicValue,
}

impl PrimitiveType {
    /// Map a schema `type` name to a primitive.
    ///
    /// `array` is structural, not a primitive, and is handled by the
    /// resolver; unknown names return `None`.
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(PrimitiveType::Integer),
            "number" => Some(PrimitiveType::Float),
            "string" => Some(PrimitiveType::Text),
            "boolean" => Some(PrimitiveType::Boolean),
            "object" => Some(PrimitiveType::DynamicValue),
            _ => None,
        }
    }

    /// Capitalized name used for canonical union identifiers and union
    /// variant names.
    pub fn descriptor_name(&self) -> &'static str {
        match self {
            PrimitiveType::Integer => "Integer",
            PrimitiveType::Float => "Float",
            PrimitiveType::Text => "Text",
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::DynamicValue => "DynamicValue",
        }
    }

    /// Rust type the emitter renders for this primitive.
    pub fn rust_type(&self) -> &'static str {
        match self {
            PrimitiveType::Integer => "i64",
            PrimitiveType::Float => "f64",
            PrimitiveType::Text => "String",
            PrimitiveType::Boolean => "bool",
            PrimitiveType::DynamicValue => "Value",
        }
    }
}

/// Resolved representation of a schema node's type.
///
/// Closed variant set: everything the resolver can produce is one of these
/// four shapes. Invariant: `Optional` never wraps another `Optional` —
/// nullability is collapsed at resolution time via [`TypeDescriptor::optional`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    Array(Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    /// Reference into the union registry by canonical identifier.
    NamedUnion(String),
}

impl TypeDescriptor {
    /// Wrap `inner` in `Optional`, collapsing nested optionality.
    pub fn optional(inner: TypeDescriptor) -> TypeDescriptor {
        match inner {
            TypeDescriptor::Optional(_) => inner,
            other => TypeDescriptor::Optional(Box::new(other)),
        }
    }

    /// Render the Rust type for this descriptor.
    pub fn rust_type(&self) -> String {
        match self {
            TypeDescriptor::Primitive(p) => p.rust_type().to_string(),
            TypeDescriptor::Array(inner) => format!("Vec<{}>", inner.rust_type()),
            TypeDescriptor::Optional(inner) => format!("Option<{}>", inner.rust_type()),
            TypeDescriptor::NamedUnion(id) => id.clone(),
        }
    }
}

/// HTTP methods an operation can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Parse the lowercase method key used in the document.
    pub fn from_lowercase(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    /// Capitalized variant name used in identifiers and the emitted
    /// `Methods` enum.
    pub fn variant_name(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
            HttpMethod::Head => "Head",
            HttpMethod::Options => "Options",
            HttpMethod::Trace => "Trace",
        }
    }

    /// Lowercase form, as it appears in the document and in dispatch
    /// function names.
    pub fn as_lowercase(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.variant_name())
    }
}

/// One resolved response field of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseField {
    /// Field name as it appears in the schema.
    pub name: String,

    /// Name used in the generated struct; differs from `name` when the
    /// original collides with a reserved word.
    pub rust_name: String,

    /// Serialization alias back to the original name, present only when
    /// `rust_name` was renamed.
    pub serde_rename: Option<String>,

    /// Resolved type.
    pub descriptor: TypeDescriptor,

    /// Doc comment lines composed from the schema's `example` and
    /// `description`.
    pub doc_lines: Vec<String>,
}

/// A synthesized named union of primitive types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionType {
    /// Canonical identifier: capitalized member names concatenated in order.
    pub identifier: String,

    /// Ordered member primitives.
    pub members: Vec<PrimitiveType>,
}

/// Generation-time representation of one (path, method) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointModel {
    /// Derived variant name, e.g. `GetReposOwnerRepoIssuesIssueNumber`.
    pub identifier: String,

    pub http_method: HttpMethod,

    /// Path template with `{name}` placeholders, after reserved-name
    /// substitution.
    pub path_template: String,

    /// Variable names in order of first appearance in the path.
    pub path_variables: Vec<String>,

    /// Resolved response fields in the schema's own property order; empty
    /// when no usable response schema was found.
    pub response_fields: Vec<ResponseField>,

    /// Composed doc block: tags, method+path, optional docs link, summary,
    /// description.
    pub documentation: String,
}

impl EndpointModel {
    /// Whether the emitter produces a response struct (and dispatch
    /// function) for this endpoint.
    pub fn has_response(&self) -> bool {
        !self.response_fields.is_empty()
    }
}

/// Non-fatal conditions recorded while building the model.
///
/// These never abort a run; the affected field or response type is simply
/// omitted from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A response field whose schema shape the resolver cannot map.
    UnsupportedField {
        path: String,
        method: String,
        field: String,
        detail: String,
    },

    /// No status code in the priority list carried a usable JSON object
    /// schema.
    NoResponseSchema { path: String, method: String },

    /// A key under a path entry that is not a recognized HTTP method.
    UnknownMethod { path: String, key: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnsupportedField {
                path,
                method,
                field,
                detail,
            } => write!(
                f,
                "{} {}: dropped field `{}` ({})",
                method, path, field, detail
            ),
            Diagnostic::NoResponseSchema { path, method } => {
                write!(f, "{} {}: no usable response schema", method, path)
            }
            Diagnostic::UnknownMethod { path, key } => {
                write!(f, "{}: skipped unknown method key `{}`", path, key)
            }
        }
    }
}

/// The complete output of a model-building pass.
///
/// Replaces the original generator's process-wide accumulators with one
/// explicit context object returned to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientModel {
    /// HTTP methods actually used by the document, in first-use order.
    pub methods: Vec<HttpMethod>,

    /// Endpoints in document order: path order, then method order per path.
    pub endpoints: Vec<EndpointModel>,

    /// Registered unions in registration order.
    pub unions: Vec<UnionType>,

    /// Accumulated non-fatal conditions.
    pub diagnostics: Vec<Diagnostic>,
}
