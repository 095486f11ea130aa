//! Endpoint model building
//!
//! Walks every (path, method) pair of the document in its own order and
//! produces the [`ClientModel`]: derived identifiers, path variables,
//! resolved response fields, composed documentation, and the accumulated
//! union registry and diagnostics.

use crate::document::{ApiDocument, Operation, SchemaNode};
use crate::resolver::{resolve, UnionTypeRegistry};
use indexmap::IndexMap;
use rest_client_generator_common::{
    ClientModel, Diagnostic, EndpointModel, HttpMethod, ResponseField, TypeDescriptor,
};

/// Status codes probed for a JSON response body, in priority order.
///
/// The trailing `2010`/`2011` entries are not valid HTTP status codes but
/// are kept verbatim for output compatibility with earlier generators.
const RESPONSE_STATUS_PRIORITY: [&str; 12] = [
    "200", "201", "204", "202", "203", "205", "206", "207", "208", "209", "2010", "2011",
];

/// Path variable names that collide with generated reserved identifiers and
/// the substitutions applied to them, in both templates and variable lists.
const RESERVED_VARIABLE_SUBSTITUTIONS: [(&str, &str); 2] = [
    ("ref", "aref"),
    ("content_reference_id", "content_areference_id"),
];

/// Response field names that collide with Rust reserved words; these get an
/// `a`-prefixed internal name plus a serde rename back to the original.
const RESERVED_FIELD_NAMES: [&str; 2] = ["type", "ref"];

/// Build the client model from a loaded document.
///
/// Single linear pass; the union registry is the only state threaded
/// through it. Never fails: unsupported shapes become diagnostics.
pub fn build_client_model(document: &ApiDocument) -> ClientModel {
    let mut registry = UnionTypeRegistry::new();
    let mut methods: Vec<HttpMethod> = Vec::new();
    let mut endpoints = Vec::new();
    let mut diagnostics = Vec::new();

    for (path, operations) in &document.paths {
        for (method_key, operation) in operations {
            let Some(method) = HttpMethod::from_lowercase(method_key) else {
                diagnostics.push(Diagnostic::UnknownMethod {
                    path: path.clone(),
                    key: method_key.clone(),
                });
                continue;
            };

            if !methods.contains(&method) {
                methods.push(method);
            }

            let (path_template, path_variables) = extract_path_variables(path);
            let mut response_fields = Vec::new();

            match select_response_properties(operation) {
                Some(properties) => {
                    for (name, schema) in properties {
                        match resolve(schema, &mut registry) {
                            Ok(descriptor) => {
                                response_fields.push(make_field(name, schema, descriptor));
                            }
                            Err(unsupported) => diagnostics.push(Diagnostic::UnsupportedField {
                                path: path.clone(),
                                method: method.as_lowercase().to_string(),
                                field: name.clone(),
                                detail: unsupported.0,
                            }),
                        }
                    }
                }
                None => diagnostics.push(Diagnostic::NoResponseSchema {
                    path: path.clone(),
                    method: method.as_lowercase().to_string(),
                }),
            }

            endpoints.push(EndpointModel {
                identifier: derive_identifier(method, path),
                http_method: method,
                path_template,
                path_variables,
                response_fields,
                documentation: compose_documentation(method, path, operation),
            });
        }
    }

    ClientModel {
        methods,
        endpoints,
        unions: registry.into_unions(),
        diagnostics,
    }
}

/// Derive the endpoint identifier: capitalized method plus each path
/// segment (split on `/`, `-`, `_`) capitalized with braces stripped.
///
/// Purely syntactic; two operations that normalize to the same text produce
/// duplicate identifiers.
pub fn derive_identifier(method: HttpMethod, path: &str) -> String {
    let mut identifier = String::from(method.variant_name());
    for segment in path.split(['/', '-', '_']) {
        let cleaned: String = segment.chars().filter(|c| *c != '{' && *c != '}').collect();
        identifier.push_str(&capitalize(&cleaned));
    }
    identifier
}

/// Scan the path template for `{name}` occurrences left to right, applying
/// the reserved-name substitutions to both the variable list and the
/// template so the two stay in agreement.
pub fn extract_path_variables(path: &str) -> (String, Vec<String>) {
    let mut template = String::with_capacity(path.len());
    let mut variables = Vec::new();
    let mut rest = path;

    while let Some(start) = rest.find('{') {
        template.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            // Unterminated placeholder; keep the tail as-is.
            template.push_str(&rest[start..]);
            return (template, variables);
        };
        let name = substitute_reserved_variable(&after[..end]);
        template.push('{');
        template.push_str(&name);
        template.push('}');
        variables.push(name);
        rest = &after[end + 1..];
    }

    template.push_str(rest);
    (template, variables)
}

fn substitute_reserved_variable(name: &str) -> String {
    for (from, to) in RESERVED_VARIABLE_SUBSTITUTIONS {
        if name == from {
            return to.to_string();
        }
    }
    name.to_string()
}

/// Find the first status code in the priority list that declares a JSON
/// body with an object schema exposing named properties.
fn select_response_properties(operation: &Operation) -> Option<&IndexMap<String, SchemaNode>> {
    for status in RESPONSE_STATUS_PRIORITY {
        let properties = operation
            .responses
            .get(status)
            .and_then(|response| response.content.get("application/json"))
            .and_then(|media| media.schema.as_ref())
            .and_then(|schema| schema.properties.as_ref());
        if let Some(properties) = properties {
            if !properties.is_empty() {
                return Some(properties);
            }
        }
    }
    None
}

fn make_field(name: &str, schema: &SchemaNode, descriptor: TypeDescriptor) -> ResponseField {
    let (rust_name, serde_rename) = if RESERVED_FIELD_NAMES.contains(&name) {
        (format!("a{}", name), Some(name.to_string()))
    } else {
        (name.to_string(), None)
    };

    ResponseField {
        name: name.to_string(),
        rust_name,
        serde_rename,
        descriptor,
        doc_lines: compose_field_docs(schema),
    }
}

/// Doc lines for one field: example first, then the description, split on
/// its own line breaks.
fn compose_field_docs(schema: &SchemaNode) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(example) = &schema.example {
        lines.push(format!("* example - {}", render_example(example)));
    }
    if let Some(description) = &schema.description {
        lines.extend(description.lines().map(String::from));
    }
    lines
}

fn render_example(example: &serde_json::Value) -> String {
    match example {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compose the endpoint doc block: tags, method+path line, optional
/// external-docs line, blank line, summary, description.
fn compose_documentation(method: HttpMethod, path: &str, operation: &Operation) -> String {
    let mut doc = String::new();
    doc.push_str(&format!("* tags {}\n", operation.tags.join(", ")));
    doc.push_str(&format!("* {} `{}`\n", method.as_lowercase(), path));
    if let Some(url) = operation
        .external_docs
        .as_ref()
        .and_then(|docs| docs.url.as_deref())
    {
        doc.push_str(&format!("* docs {}\n", url));
    }
    doc.push('\n');
    doc.push_str(&operation.summary);
    doc.push('\n');
    doc.push_str(&operation.description);
    doc
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
