//! Template context building
//!
//! Flattens the client model into render-ready structures so the templates
//! stay free of type logic: Rust types, dispatch function names, and doc
//! lines are all precomputed here.

use rest_client_generator_common::{ClientModel, EndpointModel, HttpMethod, UnionType};
use serde::Serialize;

#[derive(Serialize)]
struct MethodContext {
    variant: &'static str,
    upper: String,
}

#[derive(Serialize)]
struct UnionMemberContext {
    variant: &'static str,
    rust_type: &'static str,
}

#[derive(Serialize)]
struct UnionContext {
    identifier: String,
    members: Vec<UnionMemberContext>,
}

#[derive(Serialize)]
struct FieldContext {
    rust_name: String,
    serde_rename: Option<String>,
    rust_type: String,
    doc_lines: Vec<String>,
}

#[derive(Serialize)]
struct EndpointContext {
    identifier: String,
    method_variant: &'static str,
    doc_lines: Vec<String>,
    path_template: String,
    path_variables: Vec<String>,
    dispatch_fn: String,
    response_fields: Vec<FieldContext>,
}

/// Create the template context for one client model.
pub fn create_context(model: &ClientModel, crate_name: &str) -> tera::Context {
    let methods: Vec<MethodContext> = model
        .methods
        .iter()
        .map(|m| MethodContext {
            variant: m.variant_name(),
            upper: m.as_lowercase().to_uppercase(),
        })
        .collect();

    let unions: Vec<UnionContext> = model.unions.iter().map(union_context).collect();

    let endpoints: Vec<EndpointContext> = model.endpoints.iter().map(endpoint_context).collect();

    let mut context = tera::Context::new();
    context.insert("crate_name", crate_name);
    context.insert("methods", &methods);
    context.insert("unions", &unions);
    context.insert("endpoints", &endpoints);
    context
}

fn union_context(union: &UnionType) -> UnionContext {
    UnionContext {
        identifier: union.identifier.clone(),
        members: union
            .members
            .iter()
            .map(|m| UnionMemberContext {
                variant: m.descriptor_name(),
                rust_type: m.rust_type(),
            })
            .collect(),
    }
}

fn endpoint_context(endpoint: &EndpointModel) -> EndpointContext {
    EndpointContext {
        identifier: endpoint.identifier.clone(),
        method_variant: endpoint.http_method.variant_name(),
        doc_lines: endpoint.documentation.lines().map(String::from).collect(),
        path_template: endpoint.path_template.clone(),
        path_variables: endpoint.path_variables.clone(),
        dispatch_fn: dispatch_fn_name(endpoint.http_method, &endpoint.path_template),
        response_fields: endpoint
            .response_fields
            .iter()
            .map(|field| FieldContext {
                rust_name: field.rust_name.clone(),
                serde_rename: field.serde_rename.clone(),
                rust_type: field.descriptor.rust_type(),
                doc_lines: field.doc_lines.clone(),
            })
            .collect(),
    }
}

/// Dispatch function name: lowercase method plus the path template with
/// `/`, `-`, `_` collapsed to `_` and braces stripped, e.g.
/// `get` + `/widgets/{id}` -> `get_widgets_id`.
pub fn dispatch_fn_name(method: HttpMethod, path_template: &str) -> String {
    let joined = path_template
        .split(['/', '-', '_'])
        .collect::<Vec<_>>()
        .join("_");
    let cleaned: String = joined.chars().filter(|c| *c != '{' && *c != '}').collect();
    format!("{}{}", method.as_lowercase(), cleaned)
}
