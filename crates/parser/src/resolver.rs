//! Type resolution: schema node -> type descriptor
//!
//! The resolver is a pure function over one schema node plus the union
//! registry it may append to. Shapes it cannot map come back as
//! [`UnsupportedShape`]; the caller drops the field and records a
//! diagnostic, never aborting the run.

use crate::document::{SchemaNode, TypeField};
use indexmap::IndexMap;
use rest_client_generator_common::{PrimitiveType, TypeDescriptor, UnionType};
use thiserror::Error;

/// A schema shape the resolver cannot map onto the descriptor algebra.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct UnsupportedShape(pub String);

/// Registry of synthesized named union types.
///
/// Append-only; entries are keyed by the canonical identifier derived from
/// the ordered member list. Registration is idempotent under identifier
/// equality only — two distinct member sets that concatenate to the same
/// identifier share one entry.
#[derive(Debug, Clone, Default)]
pub struct UnionTypeRegistry {
    entries: IndexMap<String, Vec<PrimitiveType>>,
}

impl UnionTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a union by its ordered member list, returning the canonical
    /// identifier. An existing entry with the same identifier is reused.
    pub fn register(&mut self, members: &[PrimitiveType]) -> String {
        let identifier: String = members.iter().map(|m| m.descriptor_name()).collect();
        self.entries
            .entry(identifier.clone())
            .or_insert_with(|| members.to_vec());
        identifier
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered unions in registration order.
    pub fn into_unions(self) -> Vec<UnionType> {
        self.entries
            .into_iter()
            .map(|(identifier, members)| UnionType {
                identifier,
                members,
            })
            .collect()
    }
}

/// Resolve a schema node into a type descriptor.
///
/// Identical input always yields an identical descriptor and, for unions,
/// the identical canonical identifier, so repeated encounters of the same
/// union shape collapse onto one registry entry.
pub fn resolve(
    node: &SchemaNode,
    registry: &mut UnionTypeRegistry,
) -> Result<TypeDescriptor, UnsupportedShape> {
    match &node.schema_type {
        Some(TypeField::Single(name)) => resolve_named(name, false, node, registry),
        Some(TypeField::Many(names)) => resolve_name_set(names, node, registry),
        None => resolve_any_of(node, registry),
    }
}

/// Resolve a single type name, wrapping in `Optional` when the node carried
/// a nullable marker.
fn resolve_named(
    name: &str,
    nullable: bool,
    node: &SchemaNode,
    registry: &mut UnionTypeRegistry,
) -> Result<TypeDescriptor, UnsupportedShape> {
    if name == "array" {
        let items = node
            .items
            .as_deref()
            .ok_or_else(|| UnsupportedShape("array without an items schema".to_string()))?;
        // Array-of-unsupported is not partially represented; the whole
        // field is dropped.
        let inner = resolve(items, registry)
            .map_err(|e| UnsupportedShape(format!("array with unsupported items: {}", e.0)))?;
        let array = TypeDescriptor::Array(Box::new(inner));
        return Ok(if nullable {
            TypeDescriptor::optional(array)
        } else {
            array
        });
    }

    let primitive = PrimitiveType::from_schema_name(name)
        .ok_or_else(|| UnsupportedShape(format!("unrecognized type name `{}`", name)))?;
    let descriptor = TypeDescriptor::Primitive(primitive);
    Ok(if nullable {
        TypeDescriptor::optional(descriptor)
    } else {
        descriptor
    })
}

/// Resolve a set of type names: a nullable pair, or a synthesized union.
fn resolve_name_set(
    names: &[String],
    node: &SchemaNode,
    registry: &mut UnionTypeRegistry,
) -> Result<TypeDescriptor, UnsupportedShape> {
    if names.len() == 1 {
        return resolve_named(&names[0], false, node, registry);
    }

    let nullable = names.iter().any(|n| n == "null");
    let members: Vec<&String> = names.iter().filter(|n| *n != "null").collect();

    // Exactly two names, one of them the null marker: plain nullable type.
    if names.len() == 2 {
        if nullable && members.len() == 1 {
            return resolve_named(members[0], true, node, registry);
        }
        return Err(UnsupportedShape(format!(
            "two-member type set without a null marker: [{}]",
            names.join(", ")
        )));
    }

    // Three or more names: synthesize a union of the non-null members.
    if members.len() < 2 {
        return Err(UnsupportedShape(format!(
            "type set [{}] has fewer than two non-null members",
            names.join(", ")
        )));
    }

    let mut primitives = Vec::with_capacity(members.len());
    for member in &members {
        let primitive = PrimitiveType::from_schema_name(member.as_str()).ok_or_else(|| {
            UnsupportedShape(format!("union member `{}` has no primitive mapping", member))
        })?;
        primitives.push(primitive);
    }

    let identifier = registry.register(&primitives);
    let union = TypeDescriptor::NamedUnion(identifier);
    Ok(if nullable {
        TypeDescriptor::optional(union)
    } else {
        union
    })
}

/// Resolve the `anyOf` nullable encoding: exactly two branches, exactly one
/// of which is `{type: "null"}`.
fn resolve_any_of(
    node: &SchemaNode,
    registry: &mut UnionTypeRegistry,
) -> Result<TypeDescriptor, UnsupportedShape> {
    let branches = node
        .any_of
        .as_deref()
        .ok_or_else(|| UnsupportedShape("schema node has no type".to_string()))?;

    if branches.len() != 2 {
        return Err(UnsupportedShape(format!(
            "anyOf with {} branches",
            branches.len()
        )));
    }

    let is_null = |branch: &SchemaNode| {
        matches!(&branch.schema_type, Some(TypeField::Single(name)) if name == "null")
    };

    let inner = match (is_null(&branches[0]), is_null(&branches[1])) {
        (true, false) => &branches[1],
        (false, true) => &branches[0],
        (true, true) => {
            return Err(UnsupportedShape(
                "anyOf with two null branches".to_string(),
            ))
        }
        (false, false) => {
            return Err(UnsupportedShape(
                "anyOf with multiple non-null branches".to_string(),
            ))
        }
    };

    let descriptor = resolve(inner, registry)?;
    Ok(TypeDescriptor::optional(descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> SchemaNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_resolve_primitive() {
        let mut registry = UnionTypeRegistry::new();
        assert_eq!(
            resolve(&node(r#"{"type": "string"}"#), &mut registry),
            Ok(TypeDescriptor::Primitive(PrimitiveType::Text))
        );
        assert_eq!(
            resolve(&node(r#"{"type": "object"}"#), &mut registry),
            Ok(TypeDescriptor::Primitive(PrimitiveType::DynamicValue))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_nullable_pair() {
        let mut registry = UnionTypeRegistry::new();
        assert_eq!(
            resolve(&node(r#"{"type": ["string", "null"]}"#), &mut registry),
            Ok(TypeDescriptor::Optional(Box::new(
                TypeDescriptor::Primitive(PrimitiveType::Text)
            )))
        );
        // Order of the null marker does not matter.
        assert_eq!(
            resolve(&node(r#"{"type": ["null", "integer"]}"#), &mut registry),
            Ok(TypeDescriptor::Optional(Box::new(
                TypeDescriptor::Primitive(PrimitiveType::Integer)
            )))
        );
    }

    #[test]
    fn test_resolve_array() {
        let mut registry = UnionTypeRegistry::new();
        assert_eq!(
            resolve(
                &node(r#"{"type": "array", "items": {"type": "integer"}}"#),
                &mut registry
            ),
            Ok(TypeDescriptor::Array(Box::new(TypeDescriptor::Primitive(
                PrimitiveType::Integer
            ))))
        );
    }

    #[test]
    fn test_resolve_nullable_array() {
        let mut registry = UnionTypeRegistry::new();
        assert_eq!(
            resolve(
                &node(r#"{"type": ["array", "null"], "items": {"type": "string"}}"#),
                &mut registry
            ),
            Ok(TypeDescriptor::Optional(Box::new(TypeDescriptor::Array(
                Box::new(TypeDescriptor::Primitive(PrimitiveType::Text))
            ))))
        );
    }

    #[test]
    fn test_array_of_unsupported_is_dropped_whole() {
        let mut registry = UnionTypeRegistry::new();
        assert!(resolve(
            &node(r#"{"type": "array", "items": {"type": "widget"}}"#),
            &mut registry
        )
        .is_err());
        assert!(resolve(&node(r#"{"type": "array"}"#), &mut registry).is_err());
    }

    #[test]
    fn test_resolve_union_registers_once() {
        let mut registry = UnionTypeRegistry::new();
        let descriptor = resolve(
            &node(r#"{"type": ["string", "integer", "boolean"]}"#),
            &mut registry,
        )
        .unwrap();
        assert_eq!(
            descriptor,
            TypeDescriptor::NamedUnion("TextIntegerBoolean".to_string())
        );
        assert_eq!(registry.len(), 1);

        // Second encounter of the same shape reuses the entry.
        let again = resolve(
            &node(r#"{"type": ["string", "integer", "boolean"]}"#),
            &mut registry,
        )
        .unwrap();
        assert_eq!(again, descriptor);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_nullable_union() {
        let mut registry = UnionTypeRegistry::new();
        let descriptor = resolve(
            &node(r#"{"type": ["string", "integer", "null"]}"#),
            &mut registry,
        )
        .unwrap();
        assert_eq!(
            descriptor,
            TypeDescriptor::Optional(Box::new(TypeDescriptor::NamedUnion(
                "TextInteger".to_string()
            )))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_any_of_nullable() {
        let mut registry = UnionTypeRegistry::new();
        let descriptor = resolve(
            &node(r#"{"anyOf": [{"type": "null"}, {"type": "string"}]}"#),
            &mut registry,
        )
        .unwrap();
        // Identical to the two-element nullable-type-array form.
        assert_eq!(
            descriptor,
            resolve(&node(r#"{"type": ["string", "null"]}"#), &mut registry).unwrap()
        );
    }

    #[test]
    fn test_any_of_never_double_wraps() {
        let mut registry = UnionTypeRegistry::new();
        let descriptor = resolve(
            &node(r#"{"anyOf": [{"type": "null"}, {"type": ["string", "null"]}]}"#),
            &mut registry,
        )
        .unwrap();
        assert_eq!(
            descriptor,
            TypeDescriptor::Optional(Box::new(TypeDescriptor::Primitive(PrimitiveType::Text)))
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        let mut registry = UnionTypeRegistry::new();
        assert!(resolve(&node(r#"{}"#), &mut registry).is_err());
        assert!(resolve(&node(r#"{"type": "widget"}"#), &mut registry).is_err());
        assert!(resolve(&node(r#"{"type": ["string", "integer"]}"#), &mut registry).is_err());
        assert!(resolve(
            &node(r#"{"anyOf": [{"type": "string"}, {"type": "integer"}]}"#),
            &mut registry
        )
        .is_err());
        assert!(resolve(
            &node(r#"{"anyOf": [{"type": "null"}, {"type": "string"}, {"type": "integer"}]}"#),
            &mut registry
        )
        .is_err());
    }

    #[test]
    fn test_registry_dedup_is_by_identifier_only() {
        let mut registry = UnionTypeRegistry::new();
        let a = registry.register(&[PrimitiveType::Text, PrimitiveType::Integer]);
        let b = registry.register(&[PrimitiveType::Text, PrimitiveType::Integer]);
        assert_eq!(a, "TextInteger");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);

        let unions = registry.into_unions();
        assert_eq!(unions.len(), 1);
        assert_eq!(
            unions[0].members,
            vec![PrimitiveType::Text, PrimitiveType::Integer]
        );
    }
}
