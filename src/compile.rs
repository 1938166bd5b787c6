//! Minimal local loader: turns a `serde_json::Value` into the opaque `Schema`
//! the evaluator consumes (`spec` §4.10). Walks the document once, assigns
//! every subschema a stable `NodeId` in an arena, and records each node's
//! JSON-Pointer path in `ref_map` so that same-document `$ref` fragments
//! resolve by lookup rather than by inlining (see `schema.rs`).
//!
//! Remote retrieval, `$id`-based scope tracking and keyword normalization are
//! explicitly out of scope - this loader only ever understands the document
//! it was given.
use crate::{
    dialect::{dialect_from_schema, Dialect},
    error::CompilationError,
    primitive_type::PrimitiveType,
    schema::{Node, NodeId, RootData, Schema},
};
use regex::Regex;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

/// Compile `schema` into a `Schema` handle. `dialect` overrides the draft
/// detected from `$schema`; if neither is available, draft-06 is assumed.
pub fn compile(schema: &Value, dialect: Option<Dialect>) -> Result<Schema, CompilationError> {
    let version = dialect.unwrap_or_else(|| dialect_from_schema(schema).unwrap_or(Dialect::Draft6));
    let mut arena = Vec::new();
    let mut ref_map = HashMap::new();
    let root_id = build_node(schema, String::new(), version, &mut arena, &mut ref_map)?;
    check_references(&arena, &ref_map)?;
    let root = Arc::new(RootData {
        arena,
        ref_map,
        version,
    });
    Ok(Schema::at(root, root_id))
}

pub(crate) fn end_path(reference: &str) -> String {
    reference.trim_start_matches('#').to_string()
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn check_references(
    arena: &[Node],
    ref_map: &HashMap<String, NodeId>,
) -> Result<(), CompilationError> {
    for node in arena {
        if let Some(reference) = &node.reference {
            let key = end_path(reference);
            if !ref_map.contains_key(&key) {
                return Err(CompilationError::UnresolvableReference {
                    reference: reference.clone(),
                    path: node.path.clone(),
                });
            }
        }
    }
    Ok(())
}

fn parse_type_list(value: &Value, path: &str) -> Result<Vec<PrimitiveType>, CompilationError> {
    let malformed = || CompilationError::MalformedKeyword {
        keyword: "type",
        path: path.to_string(),
    };
    match value {
        Value::String(s) => Ok(vec![PrimitiveType::from_keyword(s).ok_or_else(malformed)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(PrimitiveType::from_keyword)
                    .ok_or_else(malformed)
            })
            .collect(),
        _ => Err(malformed()),
    }
}

fn build_node(
    value: &Value,
    path: String,
    version: Dialect,
    arena: &mut Vec<Node>,
    ref_map: &mut HashMap<String, NodeId>,
) -> Result<NodeId, CompilationError> {
    let id = NodeId(arena.len());
    arena.push(Node::empty(path.clone()));
    ref_map.insert(path.clone(), id);

    match value {
        Value::Bool(b) => arena[id.0].schema_bool = Some(*b),
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                // Sibling keywords next to `$ref` are never evaluated (the
                // evaluator substitutes the resolved target wholesale), so
                // there is nothing more to compile for this node.
                arena[id.0].reference = Some(reference.clone());
                return Ok(id);
            }

            // `definitions` has no accessor of its own - it exists purely as
            // a conventional place to hang subschemas that are only ever
            // reached through a `$ref`. Still walk it so its entries land in
            // `ref_map` under their JSON-Pointer path.
            if let Some(Value::Object(defs)) = map.get("definitions") {
                for (k, v) in defs {
                    let child_path = format!("{}/definitions/{}", path, escape_token(k));
                    build_node(v, child_path, version, arena, ref_map)?;
                }
            }

            if let Some(t) = map.get("type") {
                arena[id.0].type_list = Some(parse_type_list(t, &path)?);
            }
            if version.is_draft6() {
                if let Some(c) = map.get("const") {
                    arena[id.0].has_const = true;
                    arena[id.0].const_value = c.clone();
                }
            }
            if let Some(Value::Array(items)) = map.get("enum") {
                arena[id.0].enum_values = Some(items.clone());
            }

            arena[id.0].maximum = map.get("maximum").and_then(Value::as_f64);
            arena[id.0].minimum = map.get("minimum").and_then(Value::as_f64);
            if version.is_draft6() {
                arena[id.0].exclusive_maximum_value = map.get("exclusiveMaximum").and_then(Value::as_f64);
                arena[id.0].exclusive_minimum_value = map.get("exclusiveMinimum").and_then(Value::as_f64);
            } else {
                arena[id.0].exclusive_maximum_flag = map.get("exclusiveMaximum").and_then(Value::as_bool);
                arena[id.0].exclusive_minimum_flag = map.get("exclusiveMinimum").and_then(Value::as_bool);
            }
            arena[id.0].multiple_of = map.get("multipleOf").and_then(Value::as_f64);

            arena[id.0].min_length = map.get("minLength").and_then(Value::as_u64);
            arena[id.0].max_length = map.get("maxLength").and_then(Value::as_u64);
            if let Some(Value::String(p)) = map.get("pattern") {
                let re = Regex::new(p).map_err(|_| CompilationError::MalformedKeyword {
                    keyword: "pattern",
                    path: path.clone(),
                })?;
                arena[id.0].pattern = Some(re);
            }

            match map.get("items") {
                Some(Value::Array(list)) => {
                    let mut ids = Vec::with_capacity(list.len());
                    for (i, item) in list.iter().enumerate() {
                        let child_path = format!("{}/items/{}", path, i);
                        ids.push(build_node(item, child_path, version, arena, ref_map)?);
                    }
                    arena[id.0].items_list = Some(ids);
                }
                Some(item) => {
                    let cid = build_node(item, format!("{}/items", path), version, arena, ref_map)?;
                    arena[id.0].items_single = Some(cid);
                }
                None => {}
            }
            match map.get("additionalItems") {
                Some(Value::Bool(b)) => arena[id.0].additional_items_bool = Some(*b),
                Some(v) => {
                    let cid = build_node(v, format!("{}/additionalItems", path), version, arena, ref_map)?;
                    arena[id.0].additional_items_schema = Some(cid);
                }
                None => {}
            }
            arena[id.0].min_items = map.get("minItems").and_then(Value::as_u64);
            arena[id.0].max_items = map.get("maxItems").and_then(Value::as_u64);
            arena[id.0].unique_items = map.get("uniqueItems").and_then(Value::as_bool).unwrap_or(false);
            if version.is_draft6() {
                if let Some(v) = map.get("contains") {
                    let cid = build_node(v, format!("{}/contains", path), version, arena, ref_map)?;
                    arena[id.0].contains = Some(cid);
                }
            }

            if let Some(Value::Object(props)) = map.get("properties") {
                let mut list = Vec::with_capacity(props.len());
                for (k, v) in props {
                    let child_path = format!("{}/properties/{}", path, escape_token(k));
                    let cid = build_node(v, child_path, version, arena, ref_map)?;
                    list.push((k.clone(), cid));
                }
                arena[id.0].properties = Some(list);
            }
            if let Some(Value::Object(props)) = map.get("patternProperties") {
                let mut list = Vec::with_capacity(props.len());
                for (k, v) in props {
                    let re = Regex::new(k).map_err(|_| CompilationError::MalformedKeyword {
                        keyword: "patternProperties",
                        path: path.clone(),
                    })?;
                    let child_path = format!("{}/patternProperties/{}", path, escape_token(k));
                    let cid = build_node(v, child_path, version, arena, ref_map)?;
                    list.push((re, cid));
                }
                arena[id.0].pattern_properties = Some(list);
            }
            match map.get("additionalProperties") {
                Some(Value::Bool(b)) => arena[id.0].additional_properties_bool = Some(*b),
                Some(v) => {
                    let cid = build_node(v, format!("{}/additionalProperties", path), version, arena, ref_map)?;
                    arena[id.0].additional_properties_schema = Some(cid);
                }
                None => {}
            }
            if version.is_draft6() {
                if let Some(v) = map.get("propertyNames") {
                    let cid = build_node(v, format!("{}/propertyNames", path), version, arena, ref_map)?;
                    arena[id.0].property_names_schema = Some(cid);
                }
            }
            arena[id.0].min_properties = map.get("minProperties").and_then(Value::as_u64).unwrap_or(0);
            arena[id.0].max_properties = map.get("maxProperties").and_then(Value::as_u64);
            if let Some(Value::Array(req)) = map.get("required") {
                let mut names = Vec::with_capacity(req.len());
                for r in req {
                    let s = r.as_str().ok_or_else(|| CompilationError::MalformedKeyword {
                        keyword: "required",
                        path: path.clone(),
                    })?;
                    names.push(s.to_string());
                }
                arena[id.0].required_properties = Some(names);
            }
            if let Some(Value::Object(deps)) = map.get("dependencies") {
                let mut prop_deps = Vec::new();
                let mut schema_deps = Vec::new();
                for (k, v) in deps {
                    match v {
                        Value::Array(names) => {
                            let mut list = Vec::with_capacity(names.len());
                            for n in names {
                                let s = n.as_str().ok_or_else(|| CompilationError::MalformedKeyword {
                                    keyword: "dependencies",
                                    path: path.clone(),
                                })?;
                                list.push(s.to_string());
                            }
                            prop_deps.push((k.clone(), list));
                        }
                        _ => {
                            let child_path = format!("{}/dependencies/{}", path, escape_token(k));
                            let cid = build_node(v, child_path, version, arena, ref_map)?;
                            schema_deps.push((k.clone(), cid));
                        }
                    }
                }
                if !prop_deps.is_empty() {
                    arena[id.0].property_dependencies = Some(prop_deps);
                }
                if !schema_deps.is_empty() {
                    arena[id.0].schema_dependencies = Some(schema_deps);
                }
            }

            let composition_keywords: [(&str, fn(&mut Node) -> &mut Option<Vec<NodeId>>); 3] = [
                ("allOf", |n: &mut Node| &mut n.all_of),
                ("anyOf", |n: &mut Node| &mut n.any_of),
                ("oneOf", |n: &mut Node| &mut n.one_of),
            ];
            for (keyword, field) in composition_keywords {
                if let Some(Value::Array(list)) = map.get(keyword) {
                    let mut ids = Vec::with_capacity(list.len());
                    for (i, sub) in list.iter().enumerate() {
                        let child_path = format!("{}/{}/{}", path, keyword, i);
                        ids.push(build_node(sub, child_path, version, arena, ref_map)?);
                    }
                    *field(&mut arena[id.0]) = Some(ids);
                }
            }
            if let Some(v) = map.get("not") {
                let cid = build_node(v, format!("{}/not", path), version, arena, ref_map)?;
                arena[id.0].not_schema = Some(cid);
            }

            if let Some(Value::String(fmt)) = map.get("format") {
                arena[id.0].format = Some(fmt.clone());
            }
            if version.is_draft6() {
                arena[id.0].format_minimum = map.get("formatMinimum").and_then(Value::as_str).map(str::to_string);
                arena[id.0].format_maximum = map.get("formatMaximum").and_then(Value::as_str).map(str::to_string);
                arena[id.0].format_exclusive_minimum =
                    map.get("formatExclusiveMinimum").and_then(Value::as_str).map(str::to_string);
                arena[id.0].format_exclusive_maximum =
                    map.get("formatExclusiveMaximum").and_then(Value::as_str).map(str::to_string);
            }
        }
        _ => return Err(CompilationError::NotASchema { path }),
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiles_boolean_schema() {
        let schema = compile(&json!(true), Some(Dialect::Draft6)).unwrap();
        assert_eq!(schema.schema_bool(), Some(true));
    }

    #[test]
    fn assigns_pointer_paths() {
        let schema = compile(
            &json!({"properties": {"a": {"type": "string"}}}),
            Some(Dialect::Draft6),
        )
        .unwrap();
        let props = schema.properties().unwrap();
        assert_eq!(props[0].1.path(), "/properties/a");
    }

    #[test]
    fn resolves_local_ref() {
        let schema = compile(
            &json!({
                "definitions": {"pos": {"type": "integer", "minimum": 0}},
                "properties": {"age": {"$ref": "#/definitions/pos"}},
            }),
            Some(Dialect::Draft6),
        )
        .unwrap();
        let age = &schema.properties().unwrap()[0].1;
        assert_eq!(age.reference(), Some("#/definitions/pos"));
        let target = age.resolve(&age.end_path("#/definitions/pos")).unwrap();
        assert_eq!(target.minimum(), Some(0.0));
    }

    #[test]
    fn unresolvable_ref_is_compilation_error() {
        let err = compile(&json!({"$ref": "#/nope"}), Some(Dialect::Draft6)).unwrap_err();
        assert!(matches!(err, CompilationError::UnresolvableReference { .. }));
    }

    #[test]
    fn draft4_exclusive_maximum_is_boolean() {
        let schema = compile(
            &json!({"maximum": 5, "exclusiveMaximum": true}),
            Some(Dialect::Draft4),
        )
        .unwrap();
        assert_eq!(schema.exclusive_maximum_flag(), Some(true));
        assert_eq!(schema.exclusive_maximum_value(), None);
    }

    #[test]
    fn draft6_exclusive_maximum_is_number() {
        let schema = compile(&json!({"exclusiveMaximum": 5}), Some(Dialect::Draft6)).unwrap();
        assert_eq!(schema.exclusive_maximum_value(), Some(5.0));
    }
}
